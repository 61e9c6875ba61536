pub mod cache;
pub mod validate;
mod engine;
mod error;

pub use engine::{compile, Condition, Connector, Join, JoinType, Operator, QueryDescription};

pub use error::{Error, ErrorKind, InternalError};
