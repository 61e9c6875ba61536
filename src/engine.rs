mod query;
mod rendering;

pub use query::{Condition, Connector, Join, JoinType, Operator, QueryDescription};

/// Turns a query description into SQL text.
///
/// This never fails. A half-filled-in description produces half-finished SQL,
/// like `SELECT  FROM ;` — the output is a live preview of whatever the user
/// has typed so far, not something we promise a database will accept.
pub fn compile(description: &QueryDescription) -> String {
    format!("{};", description)
}
