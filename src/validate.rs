//! Required-field checks for a query description.
//!
//! The messages match what the form shows under each input, and the paths are
//! spelled the way the form names its inputs (`tableName`,
//! `conditions[0].value`, `joins[2].onField`), so a browser client can hang
//! each message on the right widget.
//!
//! Validation never blocks compilation. A description full of problems still
//! compiles to (degraded) SQL; callers show both.
use crate::engine::{Condition, Join, Operator, QueryDescription};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// One complaint about one form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub path: String,
    pub message: String,
}

impl Problem {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Problem {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl Display for Problem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

pub fn validate(description: &QueryDescription) -> Vec<Problem> {
    let mut problems = Vec::new();

    if description.table_name.is_empty() {
        problems.push(Problem::new("tableName", "Table name is required"));
    }

    if description.field_name.is_empty() {
        problems.push(Problem::new("fieldName", "Field name is required"));
    }

    for (index, condition) in description.conditions.iter().enumerate() {
        check_condition(index, condition, &mut problems);
    }

    for (index, join) in description.joins.iter().enumerate() {
        check_join(index, join, &mut problems);
    }

    problems
}

fn check_condition(index: usize, condition: &Condition, problems: &mut Vec<Problem>) {
    if condition.field.is_empty() {
        problems.push(Problem::new(
            format!("conditions[{index}].field"),
            "Field is required",
        ));
    }

    if condition.value.is_empty() {
        problems.push(Problem::new(
            format!("conditions[{index}].value"),
            "Value is required",
        ));
    }

    if condition.operator == Operator::Between && condition.value2.is_empty() {
        problems.push(Problem::new(
            format!("conditions[{index}].value2"),
            "Second value is required",
        ));
    }
}

fn check_join(index: usize, join: &Join, problems: &mut Vec<Problem>) {
    // an untouched join row is the form's placeholder, not a mistake
    if join.is_blank() {
        return;
    }

    if join.join_type.is_none() {
        problems.push(Problem::new(
            format!("joins[{index}].type"),
            "Join type is required",
        ));
    }

    if join.join_table_name.is_empty() {
        problems.push(Problem::new(
            format!("joins[{index}].joinTableName"),
            "Join table name is required",
        ));
    }

    if join.on_field.is_empty() {
        problems.push(Problem::new(
            format!("joins[{index}].onField"),
            "Field name in the main table is required",
        ));
    }

    if join.equals_to.is_empty() {
        problems.push(Problem::new(
            format!("joins[{index}].equalsTo"),
            "Field name in the join table is required",
        ));
    }
}
