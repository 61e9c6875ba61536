//! Everything here implements Display; `compile` at the engine root adds the
//! trailing `;` and nothing else.
//!
//! The output is a single line. The base `SELECT {fields} FROM {table}` keeps
//! its spaces even when both names are empty, which is how the preview manages
//! to always show *something* while the user is still typing.
use crate::engine::{Condition, Connector, Join, JoinType, Operator, QueryDescription};
use std::fmt::{Display, Formatter};

impl Display for QueryDescription {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "SELECT {} FROM {}", self.field_name, self.table_name)?;

        for join in self.included_joins() {
            write!(f, " {join}")?;
        }

        write!(f, "{}", WhereClause(self))
    }
}

/// Displays " WHERE a = 1 AND b = 2", or nothing at all when no condition has
/// enough of its fields filled in.
///
/// The connector between two conditions belongs to the one on the left, and
/// positions are counted over the *included* conditions. Whatever connector
/// the last included condition holds never gets printed.
struct WhereClause<'a>(&'a QueryDescription);

impl Display for WhereClause<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut conditions = self.0.included_conditions().peekable();

        if conditions.peek().is_none() {
            return Ok(());
        }

        write!(f, " WHERE ")?;

        while let Some(condition) = conditions.next() {
            write!(f, "{condition}")?;

            if conditions.peek().is_some() {
                write!(f, " {} ", condition.connector)?;
            }
        }

        Ok(())
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let Self {
            field,
            operator,
            value,
            value2,
            ..
        } = self;

        match operator {
            // The upper bound is always quoted, numeric or not. The original
            // behaved this way and people compare generated queries, so we
            // keep it until someone decides otherwise.
            Operator::Between => {
                write!(f, "{field} BETWEEN {value} AND '{value2}'", value = SqlValue(value))
            }
            _ => write!(f, "{field} {operator} {value}", value = SqlValue(value)),
        }
    }
}

/// A comparison value as it appears in the generated SQL: numbers go in bare,
/// everything else gets wrapped in single quotes. Quotes inside the value are
/// not escaped; the preview shows what you typed.
struct SqlValue<'a>(&'a str);

impl SqlValue<'_> {
    /// Numeric means the whole trimmed value parses as a float, NaN excluded.
    /// `"1e3"` and `" 42 "` count; `"42abc"` and `"4 2"` do not.
    fn is_numeric(&self) -> bool {
        match self.0.trim().parse::<f64>() {
            Ok(number) => !number.is_nan(),
            Err(_) => false,
        }
    }
}

impl Display for SqlValue<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_numeric() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "'{}'", self.0)
        }
    }
}

impl Display for Join {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let Self {
            join_type,
            join_table_name,
            on_field,
            equals_to,
        } = self;

        if let Some(join_type) = join_type {
            write!(f, "{join_type} JOIN {join_table_name} ON {on_field} = {equals_to}")?;
        }

        Ok(())
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Operator::Equals => "=",
            Operator::NotEquals => "!=",
            Operator::LesserThan => "<",
            Operator::LesserOrEqual => "<=",
            Operator::GreaterThan => ">",
            Operator::GreaterOrEqual => ">=",
            Operator::Between => "BETWEEN",
        };

        write!(f, "{symbol}")
    }
}

impl Display for Connector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Connector::And => write!(f, "AND"),
            Connector::Or => write!(f, "OR"),
        }
    }
}

impl Display for JoinType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            JoinType::Inner => write!(f, "INNER"),
            JoinType::Left => write!(f, "LEFT"),
            JoinType::Right => write!(f, "RIGHT"),
            JoinType::Full => write!(f, "FULL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compile;

    #[test]
    fn an_empty_description_still_renders() {
        assert_eq!("SELECT  FROM ;", compile(&QueryDescription::default()));
    }

    #[test]
    fn no_conditions_and_no_joins_is_just_select_from() {
        let query = description("users", "name, email");

        assert_eq!("SELECT name, email FROM users;", compile(&query));
    }

    #[test]
    fn compiling_twice_gives_the_same_output() {
        let mut query = description("users", "*");
        query.conditions.push(condition("age", Operator::GreaterOrEqual, "18"));
        query.joins.push(join(JoinType::Left, "orders", "users.id", "orders.user_id"));

        assert_eq!(compile(&query), compile(&query));
    }

    #[test]
    fn a_single_condition_gets_no_connector() {
        let mut query = description("users", "name, email");
        query.conditions.push(condition("age", Operator::GreaterOrEqual, "18"));

        assert_eq!("SELECT name, email FROM users WHERE age >= 18;", compile(&query));
    }

    #[test]
    fn connectors_come_from_the_condition_on_the_left() {
        let mut query = description("users", "*");
        query.conditions.push(condition("status", Operator::Equals, "active"));
        query.conditions.push(or(condition("age", Operator::LesserThan, "30")));

        assert_eq!(
            "SELECT * FROM users WHERE status = 'active' AND age < 30;",
            compile(&query)
        );
    }

    #[test]
    fn three_conditions_use_exactly_two_connectors() {
        let mut query = description("users", "*");
        query.conditions.push(or(condition("status", Operator::Equals, "active")));
        query.conditions.push(condition("age", Operator::LesserThan, "30"));
        query.conditions.push(or(condition("age", Operator::GreaterThan, "90")));

        // the last condition's OR has nothing to connect to
        assert_eq!(
            "SELECT * FROM users WHERE status = 'active' OR age < 30 AND age > 90;",
            compile(&query)
        );
    }

    #[test]
    fn half_filled_conditions_are_skipped() {
        let mut query = description("users", "*");
        query.conditions.push(condition("", Operator::Equals, "active"));
        query.conditions.push(condition("age", Operator::LesserThan, "30"));
        query.conditions.push(condition("name", Operator::Equals, ""));

        assert_eq!("SELECT * FROM users WHERE age < 30;", compile(&query));
    }

    #[test]
    fn connector_positions_are_relative_to_the_included_conditions() {
        let mut query = description("users", "*");
        // this one is skipped, so its OR must not show up anywhere
        query.conditions.push(or(condition("", Operator::Equals, "x")));
        query.conditions.push(condition("status", Operator::Equals, "active"));
        // skipped again, its connector must not leak between the two survivors
        query.conditions.push(or(condition("ghost", Operator::Equals, "")));
        query.conditions.push(condition("age", Operator::LesserThan, "30"));

        assert_eq!(
            "SELECT * FROM users WHERE status = 'active' AND age < 30;",
            compile(&query)
        );
    }

    #[test]
    fn numeric_values_go_in_bare() {
        for value in ["42", "3.14", "-7", "1e3", " 42 "] {
            let mut query = description("t", "*");
            query.conditions.push(condition("f", Operator::Equals, value));

            assert_eq!(format!("SELECT * FROM t WHERE f = {value};"), compile(&query));
        }
    }

    #[test]
    fn everything_else_gets_single_quotes() {
        for value in ["abc", "42abc", "4 2", "NaN", "12,5"] {
            let mut query = description("t", "*");
            query.conditions.push(condition("f", Operator::Equals, value));

            assert_eq!(format!("SELECT * FROM t WHERE f = '{value}';"), compile(&query));
        }
    }

    #[test]
    fn between_quotes_the_upper_bound_no_matter_what() {
        let mut query = description("users", "*");
        query.conditions.push(between("age", "18", "65"));

        assert_eq!("SELECT * FROM users WHERE age BETWEEN 18 AND '65';", compile(&query));
    }

    #[test]
    fn between_still_quotes_a_text_lower_bound() {
        let mut query = description("users", "*");
        query.conditions.push(between("name", "alice", "bob"));

        assert_eq!(
            "SELECT * FROM users WHERE name BETWEEN 'alice' AND 'bob';",
            compile(&query)
        );
    }

    #[test]
    fn a_complete_join_is_appended_to_from() {
        let mut query = description("users", "*");
        query.joins.push(join(JoinType::Inner, "orders", "users.id", "orders.user_id"));

        assert_eq!(
            "SELECT * FROM users INNER JOIN orders ON users.id = orders.user_id;",
            compile(&query)
        );
    }

    #[test]
    fn incomplete_joins_are_skipped() {
        let complete = join(JoinType::Inner, "orders", "users.id", "orders.user_id");

        let strips: [fn(&mut Join); 4] = [
            |it| it.join_type = None,
            |it| it.join_table_name = String::new(),
            |it| it.on_field = String::new(),
            |it| it.equals_to = String::new(),
        ];

        for strip in strips {
            let mut broken = complete.clone();
            strip(&mut broken);

            let mut query = description("users", "*");
            query.joins.push(broken);

            assert_eq!("SELECT * FROM users;", compile(&query));
        }
    }

    #[test]
    fn joins_keep_their_order() {
        let mut query = description("users", "*");
        query.joins.push(join(JoinType::Left, "orders", "users.id", "orders.user_id"));
        query.joins.push(join(JoinType::Right, "payments", "orders.id", "payments.order_id"));

        assert_eq!(
            "SELECT * FROM users \
             LEFT JOIN orders ON users.id = orders.user_id \
             RIGHT JOIN payments ON orders.id = payments.order_id;",
            compile(&query)
        );
    }

    #[test]
    fn joins_come_before_the_where_clause() {
        let mut query = description("users", "name");
        query.joins.push(join(JoinType::Full, "orders", "users.id", "orders.user_id"));
        query.conditions.push(condition("age", Operator::NotEquals, "30"));

        assert_eq!(
            "SELECT name FROM users FULL JOIN orders ON users.id = orders.user_id WHERE age != 30;",
            compile(&query)
        );
    }

    fn description(table: &str, fields: &str) -> QueryDescription {
        QueryDescription {
            table_name: table.to_string(),
            field_name: fields.to_string(),
            ..Default::default()
        }
    }

    fn condition(field: &str, operator: Operator, value: &str) -> Condition {
        Condition {
            field: field.to_string(),
            operator,
            value: value.to_string(),
            ..Default::default()
        }
    }

    fn between(field: &str, low: &str, high: &str) -> Condition {
        Condition {
            field: field.to_string(),
            operator: Operator::Between,
            value: low.to_string(),
            value2: high.to_string(),
            ..Default::default()
        }
    }

    fn or(mut condition: Condition) -> Condition {
        condition.connector = Connector::Or;
        condition
    }

    fn join(join_type: JoinType, table: &str, on: &str, equals: &str) -> Join {
        Join {
            join_type: Some(join_type),
            join_table_name: table.to_string(),
            on_field: on.to_string(),
            equals_to: equals.to_string(),
        }
    }
}
