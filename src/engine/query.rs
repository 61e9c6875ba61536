//! The shape of the query being assembled.
//!
//! These structs mirror the inputs of the form that feeds us: one table, one
//! field list, any number of condition rows and join rows. The wire format is
//! the camelCase JSON the form posts on every keystroke, so a description can
//! be blank or half-filled at any point in time. Whether a row has enough of
//! its fields set to show up in the generated SQL is decided by the
//! `is_included` checks below, nowhere else.
use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryDescription {
    pub table_name: String,
    pub field_name: String,
    pub conditions: Vec<Condition>,
    pub joins: Vec<Join>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    pub field: String,
    pub operator: Operator,
    pub value: String,
    /// Upper bound, only read for BETWEEN.
    pub value2: String,
    /// Joins this condition to the one after it. The last included condition
    /// keeps whatever connector it has; it just never gets printed.
    pub connector: Connector,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Join {
    /// The form has an explicit "nothing selected" option for join types,
    /// which arrives as an empty string.
    #[serde(
        rename = "type",
        serialize_with = "join_type_to_form",
        deserialize_with = "join_type_from_form"
    )]
    pub join_type: Option<JoinType>,
    pub join_table_name: String,
    /// Field on the primary table.
    pub on_field: String,
    /// Field on the joined table.
    pub equals_to: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[default]
    #[serde(rename = "=")]
    Equals,
    #[serde(rename = "!=")]
    NotEquals,
    #[serde(rename = "<")]
    LesserThan,
    #[serde(rename = "<=")]
    LesserOrEqual,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "BETWEEN")]
    Between,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Connector {
    #[default]
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
}

impl Condition {
    /// A condition only makes it into the query once it has both a field and
    /// a value. Anything less is a half-filled form row, silently skipped.
    ///
    /// Emptiness is exact: no trimming, `" "` counts as filled in.
    pub fn is_included(&self) -> bool {
        !self.field.is_empty() && !self.value.is_empty()
    }
}

impl Join {
    /// A join needs all four of its inputs before it shows up in the query.
    pub fn is_included(&self) -> bool {
        self.join_type.is_some()
            && !self.join_table_name.is_empty()
            && !self.on_field.is_empty()
            && !self.equals_to.is_empty()
    }

    /// The form always renders one untouched join row; that row is neither
    /// included nor worth complaining about.
    pub fn is_blank(&self) -> bool {
        self.join_type.is_none()
            && self.join_table_name.is_empty()
            && self.on_field.is_empty()
            && self.equals_to.is_empty()
    }
}

impl QueryDescription {
    pub fn included_conditions(&self) -> impl Iterator<Item = &Condition> {
        self.conditions
            .iter()
            .filter(|condition| condition.is_included())
    }

    pub fn included_joins(&self) -> impl Iterator<Item = &Join> {
        self.joins.iter().filter(|join| join.is_included())
    }
}

impl Default for Condition {
    /// The form seeds new condition rows with `=` and `AND` preselected.
    fn default() -> Self {
        Condition {
            field: String::new(),
            operator: Operator::Equals,
            value: String::new(),
            value2: String::new(),
            connector: Connector::And,
        }
    }
}

fn join_type_to_form<S>(join_type: &Option<JoinType>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match join_type {
        Some(it) => it.serialize(serializer),
        None => serializer.serialize_str(""),
    }
}

fn join_type_from_form<'de, D>(deserializer: D) -> Result<Option<JoinType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;

    if raw.is_empty() {
        return Ok(None);
    }

    JoinType::deserialize(raw.into_deserializer()).map(Some)
}
