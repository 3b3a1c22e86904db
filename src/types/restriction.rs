use std::fmt;

use serde::{Deserialize, Serialize};

use super::membership::Membership;

/// Combinator joining a restriction rule's conditions.
///
/// The wire codes are Moodle's own: `&` (all must match), `!&` (must fail at
/// least one), `|` (at least one must match), `!|` (none may match). Any other
/// code decodes as [`Operator::Unrecognized`] and evaluates fail-open, never
/// as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    And,
    NotAnd,
    Or,
    NotOr,
    /// Operator code this client does not understand. Round-trips the raw
    /// code and never blocks access.
    Unrecognized(String),
}

impl Operator {
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Operator::And => "&",
            Operator::NotAnd => "!&",
            Operator::Or => "|",
            Operator::NotOr => "!|",
            Operator::Unrecognized(code) => code,
        }
    }
}

impl From<String> for Operator {
    fn from(code: String) -> Self {
        match code.as_str() {
            "&" => Operator::And,
            "!&" => Operator::NotAnd,
            "|" => Operator::Or,
            "!|" => Operator::NotOr,
            _ => Operator::Unrecognized(code),
        }
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.code().to_owned()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One atomic test within a restriction rule.
///
/// Decoded from Moodle's flat condition shape: `{"type":"group","id":191}` or
/// `{"type":"date","d":">=","t":1541682000}`. Date conditions are carried on
/// the wire but not interpreted by [`Restriction::is_restricted`]; a date
/// condition never matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Condition {
    Group {
        id: i64,
    },
    Date {
        #[serde(rename = "d")]
        op: String,
        #[serde(rename = "t")]
        timestamp: i64,
    },
}

impl Condition {
    fn matches(&self, membership: &Membership) -> bool {
        match self {
            Condition::Group { id } => membership.contains(*id),
            Condition::Date { .. } => false,
        }
    }
}

/// A boolean access-restriction rule attached to a course module.
///
/// Round-trips Moodle's `availability` encoding losslessly. Visibility is
/// carried either as `show` (the rule reveals as one unit) or `showc` (one
/// flag per condition); neither influences the restriction verdict, they only
/// govern whether Moodle shows or hides the blocked item.
///
/// # Example
///
/// ```
/// use moodle_client::{Condition, Membership, Operator, Restriction};
///
/// let rule = Restriction::parse(r#"{"op":"&","c":[{"type":"group","id":191}],"showc":[true]}"#)
///     .unwrap();
/// assert_eq!(rule.operator, Operator::And);
///
/// let member = Membership::new().with(191);
/// assert!(!rule.is_restricted(&member));
///
/// let outsider = Membership::new().with(5);
/// assert!(rule.is_restricted(&outsider));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restriction {
    #[serde(rename = "op")]
    pub operator: Operator,
    #[serde(rename = "c", default)]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,
    #[serde(rename = "showc", default, skip_serializing_if = "Option::is_none")]
    pub show_conditions: Option<Vec<bool>>,
}

impl Restriction {
    /// Create an empty rule for the given operator.
    #[must_use]
    pub fn new(operator: Operator) -> Self {
        Self {
            operator,
            conditions: Vec::new(),
            show: None,
            show_conditions: None,
        }
    }

    /// Append a condition.
    #[must_use]
    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Set the single combined visibility flag.
    #[must_use]
    pub fn show(mut self, show: bool) -> Self {
        self.show = Some(show);
        self
    }

    /// Append a per-condition visibility flag.
    #[must_use]
    pub fn show_condition(mut self, show: bool) -> Self {
        self.show_conditions.get_or_insert_with(Vec::new).push(show);
        self
    }

    /// Decode a rule from Moodle's `availability` JSON string.
    ///
    /// # Errors
    ///
    /// Returns a decode error for malformed JSON or unexpected field types.
    /// An unknown operator code is not an error; it decodes as
    /// [`Operator::Unrecognized`].
    pub fn parse(encoded: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(encoded)
    }

    /// Decide whether a learner with the given group membership is blocked
    /// from the resource this rule guards.
    ///
    /// Pure function of its inputs; safe to call concurrently. Only group
    /// conditions are evaluated. With no conditions, `&` and `!&` report not
    /// restricted, `|` reports restricted, `!|` reports not restricted. An
    /// unrecognized operator reports not restricted.
    #[must_use]
    pub fn is_restricted(&self, membership: &Membership) -> bool {
        match &self.operator {
            // Must match every condition.
            Operator::And => self.conditions.iter().any(|c| !c.matches(membership)),
            // Must fail at least one condition.
            Operator::NotAnd => {
                !self.conditions.is_empty()
                    && self.conditions.iter().all(|c| c.matches(membership))
            }
            // Must match at least one condition.
            Operator::Or => !self.conditions.iter().any(|c| c.matches(membership)),
            // Must match none of the conditions.
            Operator::NotOr => self.conditions.iter().any(|c| c.matches(membership)),
            Operator::Unrecognized(_) => false,
        }
    }
}
