use serde::Deserialize;

use super::restriction::Restriction;

/// A course content item (assignment, forum, quiz, label, ...) as returned by
/// the course-module endpoint.
///
/// `availability` carries the JSON-encoded restriction rule, or is absent
/// when the module is unconditionally visible.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CourseModule {
    pub id: i64,
    pub course: i64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "modname", default)]
    pub mod_name: String,
    #[serde(default)]
    pub instance: i64,
    #[serde(default)]
    pub section: i64,
    #[serde(default)]
    pub visible: i64,
    #[serde(default)]
    pub availability: Option<String>,
}

impl CourseModule {
    /// Decode the attached restriction rule, if any.
    ///
    /// # Errors
    ///
    /// Returns the decode error for a malformed `availability` payload rather
    /// than substituting defaults that would change restriction semantics.
    pub fn restriction(&self) -> Result<Option<Restriction>, serde_json::Error> {
        match self.availability.as_deref() {
            None | Some("") => Ok(None),
            Some(encoded) => Restriction::parse(encoded).map(Some),
        }
    }
}
