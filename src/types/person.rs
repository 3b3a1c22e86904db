use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use super::course::{CourseGroup, RoleInfo};
use super::epoch_time;

/// A user-profile custom field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    #[serde(rename = "shortname")]
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// A Moodle account, projected from the user-lookup endpoints.
///
/// `personal_email` is lifted out of the profile custom fields when present;
/// the remaining custom fields are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Person {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub personal_email: String,
    pub first_name: String,
    pub last_name: String,
    pub profile_image_url: String,
    pub custom_fields: Vec<CustomField>,
}

impl Person {
    /// Look up a profile custom field by short name.
    #[must_use]
    pub fn custom_field(&self, name: &str) -> Option<&str> {
        self.custom_fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

/// A participant in one course, with their roles and groups, as reported by
/// the enrolled-users endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CoursePerson {
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(rename = "firstname", default)]
    pub first_name: String,
    #[serde(rename = "lastname", default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "firstaccess", default)]
    pub first_access: i64,
    #[serde(rename = "lastaccess", default)]
    pub last_access: i64,
    #[serde(default)]
    pub groups: Vec<CourseGroup>,
    #[serde(default)]
    pub roles: Vec<RoleInfo>,
    #[serde(rename = "customfields", default)]
    pub custom_fields: Vec<CustomField>,
}

impl CoursePerson {
    #[must_use]
    pub fn first_access_time(&self) -> Option<SystemTime> {
        epoch_time(self.first_access)
    }

    #[must_use]
    pub fn last_access_time(&self) -> Option<SystemTime> {
        epoch_time(self.last_access)
    }

    /// Look up a profile custom field by short name.
    #[must_use]
    pub fn custom_field(&self, name: &str) -> Option<&str> {
        self.custom_fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    #[must_use]
    pub fn has_group_named(&self, name: &str) -> bool {
        self.groups.iter().any(|g| g.name == name)
    }

    /// The learner's group membership, ready for restriction evaluation.
    #[must_use]
    pub fn membership(&self) -> super::Membership {
        self.groups.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CoursePerson {
        serde_json::from_str(
            r#"{
                "id": 7,
                "username": "jsmith",
                "firstname": "Jan",
                "lastname": "Smith",
                "email": "jan@example.com",
                "firstaccess": 1541682000,
                "lastaccess": 0,
                "groups": [{"id": 191, "name": "Audit", "shortname": "audit"}],
                "roles": [{"roleid": 5, "name": "Student", "shortname": "student"}],
                "customfields": [{"shortname": "personalemail", "value": "jan@home.net", "type": "text"}]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn access_times() {
        let p = sample();
        assert!(p.first_access_time().is_some());
        assert_eq!(p.last_access_time(), None);
    }

    #[test]
    fn custom_field_lookup() {
        let p = sample();
        assert_eq!(p.custom_field("personalemail"), Some("jan@home.net"));
        assert_eq!(p.custom_field("missing"), None);
    }

    #[test]
    fn group_name_test() {
        let p = sample();
        assert!(p.has_group_named("Audit"));
        assert!(!p.has_group_named("audit"));
    }

    #[test]
    fn membership_carries_group_ids() {
        let p = sample();
        assert!(p.membership().contains(191));
        assert!(!p.membership().contains(5));
    }
}
