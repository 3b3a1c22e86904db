use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use super::epoch_time;

/// A Moodle course, projected from the search and enrolment endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    #[serde(rename = "shortname", default)]
    pub code: String,
    #[serde(rename = "fullname", default)]
    pub name: String,
    #[serde(default)]
    pub summary: String,
    #[serde(rename = "startdate", default)]
    pub start_date: i64,
    #[serde(rename = "enddate", default)]
    pub end_date: i64,
}

impl Course {
    #[must_use]
    pub fn start_time(&self) -> Option<SystemTime> {
        epoch_time(self.start_date)
    }

    #[must_use]
    pub fn end_time(&self) -> Option<SystemTime> {
        epoch_time(self.end_date)
    }
}

/// One group a course defines. Group ids are what restriction rules test
/// against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseGroup {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "shortname", default)]
    pub short_name: String,
}

/// A role assignment as reported by the enrolled-users endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleInfo {
    #[serde(rename = "roleid")]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "shortname", default)]
    pub short_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_decodes_wire_names() {
        let course: Course = serde_json::from_str(
            r#"{"id":36,"shortname":"HIS101","fullname":"History 101","startdate":1541682000,"enddate":0}"#,
        )
        .unwrap();
        assert_eq!(course.code, "HIS101");
        assert!(course.start_time().is_some());
        assert_eq!(course.end_time(), None);
    }

    #[test]
    fn role_decodes_roleid() {
        let role: RoleInfo =
            serde_json::from_str(r#"{"roleid":5,"name":"Student","shortname":"student"}"#).unwrap();
        assert_eq!(role.id, 5);
        assert_eq!(role.short_name, "student");
    }
}
