use std::time::SystemTime;

use serde::Deserialize;

use super::epoch_time;

/// A forum activity as reported by the by-courses endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Forum {
    pub id: i64,
    #[serde(rename = "course")]
    pub course_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub assessed: i64,
    #[serde(default)]
    pub scale: i64,
    #[serde(rename = "grade_forum", alias = "grade", default)]
    pub grade: i64,
    #[serde(rename = "duedate", default)]
    pub due_date: i64,
    #[serde(rename = "cutoffdate", default)]
    pub cutoff_date: i64,
}

impl Forum {
    #[must_use]
    pub fn due_time(&self) -> Option<SystemTime> {
        epoch_time(self.due_date)
    }
}

/// One discussion thread inside a forum.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ForumDiscussion {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub created: i64,
    #[serde(rename = "timemodified", default)]
    pub time_modified: i64,
}

impl ForumDiscussion {
    #[must_use]
    pub fn created_time(&self) -> Option<SystemTime> {
        epoch_time(self.created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forum_decodes_wire_names() {
        let forum: Forum = serde_json::from_str(
            r#"{"id":9,"course":194,"name":"General","type":"general","assessed":1,"scale":100,"grade_forum":0,"duedate":0,"cutoffdate":0}"#,
        )
        .unwrap();
        assert_eq!(forum.course_id, 194);
        assert_eq!(forum.kind, "general");
        assert_eq!(forum.due_time(), None);
    }
}
