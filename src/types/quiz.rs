use std::time::SystemTime;

use serde::Deserialize;

use super::epoch_time;

/// A quiz activity as reported by the by-courses endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Quiz {
    pub id: i64,
    #[serde(rename = "course")]
    pub course_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "timeopen", default)]
    pub time_open: i64,
    #[serde(rename = "timeclose", default)]
    pub time_close: i64,
    #[serde(rename = "grademethod", default)]
    pub grade_method: i64,
    #[serde(default)]
    pub grade: f64,
    #[serde(rename = "preferredbehaviour", default)]
    pub preferred_behaviour: String,
}

impl Quiz {
    #[must_use]
    pub fn open_time(&self) -> Option<SystemTime> {
        epoch_time(self.time_open)
    }

    #[must_use]
    pub fn close_time(&self) -> Option<SystemTime> {
        epoch_time(self.time_close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_decodes_wire_names() {
        let quiz: Quiz = serde_json::from_str(
            r#"{"id":4,"course":181,"name":"Week 1 quiz","timeopen":0,"timeclose":1541682000,"grademethod":1,"grade":10.0,"preferredbehaviour":"deferredfeedback"}"#,
        )
        .unwrap();
        assert_eq!(quiz.course_id, 181);
        assert!(quiz.close_time().is_some());
        assert_eq!(quiz.open_time(), None);
    }
}
