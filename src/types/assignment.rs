use std::time::SystemTime;

use super::epoch_time;

/// An assignment, flattened out of the per-course response shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentInfo {
    pub id: i64,
    pub cm_id: i64,
    pub course_id: i64,
    pub course_code: String,
    pub course_name: String,
    pub name: String,
    pub due_date: i64,
}

impl AssignmentInfo {
    #[must_use]
    pub fn due_time(&self) -> Option<SystemTime> {
        epoch_time(self.due_date)
    }
}

/// One learner's submission state for an assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentSubmission {
    pub assignment_id: i64,
    pub submission_id: i64,
    pub user_id: i64,
    pub status: String,
    pub grading_status: String,
}

/// One learner's grade for an assignment.
///
/// The grade is the raw string Moodle reports ("-1" while ungraded).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentGrade {
    pub assignment_id: i64,
    pub user_id: i64,
    pub grader: i64,
    pub grade: String,
    pub time_modified: i64,
}

impl AssignmentGrade {
    #[must_use]
    pub fn modified_time(&self) -> Option<SystemTime> {
        epoch_time(self.time_modified)
    }
}
