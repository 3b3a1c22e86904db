mod assignment;
mod course;
mod forum;
mod grades;
mod membership;
mod module;
mod person;
mod quiz;
mod restriction;

pub use assignment::{AssignmentGrade, AssignmentInfo, AssignmentSubmission};
pub use course::{Course, CourseGroup, RoleInfo};
pub use forum::{Forum, ForumDiscussion};
pub use grades::{GradeItem, GradebookEntry};
pub use membership::Membership;
pub use module::CourseModule;
pub use person::{CoursePerson, CustomField, Person};
pub use quiz::Quiz;
pub use restriction::{Condition, Operator, Restriction};

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Map Moodle's epoch-second convention (0 = absent) to a `SystemTime`.
#[allow(clippy::cast_sign_loss)]
pub(crate) fn epoch_time(secs: i64) -> Option<SystemTime> {
    if secs <= 0 {
        None
    } else {
        Some(UNIX_EPOCH + Duration::from_secs(secs as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_zero_is_absent() {
        assert_eq!(epoch_time(0), None);
        assert_eq!(epoch_time(-1), None);
    }

    #[test]
    fn epoch_positive_maps_forward() {
        let t = epoch_time(1_541_682_000).unwrap();
        assert_eq!(
            t.duration_since(UNIX_EPOCH).unwrap(),
            Duration::from_secs(1_541_682_000)
        );
    }
}
