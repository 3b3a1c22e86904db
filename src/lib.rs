//! Client for the Moodle LMS JSON web-service API.
//!
//! Most of the crate is request/response glue around
//! `webservice/rest/server.php`: course search, enrolment, grading, forum
//! and quiz retrieval, user management, and password reset with an email
//! notification. The one algorithmic component is the access-restriction
//! evaluator: [`Restriction::is_restricted`] decides whether a course
//! participant is blocked from a course module based on group membership,
//! using Moodle's own compact operator/condition encoding.
//!
//! ```no_run
//! use moodle_client::MoodleClient;
//!
//! # async fn run() -> Result<(), moodle_client::Error> {
//! let api = MoodleClient::new(
//!     "https://moodle.example.com/moodle/",
//!     "a0092ba9a9f5b45cdd2f01d049595bfe91",
//! )?;
//!
//! // Is learner 7 blocked from course module 1155?
//! let module = api.get_course_module(1155).await?;
//! let roles = api.get_course_roles(module.course).await?;
//! if let (Some(rule), Some(person)) = (
//!     module.restriction()?,
//!     roles.iter().find(|p| p.id == 7),
//! ) {
//!     println!("restricted: {}", rule.is_restricted(&person.membership()));
//! }
//! # Ok(())
//! # }
//! ```

mod api;
mod client;
mod error;
mod fetch;
mod mail;
mod password;
mod types;

pub use api::SiteInfo;
pub use client::MoodleClient;
pub use error::Error;
pub use fetch::{FetchConfig, Fetcher};
pub use mail::{SmtpSettings, WelcomeEmail};
pub use password::{random_password, random_string};
pub use types::{
    AssignmentGrade, AssignmentInfo, AssignmentSubmission, Condition, Course, CourseGroup,
    CourseModule, CoursePerson, CustomField, Forum, ForumDiscussion, GradeItem, GradebookEntry,
    Membership, Operator, Person, Quiz, Restriction, RoleInfo,
};
