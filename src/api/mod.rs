mod assignments;
mod courses;
mod forums;
mod grades;
mod quizzes;
mod site;
mod users;

pub use site::SiteInfo;

/// Build one query parameter pair.
pub(crate) fn param(key: impl Into<String>, value: impl ToString) -> (String, String) {
    (key.into(), value.to_string())
}
