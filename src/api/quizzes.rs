use serde::Deserialize;

use super::param;
use crate::client::MoodleClient;
use crate::error::Error;
use crate::types::Quiz;

impl MoodleClient {
    /// List the quizzes of the given courses.
    pub async fn get_quizzes(&self, course_ids: &[i64]) -> Result<Vec<Quiz>, Error> {
        #[derive(Debug, Deserialize)]
        struct Response {
            #[serde(default)]
            quizzes: Vec<Quiz>,
        }

        let params: Vec<(String, String)> = course_ids
            .iter()
            .enumerate()
            .map(|(i, id)| param(format!("courseids[{i}]"), id))
            .collect();

        let response: Response = self
            .call_json("mod_quiz_get_quizzes_by_courses", &params)
            .await?;
        Ok(response.quizzes)
    }
}
