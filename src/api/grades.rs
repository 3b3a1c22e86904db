use serde::Deserialize;

use super::param;
use crate::client::MoodleClient;
use crate::error::Error;
use crate::types::GradebookEntry;

impl MoodleClient {
    /// Fetch the gradebook of a course, one entry per enrolled learner.
    pub async fn get_course_gradebook(
        &self,
        course_id: i64,
    ) -> Result<Vec<GradebookEntry>, Error> {
        #[derive(Debug, Deserialize)]
        struct Response {
            #[serde(rename = "usergrades", default)]
            user_grades: Vec<GradebookEntry>,
        }

        let response: Response = self
            .call_json(
                "gradereport_user_get_grade_items",
                &[param("courseid", course_id)],
            )
            .await?;
        Ok(response.user_grades)
    }
}
