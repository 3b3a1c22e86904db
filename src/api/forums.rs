use serde::Deserialize;

use super::param;
use crate::client::MoodleClient;
use crate::error::Error;
use crate::types::{Forum, ForumDiscussion};

impl MoodleClient {
    /// List the forums of the given courses.
    pub async fn get_forums(&self, course_ids: &[i64]) -> Result<Vec<Forum>, Error> {
        let params: Vec<(String, String)> = course_ids
            .iter()
            .enumerate()
            .map(|(i, id)| param(format!("courseids[{i}]"), id))
            .collect();
        self.call_json("mod_forum_get_forums_by_courses", &params)
            .await
    }

    /// List the discussion threads of a forum.
    pub async fn get_forum_discussions(
        &self,
        forum_id: i64,
    ) -> Result<Vec<ForumDiscussion>, Error> {
        #[derive(Debug, Deserialize)]
        struct Response {
            #[serde(default)]
            discussions: Vec<ForumDiscussion>,
        }

        let response: Response = self
            .call_json(
                "mod_forum_get_forum_discussions",
                &[param("forumid", forum_id)],
            )
            .await?;
        Ok(response.discussions)
    }
}
