use serde::Deserialize;

use super::param;
use crate::client::MoodleClient;
use crate::error::Error;
use crate::types::{Course, CourseGroup, CourseModule, CoursePerson};

impl MoodleClient {
    /// Search courses by name or code, sorted by course code.
    pub async fn get_courses(&self, search: &str) -> Result<Vec<Course>, Error> {
        #[derive(Debug, Deserialize)]
        struct SearchResults {
            #[serde(default)]
            courses: Vec<Course>,
        }

        let results: SearchResults = self
            .call_json(
                "core_course_search_courses",
                &[
                    param("criterianame", "search"),
                    param("criteriavalue", search),
                ],
            )
            .await?;

        let mut courses = results.courses;
        courses.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(courses)
    }

    /// List the courses a user is enrolled in.
    pub async fn get_person_courses(&self, user_id: i64) -> Result<Vec<Course>, Error> {
        self.call_json(
            "core_enrol_get_users_courses",
            &[param("userid", user_id)],
        )
        .await
    }

    /// List the groups a course defines.
    pub async fn get_course_groups(&self, course_id: i64) -> Result<Vec<CourseGroup>, Error> {
        self.call_json(
            "core_group_get_course_groups",
            &[param("courseid", course_id)],
        )
        .await
    }

    /// List everyone enrolled in a course, with their roles and groups.
    pub async fn get_course_roles(&self, course_id: i64) -> Result<Vec<CoursePerson>, Error> {
        self.call_json(
            "core_enrol_get_enrolled_users",
            &[param("courseid", course_id)],
        )
        .await
    }

    /// Fetch one course module. Its `availability` field carries the
    /// JSON-encoded restriction rule, if any.
    pub async fn get_course_module(&self, cm_id: i64) -> Result<CourseModule, Error> {
        #[derive(Debug, Deserialize)]
        struct ModuleResponse {
            cm: CourseModule,
        }

        let response: ModuleResponse = self
            .call_json("core_course_get_course_module", &[param("cmid", cm_id)])
            .await?;
        Ok(response.cm)
    }

    /// Enrol a user into a course with the given role.
    pub async fn enrol(&self, user_id: i64, role_id: i64, course_id: i64) -> Result<(), Error> {
        self.call(
            "enrol_manual_enrol_users",
            &[
                param("enrolments[0][roleid]", role_id),
                param("enrolments[0][userid]", user_id),
                param("enrolments[0][courseid]", course_id),
            ],
        )
        .await?;
        Ok(())
    }

    /// Remove a user's enrolment from a course.
    ///
    /// The role id is sent but the server ignores it:
    /// https://tracker.moodle.org/browse/MDL-51152
    pub async fn unenrol(&self, user_id: i64, role_id: i64, course_id: i64) -> Result<(), Error> {
        self.call(
            "enrol_manual_unenrol_users",
            &[
                param("enrolments[0][roleid]", role_id),
                param("enrolments[0][userid]", user_id),
                param("enrolments[0][courseid]", course_id),
            ],
        )
        .await?;
        Ok(())
    }

    /// Add a user to a course group.
    pub async fn add_group_member(&self, user_id: i64, group_id: i64) -> Result<(), Error> {
        self.call_expect_null(
            "core_group_add_group_members",
            &[
                param("members[0][userid]", user_id),
                param("members[0][groupid]", group_id),
            ],
        )
        .await
    }

    /// Remove a user from a course group.
    pub async fn remove_group_member(&self, user_id: i64, group_id: i64) -> Result<(), Error> {
        self.call_expect_null(
            "core_group_delete_group_members",
            &[
                param("members[0][userid]", user_id),
                param("members[0][groupid]", group_id),
            ],
        )
        .await
    }
}
