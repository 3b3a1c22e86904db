use serde::Deserialize;

use super::param;
use crate::client::MoodleClient;
use crate::error::Error;
use crate::types::{AssignmentGrade, AssignmentInfo, AssignmentSubmission};

impl MoodleClient {
    /// List the assignments of the given courses, flattened to one record
    /// per assignment. Includes courses the calling token is not enrolled in.
    pub async fn get_assignments(&self, course_ids: &[i64]) -> Result<Vec<AssignmentInfo>, Error> {
        #[derive(Debug, Deserialize)]
        struct AssignRecord {
            id: i64,
            #[serde(default)]
            cmid: i64,
            #[serde(default)]
            name: String,
            #[serde(default)]
            duedate: i64,
        }

        #[derive(Debug, Deserialize)]
        struct CourseRecord {
            id: i64,
            #[serde(default)]
            shortname: String,
            #[serde(default)]
            fullname: String,
            #[serde(default)]
            assignments: Vec<AssignRecord>,
        }

        #[derive(Debug, Deserialize)]
        struct Response {
            #[serde(default)]
            courses: Vec<CourseRecord>,
        }

        let mut params = vec![param("includenotenrolledcourses", 1)];
        for (i, id) in course_ids.iter().enumerate() {
            params.push(param(format!("courseids[{i}]"), id));
        }

        let response: Response = self.call_json("mod_assign_get_assignments", &params).await?;

        let mut assignments = Vec::new();
        for course in response.courses {
            for a in course.assignments {
                assignments.push(AssignmentInfo {
                    id: a.id,
                    cm_id: a.cmid,
                    course_id: course.id,
                    course_code: course.shortname.clone(),
                    course_name: course.fullname.clone(),
                    name: a.name,
                    due_date: a.duedate,
                });
            }
        }
        Ok(assignments)
    }

    /// List the submissions made against an assignment.
    pub async fn get_assignment_submissions(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<AssignmentSubmission>, Error> {
        #[derive(Debug, Deserialize)]
        struct SubmissionRecord {
            id: i64,
            #[serde(default)]
            userid: i64,
            #[serde(default)]
            status: String,
            #[serde(default)]
            gradingstatus: String,
        }

        #[derive(Debug, Deserialize)]
        struct AssignRecord {
            #[serde(rename = "assignmentid")]
            id: i64,
            #[serde(default)]
            submissions: Vec<SubmissionRecord>,
        }

        #[derive(Debug, Deserialize)]
        struct Response {
            #[serde(default)]
            assignments: Vec<AssignRecord>,
        }

        let response: Response = self
            .call_json(
                "mod_assign_get_submissions",
                &[param("assignmentids[0]", assignment_id)],
            )
            .await?;

        let mut submissions = Vec::new();
        for assignment in response.assignments {
            for s in assignment.submissions {
                submissions.push(AssignmentSubmission {
                    assignment_id: assignment.id,
                    submission_id: s.id,
                    user_id: s.userid,
                    status: s.status,
                    grading_status: s.gradingstatus,
                });
            }
        }
        Ok(submissions)
    }

    /// List the grades recorded against an assignment.
    pub async fn get_assignment_grades(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<AssignmentGrade>, Error> {
        #[derive(Debug, Deserialize)]
        struct GradeRecord {
            #[serde(default)]
            userid: i64,
            #[serde(default)]
            grader: i64,
            #[serde(default)]
            grade: String,
            #[serde(default)]
            timemodified: i64,
        }

        #[derive(Debug, Deserialize)]
        struct AssignRecord {
            #[serde(rename = "assignmentid")]
            id: i64,
            #[serde(default)]
            grades: Vec<GradeRecord>,
        }

        #[derive(Debug, Deserialize)]
        struct Response {
            #[serde(default)]
            assignments: Vec<AssignRecord>,
        }

        let response: Response = self
            .call_json(
                "mod_assign_get_grades",
                &[param("assignmentids[0]", assignment_id)],
            )
            .await?;

        let mut grades = Vec::new();
        for assignment in response.assignments {
            for g in assignment.grades {
                grades.push(AssignmentGrade {
                    assignment_id: assignment.id,
                    user_id: g.userid,
                    grader: g.grader,
                    grade: g.grade,
                    time_modified: g.timemodified,
                });
            }
        }
        Ok(grades)
    }
}
