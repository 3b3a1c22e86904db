use serde::Deserialize;

/// One row of a course gradebook: a single grade item for a single learner.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GradeItem {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "itemname", default)]
    pub name: Option<String>,
    #[serde(rename = "itemtype", default)]
    pub item_type: String,
    #[serde(rename = "graderaw", default)]
    pub grade_raw: Option<f64>,
    #[serde(rename = "grademin", default)]
    pub grade_min: f64,
    #[serde(rename = "grademax", default)]
    pub grade_max: f64,
    #[serde(rename = "percentageformatted", default)]
    pub percentage: String,
}

/// One learner's gradebook for a course.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GradebookEntry {
    #[serde(rename = "userid")]
    pub user_id: i64,
    #[serde(rename = "userfullname", default)]
    pub user_fullname: String,
    #[serde(rename = "gradeitems", default)]
    pub items: Vec<GradeItem>,
}
