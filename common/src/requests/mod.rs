use crate::model::student::StudentRecord;
use serde::{Deserialize, Serialize};

/// Payload of `POST /api/reports/generate`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerateReportRequest {
    #[serde(default = "default_format")]
    pub report_format: String,
    #[serde(default)]
    pub selected_students: Vec<i64>,
}

/// Payload of `POST /api/reports/generate-all`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerateAllRequest {
    #[serde(default = "default_format")]
    pub report_format: String,
}

/// Payload of `POST /api/reports/generate-edited`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerateEditedRequest {
    #[serde(default)]
    pub selected_students: Vec<i64>,
    #[serde(default)]
    pub report_title: String,
    #[serde(default)]
    pub report_content: String,
}

/// Payload of `POST /api/templates/fill`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FillTemplateRequest {
    #[serde(default)]
    pub selected_students: Vec<i64>,
}

/// Default title and content offered by the report editor.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EditorDraft {
    pub report_format: String,
    pub report_title: String,
    pub report_content: String,
    pub students: Vec<StudentRecord>,
}

/// Query string of `GET /api/students/search`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub name: String,
}

fn default_format() -> String {
    "detailed".to_string()
}
