use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::QuestionTypeCount;

/// Read model for one quiz configuration session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftView {
    pub id: Uuid,
    pub course_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas_course_id: Option<String>,
    pub instructions: String,
    pub total_requested: u32,
    pub total_allocated: u32,
    pub question_counts: Vec<QuestionTypeCount>,
    pub selected_materials: Vec<String>,
    pub in_flight: bool,
}

#[derive(Debug, Deserialize)]
pub struct SetTotalRequest {
    pub total: u32,
}

#[derive(Debug, Deserialize)]
pub struct AdjustCountRequest {
    pub delta: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDraftRequest {
    pub course_id: Option<String>,
    pub canvas_course_id: Option<String>,
    pub instructions: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddCourseRequest {
    #[validate(length(min = 1, message = "Course code is required"))]
    pub code: String,
    #[validate(length(min = 1, message = "Course name is required"))]
    pub name: String,
}
