use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::QuestionType;

/// Body sent to the generation relay's `POST /generate-quiz`. Built once per
/// submission by the request builder and immutable afterwards; `file_data`
/// is always the bare base64 body, never a data URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequest {
    pub course_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas_course_id: Option<String>,
    pub materials: Vec<String>,
    pub question_counts: BTreeMap<QuestionType, u32>,
    pub instructions: String,
    pub file_data: String,
    pub file_name: String,
}

/// Success payload from the generation relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizResponse {
    pub quiz_id: String,
    pub course_id: String,
    pub materials: Vec<String>,
    pub question_counts: BTreeMap<QuestionType, u32>,
    #[serde(default)]
    pub instructions: String,
    pub created_at: DateTime<Utc>,
    pub quiz_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qti_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

/// Error payload the relay returns with a non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayErrorBody {
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// A generated quiz as committed to the quiz store. Created only by a
/// successful generation run; immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRecord {
    pub id: String,
    pub course_id: String,
    pub materials: Vec<String>,
    pub question_counts: BTreeMap<QuestionType, u32>,
    #[serde(default)]
    pub instructions: String,
    pub created_at: DateTime<Utc>,
    pub quiz_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qti_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl From<GenerateQuizResponse> for QuizRecord {
    fn from(response: GenerateQuizResponse) -> Self {
        Self {
            id: response.quiz_id,
            course_id: response.course_id,
            materials: response.materials,
            question_counts: response.question_counts,
            instructions: response.instructions,
            created_at: response.created_at,
            quiz_text: response.quiz_text,
            qti_url: response.qti_url,
            file_name: response.file_name,
        }
    }
}
