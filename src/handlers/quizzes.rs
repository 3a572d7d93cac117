use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::models::quiz::GenerateQuizRequest;
use crate::services::generation_service::GenerationService;
use crate::services::AppState;

pub async fn list_quizzes(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.quizzes.list().await)
}

pub async fn get_quiz(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    match state.quizzes.find_by_id(&id).await {
        Some(record) => Ok(Json(record)),
        None => Err((StatusCode::NOT_FOUND, "Quiz not found".to_string())),
    }
}

#[derive(Debug, Deserialize)]
pub struct QuizTextParams {
    pub id: Option<String>,
}

/// The viewer's text lookup: `GET /get-quiz-text?id={quizId}`.
pub async fn get_quiz_text(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QuizTextParams>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let id = params.id.filter(|id| !id.is_empty()).ok_or((
        StatusCode::BAD_REQUEST,
        Json(json!({"error": "Quiz ID is required"})),
    ))?;

    match state.quizzes.find_by_id(&id).await {
        Some(record) => Ok(Json(json!({
            "quizId": record.id,
            "quizText": record.quiz_text,
        }))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Quiz not found"})),
        )),
    }
}

/// One-shot generation taking the full wire body. Runs the same
/// orchestration as the draft flow.
pub async fn generate_oneshot(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateQuizRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    tracing::info!(
        "One-shot generation request: course={}, file={}",
        body.course_id,
        body.file_name
    );

    let service = GenerationService::new(&state);
    match service.generate_from_request(body, &state.quizzes).await {
        Ok(record) => Ok((StatusCode::OK, Json(record))),
        Err(e) => {
            tracing::warn!("One-shot generation failed: {}", e);
            Err((e.status_code(), Json(json!({"error": e.to_string()}))))
        }
    }
}
