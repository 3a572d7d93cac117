use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::draft::{AdjustCountRequest, SetTotalRequest, UpdateDraftRequest};
use crate::models::QuestionType;
use crate::services::draft_service::DraftError;
use crate::services::generation_service::GenerationService;
use crate::services::AppState;

fn draft_error_response(e: DraftError) -> (StatusCode, String) {
    let status = match e {
        DraftError::NotFound => StatusCode::NOT_FOUND,
        DraftError::InFlight => StatusCode::CONFLICT,
    };
    (status, e.to_string())
}

pub async fn open_draft(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let view = state.drafts.open().await;
    tracing::info!("Opened quiz draft {}", view.id);
    (StatusCode::CREATED, Json(view))
}

pub async fn get_draft(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state
        .drafts
        .get(id)
        .await
        .map(Json)
        .map_err(draft_error_response)
}

pub async fn set_total(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetTotalRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state
        .drafts
        .set_total(id, req.total)
        .await
        .map(Json)
        .map_err(draft_error_response)
}

pub async fn adjust_count(
    State(state): State<Arc<AppState>>,
    Path((id, type_slug)): Path<(Uuid, String)>,
    Json(req): Json<AdjustCountRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let question_type: QuestionType = type_slug
        .parse()
        .map_err(|e: String| (StatusCode::BAD_REQUEST, e))?;

    state
        .drafts
        .adjust_count(id, question_type, req.delta)
        .await
        .map(Json)
        .map_err(draft_error_response)
}

pub async fn toggle_material(
    State(state): State<Arc<AppState>>,
    Path((id, material_id)): Path<(Uuid, String)>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state
        .drafts
        .toggle_material(id, &material_id)
        .await
        .map(Json)
        .map_err(draft_error_response)
}

pub async fn update_draft(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateDraftRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state
        .drafts
        .update(id, req)
        .await
        .map(Json)
        .map_err(draft_error_response)
}

pub async fn close_draft(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    state.drafts.close(id).await.map_err(draft_error_response)?;
    tracing::info!("Closed quiz draft {}", id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn generate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    tracing::info!("Generation requested for draft {}", id);

    let service = GenerationService::new(&state);
    match service.generate_from_draft(&state, id).await {
        Ok(record) => Ok((StatusCode::OK, Json(record))),
        Err(e) => {
            tracing::warn!("Generation failed for draft {}: {}", id, e);
            Err((e.status_code(), e.to_string()))
        }
    }
}
