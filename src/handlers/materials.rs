use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

use crate::models::material::UploadMaterialRequest;
use crate::services::AppState;

pub async fn list_materials(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.materials.list().await)
}

pub async fn upload_material(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UploadMaterialRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if let Err(e) = req.validate() {
        return Err((StatusCode::UNPROCESSABLE_ENTITY, e.to_string()));
    }

    tracing::info!("Uploading material: {}", req.name);
    match state.materials.add(req).await {
        Ok(record) => Ok((StatusCode::CREATED, Json(record))),
        Err(e) => {
            tracing::error!("Failed to persist uploaded material: {}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}
