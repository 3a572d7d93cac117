use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

use crate::models::draft::AddCourseRequest;
use crate::services::AppState;

pub async fn list_courses(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.catalog.list().await)
}

pub async fn add_course(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddCourseRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if let Err(e) = req.validate() {
        return Err((StatusCode::UNPROCESSABLE_ENTITY, e.to_string()));
    }

    match state.catalog.add_course(&req.code, &req.name).await {
        Ok(Some(course)) => Ok((StatusCode::CREATED, Json(course))),
        Ok(None) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            "Course code and name are required".to_string(),
        )),
        Err(e) => {
            tracing::error!("Failed to persist course catalog: {}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}
