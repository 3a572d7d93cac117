use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::services::AppState;
use crate::storage::{StateStore, KEY_PAST_QUIZZES};

pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    // The only dependency worth probing here is the state store; the relay
    // is opaque and only matters at submission time.
    let (storage_status, all_healthy) = match state.store.read(KEY_PAST_QUIZZES).await {
        Ok(_) => (json!({"status": "healthy"}), true),
        Err(e) => (
            json!({"status": "unhealthy", "error": e.to_string()}),
            false,
        ),
    };

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(json!({
            "status": if all_healthy { "healthy" } else { "degraded" },
            "service": "quizforge-api",
            "version": env!("CARGO_PKG_VERSION"),
            "dependencies": { "storage": storage_status }
        })),
    )
}

pub mod courses;
pub mod drafts;
pub mod materials;
pub mod quizzes;
