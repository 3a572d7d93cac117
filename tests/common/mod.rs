use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use quizforge_api::{config::Config, create_router, services::AppState, storage::MemoryStateStore};

pub fn test_config(relay_url: &str) -> Config {
    Config {
        bind_addr: "127.0.0.1:0".to_string(),
        relay_url: relay_url.to_string(),
        data_dir: "unused-in-tests".to_string(),
        question_total_min: 5,
        question_total_max: 50,
    }
}

pub async fn create_test_app(relay_url: &str) -> (Router, Arc<AppState>) {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let store = Arc::new(MemoryStateStore::new());
    let app_state = Arc::new(
        AppState::new(test_config(relay_url), store)
            .await
            .expect("Failed to initialize test app state"),
    );

    (create_router(app_state.clone()), app_state)
}

/// How the stub generation relay should answer.
#[derive(Debug, Clone, Copy)]
pub enum RelayBehavior {
    /// 200 echoing the request's metadata with a fixed quiz text.
    EchoSuccess,
    /// 500 with `{"error": "boom"}`.
    Error500,
    /// 200 with a body that is not JSON at all.
    Garbage,
}

/// Starts a stub relay on an ephemeral port and returns its base URL.
pub async fn spawn_stub_relay(behavior: RelayBehavior) -> String {
    let app = Router::new().route(
        "/generate-quiz",
        post(move |Json(body): Json<serde_json::Value>| async move {
            match behavior {
                RelayBehavior::EchoSuccess => {
                    let response = json!({
                        "quizId": format!("quiz-{}", Uuid::new_v4()),
                        "courseId": body["courseId"],
                        "materials": body["materials"],
                        "questionCounts": body["questionCounts"],
                        "instructions": body["instructions"],
                        "createdAt": Utc::now().to_rfc3339(),
                        "quizText": "1. What is the capital of France?\n*a) Paris\nb) Madrid",
                        "fileName": body["fileName"],
                    });
                    (StatusCode::OK, Json(response)).into_response()
                }
                RelayBehavior::Error500 => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "boom"})),
                )
                    .into_response(),
                RelayBehavior::Garbage => {
                    (StatusCode::OK, "<html>definitely not json</html>").into_response()
                }
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub relay");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

pub async fn request_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => {
            builder = builder.header("content-type", "application/json");
            builder.body(Body::from(body.to_string())).unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            json!({ "raw": String::from_utf8_lossy(&bytes).to_string() })
        })
    };
    (status, value)
}
