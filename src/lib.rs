use axum::{
    http::{header, Method},
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod domain;
pub mod handlers;
pub mod models;
pub mod services;
pub mod storage;

pub use config::Config;
pub use services::AppState;

pub fn create_router(app_state: std::sync::Arc<services::AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(tower_http::cors::Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/generate-quiz", post(handlers::quizzes::generate_oneshot))
        .route("/get-quiz-text", get(handlers::quizzes::get_quiz_text))
        .nest("/api/v1", api_routes())
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router<std::sync::Arc<services::AppState>> {
    Router::new()
        // Course catalog
        .route(
            "/courses",
            get(handlers::courses::list_courses).post(handlers::courses::add_course),
        )
        // Material library
        .route(
            "/materials",
            get(handlers::materials::list_materials).post(handlers::materials::upload_material),
        )
        // Quiz configuration sessions
        .route("/drafts", post(handlers::drafts::open_draft))
        .route(
            "/drafts/{id}",
            get(handlers::drafts::get_draft)
                .patch(handlers::drafts::update_draft)
                .delete(handlers::drafts::close_draft),
        )
        .route("/drafts/{id}/total", put(handlers::drafts::set_total))
        .route(
            "/drafts/{id}/counts/{type}",
            post(handlers::drafts::adjust_count),
        )
        .route(
            "/drafts/{id}/materials/{material_id}",
            post(handlers::drafts::toggle_material),
        )
        .route("/drafts/{id}/generate", post(handlers::drafts::generate))
        // Generated quizzes
        .route("/quizzes", get(handlers::quizzes::list_quizzes))
        .route("/quizzes/{id}", get(handlers::quizzes::get_quiz))
}
