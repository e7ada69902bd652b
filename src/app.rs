use crate::handlers;
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/healthz", get(handlers::health))
        .route("/api/countdown", get(handlers::get_countdown))
        .route("/api/countdown/stream", get(handlers::stream_countdown))
        .route("/api/share", get(handlers::get_share))
        .route("/api/themes", get(handlers::get_themes))
        .route("/api/presets", get(handlers::get_presets))
        .with_state(state)
}
