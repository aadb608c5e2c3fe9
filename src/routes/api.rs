use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{api, audio, feedback};
use crate::state::AppState;
use std::sync::Arc;

/// Create the API router
///
/// Feedback and health routes answer with and without the trailing slash.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(api::root))
        .route("/feedback", post(feedback::submit_feedback))
        .route("/feedback/", post(feedback::submit_feedback))
        .route("/audio/{filename}", get(audio::download_audio))
        .route("/health", get(api::health_check))
        .route("/health/", get(api::health_check))
        .layer(TraceLayer::new_for_http())
}
