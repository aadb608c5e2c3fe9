use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use std::sync::Arc;
use tracing::{error, info};

use crate::core::{Feedback, FeedbackResult};
use crate::errors::{AppError, AppResult};
use crate::state::AppState;

/// Run the feedback pipeline for one submission
///
/// Body: `{"feedback": "<text>"}`. Blank text or an unreadable body is a 422.
pub async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Feedback>, JsonRejection>,
) -> AppResult<Json<FeedbackResult>> {
    let Json(feedback) = payload.map_err(|rejection| {
        info!("Rejected feedback payload: {}", rejection.body_text());
        AppError::Unprocessable(rejection.body_text())
    })?;

    info!("Feedback received - {} chars", feedback.text().len());

    let result = state.pipeline.process(&feedback).await.map_err(|e| {
        error!("Feedback processing failed ({}): {}", e.kind(), e);
        AppError::from(e)
    })?;

    info!(
        "Feedback processed - sentiment={}, audio={}",
        result.sentiment, result.audio
    );
    Ok(Json(result))
}
