//! Transport-level error type.
//!
//! Every handler failure is converted into an [`AppError`], which renders a
//! JSON body with an `error` field and the matching status code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::core::ServiceError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// An external service failed while processing a request
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// Request body failed validation
    #[error("{0}")]
    Unprocessable(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Service(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            AppError::Service(err) => json!({
                "error": err.kind(),
                "message": err.message(),
            }),
            AppError::Internal(msg) => {
                error!("Internal error: {msg}");
                json!({ "error": msg })
            }
            AppError::BadRequest(msg) | AppError::NotFound(msg) | AppError::Unprocessable(msg) => {
                json!({ "error": msg })
            }
        };

        (status, Json(body)).into_response()
    }
}
