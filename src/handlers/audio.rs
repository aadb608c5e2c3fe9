use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::io::ErrorKind;
use std::sync::Arc;
use tracing::{error, info};

use crate::errors::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::is_valid_audio_filename;

const CONTENT_TYPE: &str = "audio/mpeg";

/// Download a synthesized audio file by name
///
/// Any name that is not a bare `.mp3` filename is a 400.
pub async fn download_audio(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> AppResult<Response> {
    info!("Audio download requested - filename={}", filename);

    if !is_valid_audio_filename(&filename) {
        error!("Invalid filename for audio download: {}", filename);
        return Err(AppError::BadRequest("Invalid filename".to_string()));
    }

    let path = state.config.audio_path.join(&filename);

    let body: Bytes = match tokio::fs::read(&path).await {
        Ok(data) => data.into(),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("Audio file not found: {}", path.display());
            return Err(AppError::NotFound("File not found".to_string()));
        }
        Err(e) => {
            error!("Failed to read audio file {}: {}", path.display(), e);
            return Err(AppError::Internal(format!("Error serving file: {e}")));
        }
    };

    info!(
        "Audio download successful - filename={}, size={} bytes",
        filename,
        body.len()
    );

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE));
    if let Ok(len) = HeaderValue::from_str(&body.len().to_string()) {
        headers.insert(header::CONTENT_LENGTH, len);
    }
    if let Ok(disposition) =
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
    {
        headers.insert(header::CONTENT_DISPOSITION, disposition);
    }

    Ok((StatusCode::OK, headers, body).into_response())
}
