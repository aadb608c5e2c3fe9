use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

use crate::core::{AzureOpenAIChat, AzureSpeechSynthesizer, AzureTextAnalytics};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub status: String,
}

/// Per-client health flags
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub azure_open_ai_client: bool,
    pub azure_text_analytics_client: bool,
    pub azure_speech_synthesis_client: bool,
}

impl HealthResponse {
    pub fn all_healthy(&self) -> bool {
        self.azure_open_ai_client
            && self.azure_text_analytics_client
            && self.azure_speech_synthesis_client
    }
}

pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "sentiovoice".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "OK".to_string(),
    })
}

/// Probe whether each Azure client can be constructed from the loaded settings.
///
/// No network call is made; this reports configuration health only.
pub fn probe_clients(state: &AppState) -> HealthResponse {
    let config = &state.config;
    let timeout = config.request_timeout();

    let azure_open_ai_client = match AzureOpenAIChat::new(&config.azure_openai, timeout) {
        Ok(_) => true,
        Err(e) => {
            warn!("Azure OpenAI client init failed: {e}");
            false
        }
    };
    let azure_text_analytics_client =
        match AzureTextAnalytics::new(&config.azure_ai_services, timeout) {
            Ok(_) => true,
            Err(e) => {
                warn!("Azure Text Analytics client init failed: {e}");
                false
            }
        };
    let azure_speech_synthesis_client = match AzureSpeechSynthesizer::new(
        &config.azure_ai_services,
        config.audio_path.clone(),
        timeout,
    ) {
        Ok(_) => true,
        Err(e) => {
            warn!("Azure Speech Synthesis client init failed: {e}");
            false
        }
    };

    HealthResponse {
        azure_open_ai_client,
        azure_text_analytics_client,
        azure_speech_synthesis_client,
    }
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Response {
    let health = probe_clients(&state);

    if health.all_healthy() {
        (StatusCode::OK, Json(health)).into_response()
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "message": "One or more Azure services are unavailable",
                "status": health,
            })),
        )
            .into_response()
    }
}
