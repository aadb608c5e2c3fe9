//! Azure Speech REST synthesizer.
//!
//! # API Reference
//!
//! - Endpoint: `POST https://{region}.tts.speech.microsoft.com/cognitiveservices/v1`
//! - Auth: `Ocp-Apim-Subscription-Key` header
//! - Body: SSML (`Content-Type: application/ssml+xml`)
//! - Output: selected with `X-Microsoft-OutputFormat`

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, info};
use uuid::Uuid;

use super::style::{build_ssml, style_for_sentiment};
use crate::config::{AzureAIServicesConfig, validate_region};
use crate::core::error::{ConfigError, ServiceError, ServiceResult};
use crate::core::tts::{SpeechSynthesizer, SynthesisOutcome};
use crate::core::types::Sentiment;
use crate::utils::validate_service_endpoint;

/// 48kHz, 192kbps mono MP3
pub const AZURE_TTS_OUTPUT_FORMAT: &str = "audio-48khz-192kbitrate-mono-mp3";

const SYNTHESIS_PATH: &str = "/cognitiveservices/v1";
const USER_AGENT: &str = concat!("sentiovoice/", env!("CARGO_PKG_VERSION"));

/// Regional REST endpoint for speech synthesis.
pub fn azure_tts_url(region: &str) -> String {
    format!("https://{region}.tts.speech.microsoft.com{SYNTHESIS_PATH}")
}

/// Speech synthesizer writing Azure TTS output into a local directory.
#[derive(Debug, Clone)]
pub struct AzureSpeechSynthesizer {
    client: reqwest::Client,
    url: String,
    api_key: String,
    voice: String,
    audio_dir: PathBuf,
}

impl AzureSpeechSynthesizer {
    /// Build a synthesizer for the configured region and voice.
    ///
    /// The audio directory is created lazily on the first synthesis.
    pub fn new(
        config: &AzureAIServicesConfig,
        audio_dir: impl Into<PathBuf>,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        if config.api_key.trim().is_empty() {
            return Err(ConfigError::invalid(
                "AZURE_AI_SERVICES_API_KEY",
                "must not be empty",
            ));
        }
        validate_region(&config.region)?;
        if config.voice.trim().is_empty() {
            return Err(ConfigError::invalid("AZURE_SPEECH_VOICE", "must not be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::Validation(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: azure_tts_url(&config.region),
            api_key: config.api_key.clone(),
            voice: config.voice.clone(),
            audio_dir: audio_dir.into(),
        })
    }

    /// Send requests to `{base_url}/cognitiveservices/v1` instead of the regional host.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        let base = validate_service_endpoint(base_url)
            .map_err(|e| ConfigError::invalid("speech base url", e.to_string()))?;
        self.url = format!("{base}{SYNTHESIS_PATH}");
        Ok(self)
    }

    async fn request(&self, ssml: String) -> Result<SynthesisOutcome, reqwest::Error> {
        let response = self
            .client
            .post(&self.url)
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", AZURE_TTS_OUTPUT_FORMAT)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .body(ssml)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        Ok(SynthesisOutcome::from_http(status, body))
    }

    fn failed_with(cause: impl std::fmt::Display) -> ServiceError {
        let err = ServiceError::SpeechSynthesis(format!("Speech synthesis failed: {cause}"));
        error!("{err}");
        err
    }
}

#[async_trait]
impl SpeechSynthesizer for AzureSpeechSynthesizer {
    async fn synthesize(&self, text: &str, sentiment: Sentiment) -> ServiceResult<String> {
        let style = style_for_sentiment(sentiment);
        let ssml = build_ssml(&self.voice, style, text);
        debug!(style, chars = text.len(), "Requesting speech synthesis");

        let audio = match self.request(ssml).await.map_err(Self::failed_with)? {
            SynthesisOutcome::Completed(audio) => audio,
            SynthesisOutcome::Canceled { reason } => {
                error!(%reason, "Speech synthesis canceled");
                return Err(ServiceError::SpeechSynthesis(
                    "Speech synthesis failed".to_string(),
                ));
            }
        };

        let filename = format!("{}.mp3", Uuid::now_v7());
        tokio::fs::create_dir_all(&self.audio_dir)
            .await
            .map_err(Self::failed_with)?;
        tokio::fs::write(self.audio_dir.join(&filename), &audio)
            .await
            .map_err(Self::failed_with)?;

        info!(%filename, bytes = audio.len(), style, "Speech synthesized");
        Ok(filename)
    }
}
