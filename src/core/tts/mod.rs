//! Text-to-speech synthesis styled by sentiment.
//!
//! A synthesizer turns reply text into an `.mp3` file inside the audio
//! directory and returns the bare filename. The file is never removed by the
//! server; the download route serves it by that name.

pub mod azure;

pub use azure::{
    AZURE_TTS_OUTPUT_FORMAT, AzureSpeechSynthesizer, azure_tts_url, build_ssml, escape_xml,
    style_for_sentiment,
};

use async_trait::async_trait;
use bytes::Bytes;

use crate::core::error::ServiceResult;
use crate::core::types::Sentiment;

/// Result of one synthesis request as reported by the speech service.
///
/// Only `Completed` is a success. A completed result always carries audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisOutcome {
    Completed(Bytes),
    Canceled { reason: String },
}

impl SynthesisOutcome {
    /// Classify a finished HTTP exchange.
    pub fn from_http(status: reqwest::StatusCode, body: Bytes) -> Self {
        if !status.is_success() {
            let detail = String::from_utf8_lossy(&body);
            return SynthesisOutcome::Canceled {
                reason: format!("HTTP {status}: {}", detail.trim()),
            };
        }
        if body.is_empty() {
            return SynthesisOutcome::Canceled {
                reason: "no audio data returned".to_string(),
            };
        }
        SynthesisOutcome::Completed(body)
    }
}

/// Synthesizes reply text into an audio file.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Returns the filename (not the path) of the written `.mp3`.
    async fn synthesize(&self, text: &str, sentiment: Sentiment) -> ServiceResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_outcome_completed() {
        let outcome = SynthesisOutcome::from_http(StatusCode::OK, Bytes::from_static(b"ID3"));
        assert!(matches!(outcome, SynthesisOutcome::Completed(ref audio) if &audio[..] == b"ID3"));
    }

    #[test]
    fn test_outcome_empty_audio_is_canceled() {
        let outcome = SynthesisOutcome::from_http(StatusCode::OK, Bytes::new());
        assert!(matches!(outcome, SynthesisOutcome::Canceled { .. }));
    }

    #[test]
    fn test_outcome_error_status() {
        let outcome = SynthesisOutcome::from_http(
            StatusCode::BAD_REQUEST,
            Bytes::from_static(b"bad ssml"),
        );
        match outcome {
            SynthesisOutcome::Canceled { reason } => {
                assert!(reason.contains("400"));
                assert!(reason.contains("bad ssml"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
