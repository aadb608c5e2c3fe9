//! Terminal companion front-end.
//!
//! Submits feedback to a running server, shows the sentiment and reply, and
//! downloads the synthesized audio into a local cache directory.

mod audio_cache;

pub use audio_cache::AudioCache;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use bytes::Bytes;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::core::{FeedbackResult, Sentiment};
use crate::utils::is_valid_audio_filename;

pub const EMPTY_FEEDBACK_MESSAGE: &str = "Please enter some feedback before submitting.";
pub const PROCESSING_ERROR_MESSAGE: &str = "Error processing feedback. Please try again.";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {0}")]
    Status(reqwest::StatusCode),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid audio filename: {0}")]
    InvalidFilename(String),
}

/// Server reply as the client reads it.
///
/// Missing fields default to empty and unknown sentiment labels read as
/// neutral, so a partial reply still shows the generated text.
#[derive(Debug, Deserialize)]
struct FeedbackReply {
    #[serde(default)]
    feedback: String,
    #[serde(default)]
    sentiment: Option<String>,
    #[serde(default)]
    response: String,
    #[serde(default)]
    audio: Option<String>,
}

impl From<FeedbackReply> for FeedbackResult {
    fn from(reply: FeedbackReply) -> Self {
        FeedbackResult {
            feedback: reply.feedback,
            sentiment: Sentiment::from_service_label(
                reply.sentiment.as_deref().unwrap_or_default(),
            ),
            response: reply.response,
            audio: reply.audio.unwrap_or_default(),
        }
    }
}

/// HTTP client for the feedback server.
#[derive(Debug, Clone)]
pub struct FeedbackClient {
    client: reqwest::Client,
    api_url: String,
}

impl FeedbackClient {
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let api_url = crate::utils::validate_service_endpoint(api_url)
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_url })
    }

    /// Post feedback text and decode the result record.
    pub async fn post_feedback(&self, feedback: &str) -> Result<FeedbackResult, ClientError> {
        let response = self
            .client
            .post(format!("{}/feedback/", self.api_url))
            .json(&json!({ "feedback": feedback }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }
        let reply: FeedbackReply = response.json().await?;
        Ok(reply.into())
    }

    /// Download a synthesized audio file.
    ///
    /// Only bare `.mp3` names are requested.
    pub async fn get_audio(&self, filename: &str) -> Result<Bytes, ClientError> {
        if !is_valid_audio_filename(filename) {
            return Err(ClientError::InvalidFilename(filename.to_string()));
        }
        let response = self
            .client
            .get(format!("{}/audio/{}", self.api_url, filename))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }
        Ok(response.bytes().await?)
    }
}

/// What happened to the audio of a processed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioStatus {
    Saved(PathBuf),
    Missing,
    DownloadFailed,
}

/// Outcome of one `submit` run, rendered for the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    EmptyFeedback,
    Failed,
    Completed {
        result: FeedbackResult,
        audio: AudioStatus,
    },
}

/// `POSITIVE` becomes `Positive feedback.`
pub fn sentiment_banner(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => format!("{}{} feedback.", first.to_uppercase(), chars.as_str()),
        None => "Neutral feedback.".to_string(),
    }
}

impl fmt::Display for SubmitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitOutcome::EmptyFeedback => f.write_str(EMPTY_FEEDBACK_MESSAGE),
            SubmitOutcome::Failed => f.write_str(PROCESSING_ERROR_MESSAGE),
            SubmitOutcome::Completed { result, audio } => {
                writeln!(f, "{}", sentiment_banner(result.sentiment.as_str()))?;
                writeln!(f, "{}", result.response)?;
                match audio {
                    AudioStatus::Saved(path) => write!(f, "Audio saved to {}", path.display()),
                    AudioStatus::Missing => f.write_str("No audio file returned by the API."),
                    AudioStatus::DownloadFailed => {
                        f.write_str("Audio file could not be downloaded.")
                    }
                }
            }
        }
    }
}

/// Submit one piece of feedback and fetch its audio.
///
/// The cache is cleared before the request so it only ever holds the audio of
/// the latest submission.
pub async fn submit(client: &FeedbackClient, cache: &AudioCache, text: &str) -> SubmitOutcome {
    let text = text.trim();
    if text.is_empty() {
        return SubmitOutcome::EmptyFeedback;
    }

    if let Err(e) = cache.clear().await {
        warn!("Failed to clear audio cache {}: {}", cache.dir().display(), e);
    }

    let result = match client.post_feedback(text).await {
        Ok(result) => result,
        Err(e) => {
            error!("Feedback submission failed: {e}");
            return SubmitOutcome::Failed;
        }
    };

    let audio = if result.audio.is_empty() {
        AudioStatus::Missing
    } else if !is_valid_audio_filename(&result.audio) {
        error!("Server returned an invalid audio filename: {:?}", result.audio);
        AudioStatus::DownloadFailed
    } else {
        match client.get_audio(&result.audio).await {
            Ok(data) => match cache.store(&result.audio, &data).await {
                Ok(path) => AudioStatus::Saved(path),
                Err(e) => {
                    error!("Failed to store audio {}: {}", result.audio, e);
                    AudioStatus::DownloadFailed
                }
            },
            Err(e) => {
                error!("Failed to download audio {}: {}", result.audio, e);
                AudioStatus::DownloadFailed
            }
        }
    };

    SubmitOutcome::Completed { result, audio }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_banner() {
        assert_eq!(sentiment_banner("POSITIVE"), "Positive feedback.");
        assert_eq!(sentiment_banner("negative"), "Negative feedback.");
        assert_eq!(sentiment_banner("NEUTRAL"), "Neutral feedback.");
        assert_eq!(sentiment_banner(""), "Neutral feedback.");
    }

    #[test]
    fn test_client_rejects_bad_url() {
        assert!(matches!(
            FeedbackClient::new("localhost:8000", Duration::from_secs(1)),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_partial_reply_decodes() {
        let reply: FeedbackReply =
            serde_json::from_str(r#"{"sentiment": "mixed", "response": "Thanks"}"#).unwrap();
        let result = FeedbackResult::from(reply);
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.response, "Thanks");
        assert!(result.audio.is_empty());

        let reply: FeedbackReply =
            serde_json::from_str(r#"{"sentiment": "NEGATIVE", "response": "Sorry", "audio": null}"#)
                .unwrap();
        let result = FeedbackResult::from(reply);
        assert_eq!(result.sentiment, Sentiment::Negative);
        assert!(result.audio.is_empty());
    }

    #[tokio::test]
    async fn test_get_audio_rejects_unsafe_name() {
        let client = FeedbackClient::new("http://localhost:8000", Duration::from_secs(1)).unwrap();
        for name in ["../secret.mp3", "/tmp/pwned.mp3", "notes.txt"] {
            assert!(matches!(
                client.get_audio(name).await,
                Err(ClientError::InvalidFilename(_))
            ));
        }
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(
            SubmitOutcome::EmptyFeedback.to_string(),
            EMPTY_FEEDBACK_MESSAGE
        );
        assert_eq!(SubmitOutcome::Failed.to_string(), PROCESSING_ERROR_MESSAGE);
    }
}
