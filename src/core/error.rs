//! Error taxonomy for the feedback pipeline.
//!
//! Two kinds of failure exist:
//! - [`ServiceError`]: an external dependency failed or returned something unusable
//! - [`ConfigError`]: settings or the prompt template set could not be loaded
//!
//! No component recovers locally; errors travel unchanged to the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for calls into external services
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Failure of one of the three external services.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Sentiment analysis call failed or returned an unusable result
    #[error("{0}")]
    SentimentAnalysis(String),

    /// Chat completion call failed or returned an unusable result
    #[error("{0}")]
    ResponseGeneration(String),

    /// Speech synthesis did not complete or its output could not be stored
    #[error("{0}")]
    SpeechSynthesis(String),
}

impl ServiceError {
    /// Stable identifier for the failing service, used in error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::SentimentAnalysis(_) => "sentiment_analysis_failed",
            ServiceError::ResponseGeneration(_) => "response_generation_failed",
            ServiceError::SpeechSynthesis(_) => "speech_synthesis_failed",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ServiceError::SentimentAnalysis(msg)
            | ServiceError::ResponseGeneration(msg)
            | ServiceError::SpeechSynthesis(msg) => msg,
        }
    }
}

/// Failure to load or validate settings or prompt templates.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required setting is absent
    #[error("Missing required configuration value: {0}")]
    MissingVariable(String),

    /// A setting is present but cannot be used
    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: String, reason: String },

    /// A configuration file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file could not be parsed
    #[error("Failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    /// The prompt template set lacks a mandatory entry
    #[error("Prompt template set is missing the {0} template")]
    MissingTemplate(String),

    /// A client could not be constructed from otherwise valid settings
    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

impl ConfigError {
    pub(crate) fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
