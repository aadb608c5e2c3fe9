//! Request and result types shared by the feedback pipeline.
//!
//! # Sentiment labels
//!
//! The external sentiment service may report more labels than this system
//! distinguishes (for example `mixed`). Everything that is not positive or
//! negative collapses to [`Sentiment::Neutral`].

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Sentiment label assigned to a piece of feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Normalizes a raw service label.
    ///
    /// The label is upper-cased first; only `POSITIVE` and `NEGATIVE` survive,
    /// any other value (including `MIXED` or an empty string) becomes `Neutral`.
    pub fn from_service_label(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "POSITIVE" => Sentiment::Positive,
            "NEGATIVE" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }

    /// Canonical upper-case label, also used as the prompt template key.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Negative => "NEGATIVE",
            Sentiment::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when feedback text fails boundary validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Feedback must be a non-empty string")]
pub struct EmptyFeedback;

/// A single feedback submission.
///
/// Constructed only through [`Feedback::new`] or deserialization, both of which
/// reject empty or whitespace-only text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    feedback: String,
}

impl Feedback {
    pub fn new(text: impl Into<String>) -> Result<Self, EmptyFeedback> {
        let feedback = text.into();
        if feedback.trim().is_empty() {
            return Err(EmptyFeedback);
        }
        Ok(Self { feedback })
    }

    pub fn text(&self) -> &str {
        &self.feedback
    }
}

impl<'de> Deserialize<'de> for Feedback {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            feedback: String,
        }

        let raw = Raw::deserialize(deserializer)?;
        Feedback::new(raw.feedback).map_err(serde::de::Error::custom)
    }
}

/// The four artifacts produced for one feedback submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackResult {
    /// Original feedback text, unchanged
    pub feedback: String,
    /// Normalized sentiment label
    pub sentiment: Sentiment,
    /// Generated reply text
    pub response: String,
    /// Filename of the synthesized audio inside the audio directory
    pub audio: String,
}
