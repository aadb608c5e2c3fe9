//! Sentiment classification.
//!
//! A classifier maps free text to one of the three [`Sentiment`] labels. The
//! only production implementation calls the Azure AI Language sentiment API.

mod azure;

pub use azure::{AzureTextAnalytics, TEXT_ANALYTICS_SENTIMENT_PATH};

use async_trait::async_trait;

use crate::core::error::ServiceResult;
use crate::core::types::Sentiment;

/// Classifies the sentiment of a piece of text.
///
/// Implementations make a single attempt per call and report every failure as
/// [`ServiceError::SentimentAnalysis`](crate::core::ServiceError::SentimentAnalysis).
#[async_trait]
pub trait SentimentAnalyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> ServiceResult<Sentiment>;
}
