//! Azure AI Language sentiment client.
//!
//! # API Reference
//!
//! - Endpoint: `POST {endpoint}/text/analytics/v3.1/sentiment`
//! - Auth: `Ocp-Apim-Subscription-Key` header
//! - Labels: positive, negative, neutral, mixed
//!
//! One document is sent per call, always with id `"0"`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::SentimentAnalyzer;
use crate::config::AzureAIServicesConfig;
use crate::core::error::{ConfigError, ServiceError, ServiceResult};
use crate::core::types::Sentiment;
use crate::utils::validate_service_endpoint;

/// Path of the sentiment operation below the Language resource endpoint
pub const TEXT_ANALYTICS_SENTIMENT_PATH: &str = "/text/analytics/v3.1/sentiment";

const DOCUMENT_ID: &str = "0";
const DOCUMENT_LANGUAGE: &str = "en";

#[derive(Debug, Serialize)]
struct SentimentRequest<'a> {
    documents: [RequestDocument<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestDocument<'a> {
    id: &'a str,
    language: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SentimentResponse {
    documents: Vec<DocumentSentiment>,
    #[serde(default)]
    errors: Vec<DocumentError>,
}

#[derive(Debug, Deserialize)]
struct DocumentSentiment {
    id: String,
    sentiment: String,
}

#[derive(Debug, Deserialize)]
struct DocumentError {
    id: String,
    #[serde(default)]
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Sentiment classifier backed by the Azure AI Language REST API.
#[derive(Debug, Clone)]
pub struct AzureTextAnalytics {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl AzureTextAnalytics {
    /// Build a client from the shared Azure AI Services settings.
    ///
    /// Only the key and endpoint matter here; the speech-specific fields are
    /// checked by [`AzureSpeechSynthesizer`](crate::core::AzureSpeechSynthesizer).
    pub fn new(config: &AzureAIServicesConfig, timeout: Duration) -> Result<Self, ConfigError> {
        if config.api_key.trim().is_empty() {
            return Err(ConfigError::invalid(
                "AZURE_AI_SERVICES_API_KEY",
                "must not be empty",
            ));
        }
        let endpoint = validate_service_endpoint(&config.endpoint)
            .map_err(|e| ConfigError::invalid("AZURE_AI_SERVICES_ENDPOINT", e.to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::Validation(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: format!("{endpoint}{TEXT_ANALYTICS_SENTIMENT_PATH}"),
            api_key: config.api_key.clone(),
        })
    }

    fn request_failed(cause: impl std::fmt::Display) -> ServiceError {
        let err = ServiceError::SentimentAnalysis(format!("Text Analytics API error: {cause}"));
        error!("{err}");
        err
    }

    fn analysis_failed(cause: impl std::fmt::Display) -> ServiceError {
        let err = ServiceError::SentimentAnalysis(format!("Sentiment analysis failed: {cause}"));
        error!("{err}");
        err
    }
}

#[async_trait]
impl SentimentAnalyzer for AzureTextAnalytics {
    async fn analyze(&self, text: &str) -> ServiceResult<Sentiment> {
        let body = SentimentRequest {
            documents: [RequestDocument {
                id: DOCUMENT_ID,
                language: DOCUMENT_LANGUAGE,
                text,
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(Self::request_failed)?;

        let status = response.status();
        let raw = response.text().await.map_err(Self::request_failed)?;
        if !status.is_success() {
            return Err(Self::request_failed(format!("status {status}: {raw}")));
        }
        debug!(bytes = raw.len(), "Text Analytics response received");

        let parsed: SentimentResponse = serde_json::from_str(&raw).map_err(Self::analysis_failed)?;

        if let Some(doc_error) = parsed.errors.iter().find(|e| e.id == DOCUMENT_ID) {
            if let Some(detail) = &doc_error.error {
                error!(code = %detail.code, detail = %detail.message, "Text Analytics document error");
            }
            return Err(ServiceError::SentimentAnalysis(
                "Text Analytics API error".to_string(),
            ));
        }

        let document = parsed
            .documents
            .into_iter()
            .find(|d| d.id == DOCUMENT_ID)
            .ok_or_else(|| Self::analysis_failed("no result for the submitted document"))?;

        Ok(Sentiment::from_service_label(&document.sentiment))
    }
}
