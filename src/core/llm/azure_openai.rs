//! Azure OpenAI chat completion client.
//!
//! # API Reference
//!
//! - Endpoint: `POST {endpoint}/openai/deployments/{deployment}/chat/completions?api-version={version}`
//! - Auth: `api-key` header
//! - Non-streaming; the first choice is used

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use url::Url;

use super::ResponseGenerator;
use crate::config::{AzureOpenAIConfig, validate_azure_openai};
use crate::core::error::{ConfigError, ServiceError, ServiceResult};
use crate::utils::validate_service_endpoint;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completion client for an Azure OpenAI deployment.
#[derive(Debug, Clone)]
pub struct AzureOpenAIChat {
    client: reqwest::Client,
    chat_url: Url,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl AzureOpenAIChat {
    pub fn new(config: &AzureOpenAIConfig, timeout: Duration) -> Result<Self, ConfigError> {
        validate_azure_openai(config)?;
        let endpoint = validate_service_endpoint(&config.endpoint)
            .map_err(|e| ConfigError::invalid("AZURE_OPENAI_ENDPOINT", e.to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::Validation(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            chat_url: chat_completions_url(&endpoint, &config.deployment, &config.api_version)?,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    fn failed(cause: impl std::fmt::Display) -> ServiceError {
        let err = ServiceError::ResponseGeneration(format!("LLM response generation failed: {cause}"));
        error!("{err}");
        err
    }
}

/// Deployment and API version are percent-encoded as a path segment and a query value.
fn chat_completions_url(
    endpoint: &str,
    deployment: &str,
    api_version: &str,
) -> Result<Url, ConfigError> {
    let mut url = Url::parse(endpoint)
        .map_err(|e| ConfigError::invalid("AZURE_OPENAI_ENDPOINT", e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| ConfigError::invalid("AZURE_OPENAI_ENDPOINT", "not a base URL"))?
        .pop_if_empty()
        .extend(["openai", "deployments", deployment, "chat", "completions"]);
    url.query_pairs_mut().append_pair("api-version", api_version);
    Ok(url)
}

#[async_trait]
impl ResponseGenerator for AzureOpenAIChat {
    async fn generate(&self, system_instruction: &str, prompt: &str) -> ServiceResult<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_instruction,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            stream: false,
        };

        let response = self
            .client
            .post(self.chat_url.clone())
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(Self::failed)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Self::failed(format!("HTTP {status}: {error_text}")));
        }

        let response: ChatResponse = response.json().await.map_err(Self::failed)?;
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Self::failed("no choices in response"))?;

        debug!(finish_reason = ?choice.finish_reason, "Chat completion received");

        let content = choice.message.content.unwrap_or_default();
        let content = content.trim();
        if content.is_empty() {
            return Err(Self::failed("empty completion"));
        }
        Ok(content.to_string())
    }
}
