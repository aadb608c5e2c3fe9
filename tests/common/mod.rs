//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::{body::Body, body::to_bytes, http::Response};

use sentiovoice_gateway::{
    FeedbackPipeline, PromptBuilder, ResponseGenerator, Sentiment, SentimentAnalyzer,
    ServiceResult, SpeechSynthesizer,
    config::{AzureAIServicesConfig, AzureOpenAIConfig, ServerConfig},
};

pub const PROMPTS_YAML: &str = r#"
system_prompt: "You answer customer feedback in one short sentence."
llm_prompts:
  POSITIVE: "The customer is happy. Thank them for: {feedback_text}"
  NEGATIVE: "The customer is unhappy. Apologise for: {feedback_text}"
  NEUTRAL: "Acknowledge the feedback: {feedback_text}"
"#;

/// Helper function to create a test configuration
pub fn create_test_config(audio_path: &Path, prompt_path: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 8000,
        request_timeout_seconds: 5,
        azure_openai: AzureOpenAIConfig {
            api_key: "test-openai-key".to_string(),
            endpoint: "https://oai.example.com".to_string(),
            deployment: "feedback".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_version: "2024-06-01".to_string(),
            temperature: 0.7,
            max_tokens: 256,
        },
        azure_ai_services: AzureAIServicesConfig {
            api_key: "test-services-key".to_string(),
            endpoint: "https://lang.example.com".to_string(),
            region: "westeurope".to_string(),
            voice: "en-US-AriaNeural".to_string(),
        },
        audio_path: audio_path.to_path_buf(),
        prompt_path: prompt_path.to_path_buf(),
        cors_allowed_origins: None,
    }
}

pub fn write_prompts(dir: &Path) -> PathBuf {
    let path = dir.join("prompts.yaml");
    std::fs::write(&path, PROMPTS_YAML).unwrap();
    path
}

pub fn prompt_builder() -> Arc<PromptBuilder> {
    let templates = HashMap::from([
        ("POSITIVE".to_string(), "P: {feedback_text}".to_string()),
        ("NEGATIVE".to_string(), "N-: {feedback_text}".to_string()),
        ("NEUTRAL".to_string(), "N: {feedback_text}".to_string()),
    ]);
    Arc::new(PromptBuilder::new(templates).unwrap())
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Analyzer returning a fixed result
pub struct StubAnalyzer(pub ServiceResult<Sentiment>);

#[async_trait]
impl SentimentAnalyzer for StubAnalyzer {
    async fn analyze(&self, _text: &str) -> ServiceResult<Sentiment> {
        self.0.clone()
    }
}

/// Generator returning a fixed reply and counting calls
pub struct StubGenerator {
    pub reply: ServiceResult<String>,
    pub calls: AtomicUsize,
}

impl StubGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResponseGenerator for StubGenerator {
    async fn generate(&self, _system_instruction: &str, _prompt: &str) -> ServiceResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

/// Synthesizer returning a fixed filename and counting calls
pub struct StubSynthesizer {
    pub filename: ServiceResult<String>,
    pub calls: AtomicUsize,
}

impl StubSynthesizer {
    pub fn returning(filename: &str) -> Self {
        Self {
            filename: Ok(filename.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechSynthesizer for StubSynthesizer {
    async fn synthesize(&self, _text: &str, _sentiment: Sentiment) -> ServiceResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.filename.clone()
    }
}

pub fn stub_pipeline(
    analyzer: StubAnalyzer,
    generator: Arc<StubGenerator>,
    synthesizer: Arc<StubSynthesizer>,
) -> FeedbackPipeline {
    FeedbackPipeline::new(Arc::new(analyzer), prompt_builder(), generator, synthesizer)
}
