use std::sync::Arc;

use tracing::info;

use crate::config::ServerConfig;
use crate::core::{
    AzureOpenAIChat, AzureSpeechSynthesizer, AzureTextAnalytics, ConfigError, FeedbackPipeline,
    PromptBuilder,
};

/// Application state shared by all handlers
///
/// Clients and prompt templates are built once here and reused for every
/// request.
pub struct AppState {
    pub config: ServerConfig,
    pub pipeline: FeedbackPipeline,
}

impl AppState {
    /// Build the Azure clients and load the prompt templates.
    ///
    /// # Errors
    /// Returns `ConfigError` when the prompt file cannot be loaded or a client
    /// cannot be constructed from the settings.
    pub async fn new(config: ServerConfig) -> Result<Arc<Self>, ConfigError> {
        let timeout = config.request_timeout();

        let prompts = Arc::new(PromptBuilder::from_file(&config.prompt_path)?);
        let analyzer = Arc::new(AzureTextAnalytics::new(&config.azure_ai_services, timeout)?);
        let generator = Arc::new(AzureOpenAIChat::new(&config.azure_openai, timeout)?);
        let synthesizer = Arc::new(AzureSpeechSynthesizer::new(
            &config.azure_ai_services,
            config.audio_path.clone(),
            timeout,
        )?);

        tokio::fs::create_dir_all(&config.audio_path)
            .await
            .map_err(|source| ConfigError::Io {
                path: config.audio_path.clone(),
                source,
            })?;

        info!(
            audio_path = %config.audio_path.display(),
            voice = %config.azure_ai_services.voice,
            "Application state initialized"
        );

        let pipeline = FeedbackPipeline::new(analyzer, prompts, generator, synthesizer);
        Ok(Self::with_pipeline(config, pipeline))
    }

    /// Assemble state around an already-built pipeline.
    pub fn with_pipeline(config: ServerConfig, pipeline: FeedbackPipeline) -> Arc<Self> {
        Arc::new(Self { config, pipeline })
    }
}
