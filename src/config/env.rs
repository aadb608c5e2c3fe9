//! Environment variable snapshot.
//!
//! Every value is optional at this stage; required settings are enforced once
//! environment and YAML values have been merged.

use super::utils::{env_parse, env_string};
use crate::core::ConfigError;

pub(crate) const HOST: &str = "HOST";
pub(crate) const PORT: &str = "PORT";
pub(crate) const REQUEST_TIMEOUT_SECONDS: &str = "REQUEST_TIMEOUT_SECONDS";

pub(crate) const AZURE_OPENAI_API_KEY: &str = "AZURE_OPENAI_API_KEY";
pub(crate) const AZURE_OPENAI_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
pub(crate) const AZURE_OPENAI_DEPLOYMENT: &str = "AZURE_OPENAI_DEPLOYMENT";
pub(crate) const AZURE_OPENAI_MODEL: &str = "AZURE_OPENAI_MODEL";
pub(crate) const AZURE_OPENAI_API_VERSION: &str = "AZURE_OPENAI_API_VERSION";
pub(crate) const AZURE_OPENAI_TEMPERATURE: &str = "AZURE_OPENAI_TEMPERATURE";
pub(crate) const AZURE_OPENAI_MAX_TOKENS: &str = "AZURE_OPENAI_MAX_TOKENS";

pub(crate) const AZURE_AI_SERVICES_API_KEY: &str = "AZURE_AI_SERVICES_API_KEY";
pub(crate) const AZURE_AI_SERVICES_ENDPOINT: &str = "AZURE_AI_SERVICES_ENDPOINT";
pub(crate) const AZURE_AI_SERVICES_REGION: &str = "AZURE_AI_SERVICES_REGION";
pub(crate) const AZURE_SPEECH_VOICE: &str = "AZURE_SPEECH_VOICE";

pub(crate) const AUDIO_PATH: &str = "AUDIO_PATH";
pub(crate) const PROMPT_PATH: &str = "PROMPT_PATH";
pub(crate) const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";

#[derive(Debug, Clone, Default)]
pub(crate) struct EnvConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub request_timeout_seconds: Option<u64>,

    pub openai_api_key: Option<String>,
    pub openai_endpoint: Option<String>,
    pub openai_deployment: Option<String>,
    pub openai_model: Option<String>,
    pub openai_api_version: Option<String>,
    pub openai_temperature: Option<f32>,
    pub openai_max_tokens: Option<u32>,

    pub ai_services_api_key: Option<String>,
    pub ai_services_endpoint: Option<String>,
    pub ai_services_region: Option<String>,
    pub speech_voice: Option<String>,

    pub audio_path: Option<String>,
    pub prompt_path: Option<String>,
    pub cors_allowed_origins: Option<String>,
}

impl EnvConfig {
    /// Snapshot the process environment.
    ///
    /// Fails only when a numeric variable is set to something unparsable.
    pub(crate) fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_string(HOST),
            port: env_parse(PORT)?,
            request_timeout_seconds: env_parse(REQUEST_TIMEOUT_SECONDS)?,

            openai_api_key: env_string(AZURE_OPENAI_API_KEY),
            openai_endpoint: env_string(AZURE_OPENAI_ENDPOINT),
            openai_deployment: env_string(AZURE_OPENAI_DEPLOYMENT),
            openai_model: env_string(AZURE_OPENAI_MODEL),
            openai_api_version: env_string(AZURE_OPENAI_API_VERSION),
            openai_temperature: env_parse(AZURE_OPENAI_TEMPERATURE)?,
            openai_max_tokens: env_parse(AZURE_OPENAI_MAX_TOKENS)?,

            ai_services_api_key: env_string(AZURE_AI_SERVICES_API_KEY),
            ai_services_endpoint: env_string(AZURE_AI_SERVICES_ENDPOINT),
            ai_services_region: env_string(AZURE_AI_SERVICES_REGION),
            speech_voice: env_string(AZURE_SPEECH_VOICE),

            audio_path: env_string(AUDIO_PATH),
            prompt_path: env_string(PROMPT_PATH),
            cors_allowed_origins: env_string(CORS_ALLOWED_ORIGINS),
        })
    }
}
