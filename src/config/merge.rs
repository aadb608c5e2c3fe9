use std::path::PathBuf;

use super::env::{self, EnvConfig};
use super::utils::{prefer, require};
use super::yaml::YamlConfig;
use super::{
    AzureAIServicesConfig, AzureOpenAIConfig, DEFAULT_AUDIO_PATH, DEFAULT_HOST, DEFAULT_PORT,
    DEFAULT_PROMPT_PATH, DEFAULT_REQUEST_TIMEOUT_SECONDS, DEFAULT_SPEECH_VOICE, ServerConfig,
};
use crate::core::ConfigError;

/// Merge environment values (base) with optional YAML overrides.
///
/// Required settings missing from both sources produce
/// `ConfigError::MissingVariable` naming the environment variable.
pub(crate) fn merge_config(
    env: EnvConfig,
    yaml: Option<YamlConfig>,
) -> Result<ServerConfig, ConfigError> {
    let yaml = yaml.unwrap_or_default();
    let server = yaml.server.unwrap_or_default();
    let openai = yaml.azure_openai.unwrap_or_default();
    let services = yaml.azure_ai_services.unwrap_or_default();
    let storage = yaml.storage.unwrap_or_default();
    let security = yaml.security.unwrap_or_default();

    let azure_openai = AzureOpenAIConfig {
        api_key: require(
            prefer(openai.api_key, env.openai_api_key),
            env::AZURE_OPENAI_API_KEY,
        )?,
        endpoint: require(
            prefer(openai.endpoint, env.openai_endpoint),
            env::AZURE_OPENAI_ENDPOINT,
        )?,
        deployment: require(
            prefer(openai.deployment, env.openai_deployment),
            env::AZURE_OPENAI_DEPLOYMENT,
        )?,
        model: require(
            prefer(openai.model, env.openai_model),
            env::AZURE_OPENAI_MODEL,
        )?,
        api_version: require(
            prefer(openai.api_version, env.openai_api_version),
            env::AZURE_OPENAI_API_VERSION,
        )?,
        temperature: require(
            prefer(openai.temperature, env.openai_temperature),
            env::AZURE_OPENAI_TEMPERATURE,
        )?,
        max_tokens: require(
            prefer(openai.max_tokens, env.openai_max_tokens),
            env::AZURE_OPENAI_MAX_TOKENS,
        )?,
    };

    let azure_ai_services = AzureAIServicesConfig {
        api_key: require(
            prefer(services.api_key, env.ai_services_api_key),
            env::AZURE_AI_SERVICES_API_KEY,
        )?,
        endpoint: require(
            prefer(services.endpoint, env.ai_services_endpoint),
            env::AZURE_AI_SERVICES_ENDPOINT,
        )?,
        region: require(
            prefer(services.region, env.ai_services_region),
            env::AZURE_AI_SERVICES_REGION,
        )?,
        voice: prefer(services.voice, env.speech_voice)
            .unwrap_or_else(|| DEFAULT_SPEECH_VOICE.to_string()),
    };

    Ok(ServerConfig {
        host: prefer(server.host, env.host).unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port: prefer(server.port, env.port).unwrap_or(DEFAULT_PORT),
        request_timeout_seconds: prefer(
            server.request_timeout_seconds,
            env.request_timeout_seconds,
        )
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECONDS),
        azure_openai,
        azure_ai_services,
        audio_path: PathBuf::from(
            prefer(storage.audio_path, env.audio_path)
                .unwrap_or_else(|| DEFAULT_AUDIO_PATH.to_string()),
        ),
        prompt_path: PathBuf::from(
            prefer(storage.prompt_path, env.prompt_path)
                .unwrap_or_else(|| DEFAULT_PROMPT_PATH.to_string()),
        ),
        cors_allowed_origins: prefer(security.cors_allowed_origins, env.cors_allowed_origins),
    })
}
