//! Configuration module for the SentioVoice gateway
//!
//! This module handles server configuration from various sources: .env files, YAML files,
//! and environment variables. Priority: YAML > ENV vars > .env values > defaults.
//! The configuration is split into logical submodules for maintainability.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//! - `merge`: Merging YAML and environment configurations
//! - `validation`: Configuration validation logic
//! - `utils`: Utility functions for configuration parsing
//!
//! # Example
//! ```rust,no_run
//! use sentiovoice_gateway::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable base
//! let config = ServerConfig::from_file(&PathBuf::from("config.yaml"))?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

mod env;
mod merge;
mod utils;
mod validation;
mod yaml;

pub use utils::redact;
pub use validation::{validate_azure_ai_services, validate_azure_openai};
pub(crate) use validation::validate_region;
pub use yaml::YamlConfig;

use crate::core::ConfigError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_AUDIO_PATH: &str = "audio";
pub const DEFAULT_PROMPT_PATH: &str = "prompts.yaml";
/// Neural voice that supports both the `excited` and `empathetic` styles
pub const DEFAULT_SPEECH_VOICE: &str = "en-US-AriaNeural";

/// Azure OpenAI chat completion settings
#[derive(Debug, Clone, PartialEq)]
pub struct AzureOpenAIConfig {
    pub api_key: String,
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com`
    pub endpoint: String,
    pub deployment: String,
    pub model: String,
    pub api_version: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Azure AI Services settings shared by the Language and Speech clients
#[derive(Debug, Clone, PartialEq)]
pub struct AzureAIServicesConfig {
    /// Multi-service subscription key
    pub api_key: String,
    /// Language resource endpoint used for sentiment analysis
    pub endpoint: String,
    /// Region of the Speech resource (e.g. "westeurope")
    pub region: String,
    /// Voice used for every synthesis
    pub voice: String,
}

impl Drop for AzureOpenAIConfig {
    fn drop(&mut self) {
        use zeroize::Zeroize;
        self.api_key.zeroize();
    }
}

impl Drop for AzureAIServicesConfig {
    fn drop(&mut self) {
        use zeroize::Zeroize;
        self.api_key.zeroize();
    }
}

/// Server configuration
///
/// Contains all configuration needed to run the gateway:
/// - Server settings (host, port, outbound request timeout)
/// - Azure OpenAI settings for response generation
/// - Azure AI Services settings for sentiment analysis and speech synthesis
/// - Storage locations (audio output directory, prompt template file)
/// - CORS settings for the companion front-end
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Timeout applied to every outbound call to an Azure service
    pub request_timeout_seconds: u64,

    pub azure_openai: AzureOpenAIConfig,
    pub azure_ai_services: AzureAIServicesConfig,

    /// Directory that receives synthesized `.mp3` files
    pub audio_path: PathBuf,
    /// YAML file holding the per-sentiment prompt templates
    pub prompt_path: PathBuf,

    /// CORS allowed origins (comma-separated list or "*" for all)
    /// Default: None (same-origin only)
    pub cors_allowed_origins: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables only
    ///
    /// The `.env` file is loaded by `main` before this is called, so its values are
    /// visible here as ordinary environment variables.
    ///
    /// # Errors
    /// Returns `ConfigError` if a required variable is missing, a numeric variable
    /// does not parse, or validation fails.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = merge::merge_config(env::EnvConfig::load()?, None)?;
        validation::validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a YAML file with environment variable base
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values
    /// 4. Default values
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    /// - A required value is missing from both sources
    /// - Configuration validation fails
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let yaml_config = yaml::YamlConfig::from_file(path)?;
        let config = merge::merge_config(env::EnvConfig::load()?, Some(yaml_config))?;
        validation::validate_config(&config)?;
        Ok(config)
    }

    /// Get the server address as a string
    ///
    /// Returns the address in the format "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Outbound request timeout as a `Duration`
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_seconds)
    }

    /// Human-readable summary with secrets redacted
    pub fn summary(&self) -> String {
        format!(
            "address: {}\n\
             request timeout: {}s\n\
             azure openai: endpoint={} deployment={} model={} api_version={} temperature={} max_tokens={} key={}\n\
             azure ai services: endpoint={} region={} voice={} key={}\n\
             audio path: {}\n\
             prompt path: {}\n\
             cors: {}",
            self.address(),
            self.request_timeout_seconds,
            self.azure_openai.endpoint,
            self.azure_openai.deployment,
            self.azure_openai.model,
            self.azure_openai.api_version,
            self.azure_openai.temperature,
            self.azure_openai.max_tokens,
            redact(&self.azure_openai.api_key),
            self.azure_ai_services.endpoint,
            self.azure_ai_services.region,
            self.azure_ai_services.voice,
            redact(&self.azure_ai_services.api_key),
            self.audio_path.display(),
            self.prompt_path.display(),
            self.cors_allowed_origins.as_deref().unwrap_or("same-origin"),
        )
    }
}

/// Helper function to create a test ServerConfig with valid values
#[cfg(test)]
pub(crate) fn test_config() -> ServerConfig {
    ServerConfig {
        host: "localhost".to_string(),
        port: 8000,
        request_timeout_seconds: 5,
        azure_openai: AzureOpenAIConfig {
            api_key: "test-openai-key".to_string(),
            endpoint: "https://oai.example.com".to_string(),
            deployment: "gpt-4o-mini".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_version: "2024-06-01".to_string(),
            temperature: 0.7,
            max_tokens: 256,
        },
        azure_ai_services: AzureAIServicesConfig {
            api_key: "test-services-key".to_string(),
            endpoint: "https://lang.example.com".to_string(),
            region: "westeurope".to_string(),
            voice: DEFAULT_SPEECH_VOICE.to_string(),
        },
        audio_path: PathBuf::from("audio"),
        prompt_path: PathBuf::from("prompts.yaml"),
        cors_allowed_origins: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env as std_env;
    use std::fs;
    use tempfile::TempDir;

    const ALL_VARS: &[&str] = &[
        "HOST",
        "PORT",
        "REQUEST_TIMEOUT_SECONDS",
        "AZURE_OPENAI_API_KEY",
        "AZURE_OPENAI_ENDPOINT",
        "AZURE_OPENAI_DEPLOYMENT",
        "AZURE_OPENAI_MODEL",
        "AZURE_OPENAI_API_VERSION",
        "AZURE_OPENAI_TEMPERATURE",
        "AZURE_OPENAI_MAX_TOKENS",
        "AZURE_AI_SERVICES_API_KEY",
        "AZURE_AI_SERVICES_ENDPOINT",
        "AZURE_AI_SERVICES_REGION",
        "AZURE_SPEECH_VOICE",
        "AUDIO_PATH",
        "PROMPT_PATH",
        "CORS_ALLOWED_ORIGINS",
    ];

    // Helper to clean up environment variables
    fn cleanup_env_vars() {
        unsafe {
            for name in ALL_VARS {
                std_env::remove_var(name);
            }
        }
    }

    fn set_required_env_vars() {
        unsafe {
            std_env::set_var("AZURE_OPENAI_API_KEY", "env-oai-key");
            std_env::set_var("AZURE_OPENAI_ENDPOINT", "https://oai.example.com");
            std_env::set_var("AZURE_OPENAI_DEPLOYMENT", "dep");
            std_env::set_var("AZURE_OPENAI_MODEL", "gpt-4o-mini");
            std_env::set_var("AZURE_OPENAI_API_VERSION", "2024-06-01");
            std_env::set_var("AZURE_OPENAI_TEMPERATURE", "0.7");
            std_env::set_var("AZURE_OPENAI_MAX_TOKENS", "256");
            std_env::set_var("AZURE_AI_SERVICES_API_KEY", "env-ais-key");
            std_env::set_var("AZURE_AI_SERVICES_ENDPOINT", "https://lang.example.com");
            std_env::set_var("AZURE_AI_SERVICES_REGION", "westeurope");
        }
    }

    #[test]
    fn test_address() {
        assert_eq!(test_config().address(), "localhost:8000");
    }

    #[test]
    fn test_summary_redacts_secrets() {
        let summary = test_config().summary();
        assert!(!summary.contains("test-openai-key"));
        assert!(!summary.contains("test-services-key"));
        assert!(summary.contains("-key"));
        assert!(summary.contains("westeurope"));
    }

    #[test]
    #[serial]
    fn test_from_env_success() {
        cleanup_env_vars();
        set_required_env_vars();
        unsafe {
            std_env::set_var("PORT", "9100");
            std_env::set_var("AUDIO_PATH", "/tmp/sv-audio");
        }

        let config = ServerConfig::from_env().unwrap();

        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, 9100);
        assert_eq!(config.azure_openai.temperature, 0.7);
        assert_eq!(config.azure_openai.max_tokens, 256);
        assert_eq!(config.azure_ai_services.region, "westeurope");
        assert_eq!(config.audio_path, PathBuf::from("/tmp/sv-audio"));
        assert_eq!(config.prompt_path, PathBuf::from(DEFAULT_PROMPT_PATH));

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_missing_required() {
        cleanup_env_vars();
        set_required_env_vars();
        unsafe {
            std_env::remove_var("AZURE_OPENAI_API_KEY");
        }

        let err = ServerConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::MissingVariable(ref v) if v == "AZURE_OPENAI_API_KEY"));

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_number() {
        cleanup_env_vars();
        set_required_env_vars();
        unsafe {
            std_env::set_var("AZURE_OPENAI_MAX_TOKENS", "lots");
        }

        let err = ServerConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("AZURE_OPENAI_MAX_TOKENS"));

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_file_yaml_overrides_env() {
        cleanup_env_vars();
        set_required_env_vars();
        unsafe {
            std_env::set_var("HOST", "0.0.0.0");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        let yaml_content = r#"
server:
  host: "127.0.0.1"
  port: 8080

azure_ai_services:
  region: "eastus"
  voice: "en-US-JennyNeural"
"#;
        fs::write(&config_path, yaml_content).unwrap();

        let config = ServerConfig::from_file(&config_path).unwrap();

        // YAML overrides ENV
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.azure_ai_services.region, "eastus");
        assert_eq!(config.azure_ai_services.voice, "en-US-JennyNeural");
        // ENV still supplies what YAML leaves out
        assert_eq!(config.azure_ai_services.api_key, "env-ais-key");

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_file_yaml_only() {
        cleanup_env_vars();

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        let yaml_content = r#"
azure_openai:
  api_key: "yaml-oai-key"
  endpoint: "https://oai.example.com"
  deployment: "dep"
  model: "gpt-4o-mini"
  api_version: "2024-06-01"
  temperature: 0.2
  max_tokens: 100

azure_ai_services:
  api_key: "yaml-ais-key"
  endpoint: "https://lang.example.com"
  region: "westus2"

storage:
  audio_path: "/tmp/yaml-audio"
  prompt_path: "/tmp/yaml-prompts.yaml"
"#;
        fs::write(&config_path, yaml_content).unwrap();

        let config = ServerConfig::from_file(&config_path).unwrap();

        assert_eq!(config.azure_openai.api_key, "yaml-oai-key");
        assert_eq!(config.azure_openai.max_tokens, 100);
        assert_eq!(config.azure_ai_services.region, "westus2");
        assert_eq!(config.audio_path, PathBuf::from("/tmp/yaml-audio"));
        assert_eq!(config.prompt_path, PathBuf::from("/tmp/yaml-prompts.yaml"));

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_file_missing_file() {
        cleanup_env_vars();

        let result = ServerConfig::from_file(Path::new("/nonexistent/config.yaml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to read"));

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_file_validation_failure() {
        cleanup_env_vars();
        set_required_env_vars();

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "azure_openai:\n  temperature: 3.5\n").unwrap();

        let err = ServerConfig::from_file(&config_path).unwrap_err();
        assert!(err.to_string().contains("AZURE_OPENAI_TEMPERATURE"));

        cleanup_env_vars();
    }
}
