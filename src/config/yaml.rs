use serde::Deserialize;
use std::path::Path;

use crate::core::ConfigError;

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration. Values present here
/// override the corresponding environment variables.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 8000
///   request_timeout_seconds: 30
///
/// azure_openai:
///   api_key: "your-openai-key"
///   endpoint: "https://my-resource.openai.azure.com"
///   deployment: "gpt-4o-mini"
///   model: "gpt-4o-mini"
///   api_version: "2024-06-01"
///   temperature: 0.7
///   max_tokens: 256
///
/// azure_ai_services:
///   api_key: "your-ai-services-key"
///   endpoint: "https://my-language.cognitiveservices.azure.com"
///   region: "westeurope"
///   voice: "en-US-AriaNeural"
///
/// storage:
///   audio_path: "/var/lib/sentiovoice/audio"
///   prompt_path: "/etc/sentiovoice/prompts.yaml"
///
/// security:
///   cors_allowed_origins: "http://localhost:8501"
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub azure_openai: Option<AzureOpenAIYaml>,
    pub azure_ai_services: Option<AzureAIServicesYaml>,
    pub storage: Option<StorageYaml>,
    pub security: Option<SecurityYaml>,
}

/// Server configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub request_timeout_seconds: Option<u64>,
}

/// Azure OpenAI chat completion settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AzureOpenAIYaml {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub deployment: Option<String>,
    pub model: Option<String>,
    pub api_version: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// Azure AI Services (Language + Speech) settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AzureAIServicesYaml {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub region: Option<String>,
    /// Neural voice used for every synthesis
    pub voice: Option<String>,
}

/// Filesystem locations from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct StorageYaml {
    pub audio_path: Option<String>,
    pub prompt_path: Option<String>,
}

/// Security configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SecurityYaml {
    /// CORS allowed origins (comma-separated list or "*" for all)
    pub cors_allowed_origins: Option<String>,
}

impl YamlConfig {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file cannot be read
    /// - The YAML is malformed
    /// - Fields have invalid types
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: format!("Failed to parse YAML config: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_config_full() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  port: 8080
  request_timeout_seconds: 10

azure_openai:
  api_key: "oai-key"
  endpoint: "https://oai.example.com"
  deployment: "dep"
  model: "gpt-4o-mini"
  api_version: "2024-06-01"
  temperature: 0.5
  max_tokens: 128

azure_ai_services:
  api_key: "ais-key"
  endpoint: "https://lang.example.com"
  region: "westeurope"
  voice: "en-US-JennyNeural"

storage:
  audio_path: "/tmp/audio"
  prompt_path: "/tmp/prompts.yaml"

security:
  cors_allowed_origins: "*"
"#;

        let config: YamlConfig = serde_yaml::from_str(yaml).unwrap();

        let server = config.server.unwrap();
        assert_eq!(server.host, Some("127.0.0.1".to_string()));
        assert_eq!(server.port, Some(8080));
        assert_eq!(server.request_timeout_seconds, Some(10));

        let openai = config.azure_openai.unwrap();
        assert_eq!(openai.api_key, Some("oai-key".to_string()));
        assert_eq!(openai.temperature, Some(0.5));
        assert_eq!(openai.max_tokens, Some(128));

        let services = config.azure_ai_services.unwrap();
        assert_eq!(services.region, Some("westeurope".to_string()));
        assert_eq!(services.voice, Some("en-US-JennyNeural".to_string()));

        let storage = config.storage.unwrap();
        assert_eq!(storage.audio_path, Some("/tmp/audio".to_string()));

        assert_eq!(
            config.security.unwrap().cors_allowed_origins,
            Some("*".to_string())
        );
    }

    #[test]
    fn test_yaml_config_partial() {
        let yaml = r#"
server:
  port: 9000
"#;
        let config: YamlConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.unwrap().port, Some(9000));
        assert!(config.azure_openai.is_none());
        assert!(config.storage.is_none());
    }

    #[test]
    fn test_yaml_config_empty() {
        let config: YamlConfig = serde_yaml::from_str("{}").unwrap();
        assert!(config.server.is_none());
        assert!(config.azure_ai_services.is_none());
    }

    #[test]
    fn test_yaml_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "storage:\n  audio_path: \"out\"\n").unwrap();

        let config = YamlConfig::from_file(&path).unwrap();
        assert_eq!(config.storage.unwrap().audio_path, Some("out".to_string()));
    }

    #[test]
    fn test_yaml_from_file_missing() {
        let result = YamlConfig::from_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_yaml_from_file_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("invalid.yaml");
        fs::write(&path, "server: [unclosed").unwrap();

        let err = YamlConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse YAML"));
    }
}
