use super::{AzureAIServicesConfig, AzureOpenAIConfig, ServerConfig};
use crate::core::ConfigError;
use crate::utils::validate_service_endpoint;

/// Validate the merged configuration as a whole.
pub(crate) fn validate_config(config: &ServerConfig) -> Result<(), ConfigError> {
    if config.port == 0 {
        return Err(ConfigError::invalid("PORT", "port must be non-zero"));
    }
    if config.request_timeout_seconds == 0 {
        return Err(ConfigError::invalid(
            "REQUEST_TIMEOUT_SECONDS",
            "timeout must be at least one second",
        ));
    }
    validate_azure_openai(&config.azure_openai)?;
    validate_azure_ai_services(&config.azure_ai_services)?;
    Ok(())
}

/// Validate Azure OpenAI settings.
///
/// Also called by the chat client constructor.
pub fn validate_azure_openai(config: &AzureOpenAIConfig) -> Result<(), ConfigError> {
    require_non_empty("AZURE_OPENAI_API_KEY", &config.api_key)?;
    require_non_empty("AZURE_OPENAI_DEPLOYMENT", &config.deployment)?;
    require_non_empty("AZURE_OPENAI_MODEL", &config.model)?;
    require_non_empty("AZURE_OPENAI_API_VERSION", &config.api_version)?;
    validate_service_endpoint(&config.endpoint)
        .map_err(|e| ConfigError::invalid("AZURE_OPENAI_ENDPOINT", e.to_string()))?;

    if !(0.0..=2.0).contains(&config.temperature) {
        return Err(ConfigError::invalid(
            "AZURE_OPENAI_TEMPERATURE",
            format!("{} is outside 0.0..=2.0", config.temperature),
        ));
    }
    if config.max_tokens == 0 {
        return Err(ConfigError::invalid(
            "AZURE_OPENAI_MAX_TOKENS",
            "must be greater than zero",
        ));
    }
    Ok(())
}

/// Validate Azure AI Services settings shared by the Language and Speech clients.
pub fn validate_azure_ai_services(config: &AzureAIServicesConfig) -> Result<(), ConfigError> {
    require_non_empty("AZURE_AI_SERVICES_API_KEY", &config.api_key)?;
    validate_service_endpoint(&config.endpoint)
        .map_err(|e| ConfigError::invalid("AZURE_AI_SERVICES_ENDPOINT", e.to_string()))?;
    validate_region(&config.region)?;
    require_non_empty("AZURE_SPEECH_VOICE", &config.voice)?;
    Ok(())
}

/// Azure regions are short lowercase identifiers such as `eastus` or `westeurope`.
pub(crate) fn validate_region(region: &str) -> Result<(), ConfigError> {
    require_non_empty("AZURE_AI_SERVICES_REGION", region)?;
    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    {
        return Err(ConfigError::invalid(
            "AZURE_AI_SERVICES_REGION",
            format!("'{region}' is not a valid Azure region name"),
        ));
    }
    Ok(())
}

fn require_non_empty(name: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::invalid(name, "must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&test_config()).is_ok());
    }

    #[test]
    fn test_temperature_out_of_range() {
        let mut config = test_config();
        config.azure_openai.temperature = 2.5;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("AZURE_OPENAI_TEMPERATURE"));
    }

    #[test]
    fn test_zero_max_tokens() {
        let mut config = test_config();
        config.azure_openai.max_tokens = 0;
        assert!(validate_azure_openai(&config.azure_openai).is_err());
    }

    #[test]
    fn test_bad_endpoint() {
        let mut config = test_config();
        config.azure_ai_services.endpoint = "lang.example.com".to_string();
        let err = validate_azure_ai_services(&config.azure_ai_services).unwrap_err();
        assert!(err.to_string().contains("AZURE_AI_SERVICES_ENDPOINT"));
    }

    #[test]
    fn test_region_validation() {
        assert!(validate_region("westeurope").is_ok());
        assert!(validate_region("eastus2").is_ok());
        assert!(validate_region("").is_err());
        assert!(validate_region("West Europe").is_err());
        assert!(validate_region("evil.com/").is_err());
    }

    #[test]
    fn test_zero_port() {
        let mut config = test_config();
        config.port = 0;
        assert!(validate_config(&config).is_err());
    }
}
