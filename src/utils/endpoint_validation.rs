//! Endpoint validation for external service base URLs
//!
//! Service endpoints come from configuration and are joined with API paths at
//! request time. This module makes sure they:
//! - Parse as absolute URLs
//! - Use the HTTP or HTTPS scheme
//! - Name a host
//! - Carry no query string or fragment that path joining would corrupt

use thiserror::Error;
use url::Url;

/// Errors that can occur during endpoint validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndpointValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(#[from] url::ParseError),

    #[error("URL scheme must be http or https, got: {0}")]
    UnsupportedScheme(String),

    #[error("URL must have a host")]
    MissingHost,

    #[error("URL must not contain a query string or fragment")]
    UnexpectedQuery,
}

/// Validate a service base URL and return it without a trailing slash.
///
/// # Examples
/// ```
/// use sentiovoice_gateway::utils::validate_service_endpoint;
///
/// let base = validate_service_endpoint("https://example.openai.azure.com/").unwrap();
/// assert_eq!(base, "https://example.openai.azure.com");
/// assert!(validate_service_endpoint("ftp://example.com").is_err());
/// ```
pub fn validate_service_endpoint(endpoint: &str) -> Result<String, EndpointValidationError> {
    let url = Url::parse(endpoint.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(EndpointValidationError::UnsupportedScheme(other.to_string())),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(EndpointValidationError::MissingHost);
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(EndpointValidationError::UnexpectedQuery);
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}
