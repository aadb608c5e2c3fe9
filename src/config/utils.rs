use std::env;
use std::str::FromStr;

use crate::core::ConfigError;

/// Read an environment variable, treating empty values as unset.
pub(crate) fn env_string(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read and parse an environment variable.
///
/// Returns `Ok(None)` when the variable is unset and an `InvalidValue` error
/// when it is set but does not parse.
pub(crate) fn env_parse<T>(name: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_string(name) {
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::invalid(name, format!("'{raw}': {e}"))),
        None => Ok(None),
    }
}

/// Pick the YAML value when present, otherwise the environment value.
pub(crate) fn prefer<T>(yaml: Option<T>, env: Option<T>) -> Option<T> {
    yaml.or(env)
}

/// Unwrap a required setting or report the environment variable that supplies it.
pub(crate) fn require<T>(value: Option<T>, env_name: &str) -> Result<T, ConfigError> {
    value.ok_or_else(|| ConfigError::MissingVariable(env_name.to_string()))
}

/// Mask a secret for display, keeping only the last four characters.
pub fn redact(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}
