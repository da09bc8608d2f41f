//! Environment configuration helpers
//!
//! Small typed readers over `std::env`. Empty values count as unset.

use std::str::FromStr;

use thiserror::Error;

use crate::crypto::from_base64;

/// Malformed or missing configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(String),

    #[error("{key} is invalid: {reason}")]
    Invalid { key: String, reason: String },
}

impl ConfigError {
    fn invalid(key: &str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Read a variable, treating empty strings as unset
pub fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Read and parse an optional variable
pub fn env_parse<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_var(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ConfigError::invalid(key, e.to_string()))
        })
        .transpose()
}

/// Read an optional boolean flag (`true/false`, `1/0`, `yes/no`, `on/off`)
pub fn env_flag(key: &str) -> Result<Option<bool>, ConfigError> {
    env_var(key)
        .map(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(ConfigError::invalid(key, format!("'{other}' is not a boolean"))),
        })
        .transpose()
}

/// Decode a base64 secret that must be exactly 32 bytes
pub fn decode_secret_32(key: &str, encoded: &str) -> Result<[u8; 32], ConfigError> {
    let bytes = from_base64(encoded.trim())
        .map_err(|e| ConfigError::invalid(key, format!("not base64: {e}")))?;

    <[u8; 32]>::try_from(bytes.as_slice()).map_err(|_| {
        ConfigError::invalid(key, format!("expected 32 bytes, got {}", bytes.len()))
    })
}
