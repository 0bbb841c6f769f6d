//! Environment-based configuration
//!
//! The base origin for canonical links and the shortening service endpoint
//! and credential are supplied through environment variables, read once at
//! startup. There are no config files and nothing is persisted.

use std::env;
use thiserror::Error;

/// Environment variable holding the base origin for download links
pub const BASE_URL_VAR: &str = "LINKREEL_BASE_URL";
/// Environment variable holding the shortening service endpoint
pub const API_URL_VAR: &str = "LINKREEL_API_URL";
/// Environment variable holding the shortening service credential
pub const API_KEY_VAR: &str = "LINKREEL_API_KEY";

/// Errors that can occur while reading configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is missing or not unicode
    #[error("Missing required environment variable {0}")]
    MissingVar(&'static str),
}

/// Runtime configuration for link resolution
#[derive(Debug, Clone)]
pub struct Config {
    /// Origin prepended to canonical download paths
    pub base_url: String,
    /// Endpoint of the shortening service
    pub api_url: String,
    /// Credential passed to the shortening service
    pub api_key: String,
}

impl Config {
    /// Reads the configuration from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: require_var(BASE_URL_VAR)?,
            api_url: require_var(API_URL_VAR)?,
            api_key: require_var(API_KEY_VAR)?,
        })
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_variable_is_named_in_error() {
        let err = require_var("LINKREEL_TEST_UNSET_VARIABLE").unwrap_err();
        assert_eq!(err, ConfigError::MissingVar("LINKREEL_TEST_UNSET_VARIABLE"));
        assert_eq!(
            err.to_string(),
            "Missing required environment variable LINKREEL_TEST_UNSET_VARIABLE"
        );
    }
}
