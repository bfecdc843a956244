//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::errors::ErrorOptions;
use crate::request::DEFAULT_MAX_BODY_BYTES;

/// Root configuration for an API built on this toolkit.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Bind address for the server (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Cap on request body size in bytes.
    pub max_body_bytes: usize,

    /// Whether 500 responses name their underlying cause.
    pub include_cause_in_message: bool,

    /// Default tracing filter when RUST_LOG is unset.
    pub log_level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            include_cause_in_message: true,
            log_level: "info".to_string(),
        }
    }
}

impl ApiConfig {
    /// Error-catalog options derived from this configuration.
    pub fn error_options(&self) -> ErrorOptions {
        ErrorOptions {
            include_cause_in_message: self.include_cause_in_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert_eq!(config.max_body_bytes, 1_048_576);
        assert!(config.include_cause_in_message);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ApiConfig = toml::from_str("bind_address = \"127.0.0.1:9000\"").unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:9000");
        assert_eq!(config.max_body_bytes, 1_048_576);
    }
}
