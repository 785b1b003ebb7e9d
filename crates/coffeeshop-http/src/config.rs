//! Pipeline configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use coffeeshop_core::error::{Error, InvalidInputError};
use coffeeshop_core::ApiUrl;

/// Base address used when none is configured.
pub const DEFAULT_BASE_ADDRESS: &str = "http://localhost:5001";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Fixed settings for an [`ApiClient`](crate::ApiClient).
///
/// Deserializes from `{ "baseAddress": ..., "timeoutMs": ... }`; both fields
/// are optional and fall back to the defaults above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiConfig {
    #[serde(alias = "base_address")]
    pub base_address: ApiUrl,
    #[serde(alias = "timeout_ms")]
    pub timeout_ms: u64,
}

impl ApiConfig {
    /// Create a configuration for the given base address with the default timeout.
    pub fn new(base_address: ApiUrl) -> Self {
        Self {
            base_address,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Parse and validate a base address.
    pub fn from_address(address: &str) -> Result<Self, Error> {
        Ok(Self::new(ApiUrl::new(address)?))
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), Error> {
        if self.timeout_ms == 0 {
            return Err(InvalidInputError::Field {
                field: "timeout_ms",
                reason: "must be greater than zero".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(ApiUrl::new(DEFAULT_BASE_ADDRESS).expect("default API address is valid"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_backend() {
        let config = ApiConfig::default();
        assert_eq!(config.base_address.host(), Some("localhost"));
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn deserializes_camel_case_options() {
        let config: ApiConfig = serde_json::from_str(
            r#"{"baseAddress": "https://coffee.example.com", "timeoutMs": 2500}"#,
        )
        .unwrap();
        assert_eq!(config.base_address.host(), Some("coffee.example.com"));
        assert_eq!(config.timeout_ms, 2500);
    }

    #[test]
    fn missing_options_use_defaults() {
        let config: ApiConfig = serde_json::from_str(r#"{"timeout_ms": 500}"#).unwrap();
        assert_eq!(config.base_address.as_str(), "http://localhost:5001/");
        assert_eq!(config.timeout_ms, 500);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(ApiConfig::default().with_timeout_ms(0).validate().is_err());
    }
}
