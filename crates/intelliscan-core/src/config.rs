//! Configuration module
//!
//! Env-driven client configuration with code defaults. Everything here is
//! overridable per deployment; the compiled defaults match the production
//! service.

use std::env;

use crate::validation::MAX_SCAN_SIZE_BYTES;

const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Client configuration shared by the CLI and any embedding application.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub max_scan_size_bytes: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_scan_size_bytes: MAX_SCAN_SIZE_BYTES,
        }
    }
}

impl ClientConfig {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// Recognized variables: `INTELLISCAN_API_URL`,
    /// `INTELLISCAN_REQUEST_TIMEOUT_SECS`, `INTELLISCAN_MAX_SCAN_BYTES`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: env::var("INTELLISCAN_API_URL").unwrap_or(defaults.api_base_url),
            request_timeout_secs: env::var("INTELLISCAN_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            max_scan_size_bytes: env::var("INTELLISCAN_MAX_SCAN_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_scan_size_bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_limits() {
        let config = ClientConfig::default();
        assert_eq!(config.max_scan_size_bytes, 5 * 1024 * 1024);
        assert_eq!(config.request_timeout_secs, 60);
    }
}
