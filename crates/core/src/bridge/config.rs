//! Configuration for the bridge module.

use serde::{Deserialize, Serialize};

use crate::retry::RetryPolicy;

/// Configuration for the office-to-PDF bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Base URL of the conversion service (e.g. "http://converter:3000").
    pub service_url: String,

    /// Minimum byte count for a response body to count as a real PDF.
    #[serde(default = "default_min_valid_bytes")]
    pub min_valid_bytes: usize,

    /// Request timeout for one upload, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// How long to wait for the process-wide service lock, in seconds.
    #[serde(default = "default_lock_timeout")]
    pub lock_timeout_secs: u64,

    /// Retry budget and backoff. Defaults to 10 attempts, fixed 5 s apart.
    #[serde(default)]
    pub retry: RetryPolicy,
}

fn default_min_valid_bytes() -> usize {
    1_000
}

fn default_request_timeout() -> u64 {
    120
}

fn default_lock_timeout() -> u64 {
    300
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            service_url: "http://localhost:3000".to_string(),
            min_valid_bytes: default_min_valid_bytes(),
            request_timeout_secs: default_request_timeout(),
            lock_timeout_secs: default_lock_timeout(),
            retry: RetryPolicy::default(),
        }
    }
}

impl BridgeConfig {
    /// Creates a config pointing at the given service URL.
    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            service_url: service_url.into(),
            ..Default::default()
        }
    }

    /// Sets the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the lock acquisition timeout.
    pub fn with_lock_timeout(mut self, secs: u64) -> Self {
        self.lock_timeout_secs = secs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BridgeConfig::default();
        assert_eq!(config.min_valid_bytes, 1_000);
        assert_eq!(config.retry.max_attempts, 10);
        assert_eq!(config.retry.initial_delay_ms, 5_000);
        assert_eq!(config.retry.multiplier, 1.0);
    }

    #[test]
    fn test_config_toml_round_trip() {
        let toml = r#"
service_url = "http://converter:3000"
min_valid_bytes = 2000
"#;
        let config: BridgeConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.service_url, "http://converter:3000");
        assert_eq!(config.min_valid_bytes, 2_000);
        assert_eq!(config.lock_timeout_secs, 300);
    }
}
