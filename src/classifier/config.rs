//! Configuration for the remote SDG classifier

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Classifier client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Classification endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Minimum spacing between outbound requests in milliseconds
    #[serde(default = "default_rate_limit_ms")]
    pub rate_limit_ms: u64,

    /// Maximum text length accepted by the remote API, enforced by callers
    #[serde(default = "default_max_text_len")]
    pub max_text_len: usize,

    /// Canned text sent by connection probes
    #[serde(default = "default_probe_text")]
    pub probe_text: String,
}

// Default value functions
fn default_endpoint() -> String {
    "https://aurora-sdg.labs.vu.nl/classifier/classify/aurora-sdg-multi".to_string()
}
fn default_timeout_ms() -> u64 { 10_000 }
fn default_rate_limit_ms() -> u64 { 200 }
fn default_max_text_len() -> usize { 5000 }
fn default_probe_text() -> String {
    "This is a test message to verify API connectivity.".to_string()
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
            rate_limit_ms: default_rate_limit_ms(),
            max_text_len: default_max_text_len(),
            probe_text: default_probe_text(),
        }
    }
}

impl ClassifierConfig {
    /// Load configuration overrides from environment variables
    pub fn from_env(mut self) -> Self {
        if let Ok(val) = std::env::var("SDG_CLASSIFIER_URL") {
            self.endpoint = val;
        }

        if let Ok(val) = std::env::var("SDG_CLASSIFIER_TIMEOUT_MS") {
            if let Ok(timeout) = val.parse() {
                self.timeout_ms = timeout;
            }
        }

        if let Ok(val) = std::env::var("SDG_CLASSIFIER_RATE_LIMIT_MS") {
            if let Ok(interval) = val.parse() {
                self.rate_limit_ms = interval;
            }
        }

        if let Ok(val) = std::env::var("SDG_CLASSIFIER_MAX_TEXT_LEN") {
            if let Ok(len) = val.parse() {
                self.max_text_len = len;
            }
        }

        self
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get rate-limit spacing as Duration
    pub fn rate_limit_interval(&self) -> Duration {
        Duration::from_millis(self.rate_limit_ms)
    }
}
