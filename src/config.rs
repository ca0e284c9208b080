//! Layered configuration loading

use crate::classifier::ClassifierConfig;
use crate::error::{BadgeError, Result};
use crate::panels::SidebarConfig;
use serde::{Deserialize, Serialize};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

/// Top-level configuration, one section per component
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub classifier: ClassifierConfig,

    #[serde(default)]
    pub sidebar: SidebarConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load from an optional `sdg-badge.toml` next to the process, overlaid
    /// with `SDG_BADGE_*` environment variables (`__` as section separator)
    pub fn load() -> Result<Self> {
        let source = config::Config::builder()
            .add_source(config::File::with_name("sdg-badge").required(false))
            .add_source(config::Environment::with_prefix("SDG_BADGE").separator("__"))
            .build()
            .map_err(|e| BadgeError::Config(e.to_string()))?;

        source
            .try_deserialize()
            .map_err(|e| BadgeError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sections() {
        let config = Config::default();
        assert!(config.classifier.endpoint.contains("aurora-sdg"));
        assert_eq!(config.sidebar.poll_interval_secs, 30);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_toml_sections_deserialize() {
        let raw = r#"
            [classifier]
            endpoint = "http://localhost:9000/classify"
            rate_limit_ms = 100

            [sidebar]
            poll_interval_secs = 5

            [logging]
            level = "debug"
        "#;

        let config: Config = toml_from_str(raw);
        assert_eq!(config.classifier.endpoint, "http://localhost:9000/classify");
        assert_eq!(config.classifier.rate_limit_ms, 100);
        assert_eq!(config.sidebar.poll_interval_secs, 5);
        assert_eq!(config.logging.level, "debug");
    }

    fn toml_from_str(raw: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }
}
