//! Main configuration loading and validation.

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use super::display::DisplayConfig;
use super::logging::LoggingConfig;
use super::store::{StoreConfig, STORE_URL_ENV};
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from a TOML string.
    ///
    /// `STOCKLEDGER_STORE_URL` overrides `store.url` when set.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Defaults plus environment overrides, used when no config file exists.
    ///
    /// Not validated: commands that never reach the store still work.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(STORE_URL_ENV) {
            if !url.trim().is_empty() {
                self.store.url = url.trim().to_string();
            }
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        self.store.base_url()?;
        if self.store.collection.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "store.collection",
            }
            .into());
        }
        if self.store.collection.contains('/') {
            return Err(ConfigError::InvalidValue {
                field: "store.collection",
                reason: "must be a single path segment".to_string(),
            }
            .into());
        }
        if self.store.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "store.timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.store.connect_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "store.connect_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.store.retry_max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "store.retry_max_attempts",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "logging.format",
                    reason: format!("expected pretty or json, got '{other}'"),
                }
                .into())
            }
        }
        Ok(())
    }
}

impl StoreConfig {
    /// Parsed base URL of the document store.
    pub fn base_url(&self) -> Result<Url> {
        let raw = self.url.trim();
        if raw.is_empty() {
            return Err(ConfigError::MissingField { field: "store.url" }.into());
        }
        let url = Url::parse(raw).map_err(|e| ConfigError::InvalidValue {
            field: "store.url",
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "store.url",
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }
            .into());
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Market, SortDirection, SortKey};
    use crate::error::Error;

    const MINIMAL: &str = r#"
[store]
url = "https://ledger.example.com"
"#;

    #[test]
    fn minimal_config_fills_defaults() {
        let config = Config::parse_toml(MINIMAL).unwrap();
        assert_eq!(config.store.collection, "trades");
        assert_eq!(config.store.timeout_ms, 10_000);
        assert_eq!(config.store.retry_max_attempts, 2);
        assert_eq!(config.display.market, Market::Tw);
        assert_eq!(config.display.sort, SortKey::Date);
        assert_eq!(config.display.direction, SortDirection::Desc);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn parses_display_section() {
        let toml = r#"
[store]
url = "https://ledger.example.com"

[display]
market = "US"
sort = "profit-percent"
direction = "asc"
"#;
        let config = Config::parse_toml(toml).unwrap();
        assert_eq!(config.display.market, Market::Us);
        assert_eq!(config.display.sort, SortKey::ProfitPercent);
        assert_eq!(config.display.direction, SortDirection::Asc);
    }

    #[test]
    fn rejects_zero_timeout() {
        let toml = r#"
[store]
url = "https://ledger.example.com"
timeout_ms = 0
"#;
        let err = Config::parse_toml(toml).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "store.timeout_ms",
                ..
            })
        ));
    }

    #[test]
    fn rejects_non_http_url() {
        let config = StoreConfig {
            url: "ftp://ledger.example.com".into(),
            ..StoreConfig::default()
        };
        assert!(config.base_url().is_err());
    }

    #[test]
    fn empty_url_is_missing_field() {
        let err = StoreConfig::default().base_url().unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField { field: "store.url" })
        ));
    }

    #[test]
    fn rejects_unknown_log_format() {
        let toml = r#"
[store]
url = "https://ledger.example.com"

[logging]
format = "xml"
"#;
        assert!(Config::parse_toml(toml).is_err());
    }
}
