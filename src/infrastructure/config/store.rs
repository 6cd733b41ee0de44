//! Document store connection settings.

use serde::{Deserialize, Serialize};

/// Environment variable overriding [`StoreConfig::url`].
pub const STORE_URL_ENV: &str = "STOCKLEDGER_STORE_URL";

/// Where trades are persisted and how requests behave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the document store, without the collection path.
    #[serde(default)]
    pub url: String,
    /// Collection holding trade records.
    #[serde(default = "default_collection")]
    pub collection: String,
    /// Whole-request timeout.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Attempts for reads that fail to connect or time out. Writes are
    /// never retried.
    #[serde(default = "default_retry_max_attempts")]
    pub retry_max_attempts: u32,
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

fn default_collection() -> String {
    "trades".into()
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_connect_timeout_ms() -> u64 {
    5_000
}

const fn default_retry_max_attempts() -> u32 {
    2
}

const fn default_retry_backoff_ms() -> u64 {
    250
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            collection: default_collection(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            retry_max_attempts: default_retry_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}
