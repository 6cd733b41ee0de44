//! Canonical test configurations.

use crate::infrastructure::config::store::StoreConfig;

/// Store config for a local test server: one attempt, no backoff, short
/// timeouts.
pub fn store(url: &str) -> StoreConfig {
    StoreConfig {
        url: url.to_string(),
        timeout_ms: 2_000,
        connect_timeout_ms: 1_000,
        retry_max_attempts: 1,
        retry_backoff_ms: 0,
        ..StoreConfig::default()
    }
}
