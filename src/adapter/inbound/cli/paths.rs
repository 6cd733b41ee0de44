//! Path utilities for stockledger.
//!
//! All local files live under `~/.stockledger/`:
//! - `~/.stockledger/config.toml` - main configuration

use std::path::PathBuf;

/// Returns the stockledger home directory (`~/.stockledger/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".stockledger")
}

/// Returns the default config file path (`~/.stockledger/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}
