//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use super::output;
use super::session;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::store::STORE_URL_ENV;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!(
        "1. Set store.url in {} (or export {STORE_URL_ENV})",
        path.display()
    ));
    output::note(&format!(
        "2. Run: stockledger --config {} config validate",
        path.display()
    ));
    output::note("3. Run: stockledger list");
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = session::load_config(path)?;
    if output::is_json() {
        output::record(
            "config",
            &json!({
                "path": path.display().to_string(),
                "exists": path.exists(),
                "config": config,
            }),
        );
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Path", path.display());
    if !path.exists() {
        output::note("(file not found, showing defaults)");
    }

    output::section("Store");
    output::field(
        "URL",
        if config.store.url.is_empty() {
            "(not set)"
        } else {
            config.store.url.as_str()
        },
    );
    output::field("Collection", &config.store.collection);
    output::field("Timeout", format!("{}ms", config.store.timeout_ms));
    output::field(
        "Connect",
        format!("{}ms", config.store.connect_timeout_ms),
    );
    output::field(
        "Retries",
        format!(
            "{} attempts, {}ms backoff",
            config.store.retry_max_attempts, config.store.retry_backoff_ms
        ),
    );

    output::section("Display");
    output::field("Market", config.display.market);
    output::field(
        "Sort",
        format!("{} {}", config.display.sort, config.display.direction),
    );

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);
    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    let config = if path.exists() {
        Config::load(path)?
    } else {
        let config = Config::from_env();
        config.validate()?;
        config
    };

    output::success("Configuration is valid");
    output::field("Path", path.display());
    output::field("Store", &config.store.url);
    Ok(())
}
