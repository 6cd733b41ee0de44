//! Config loading and store access shared by the command handlers.

use std::path::Path;

use tracing::debug;

use super::output;
use crate::adapter::outbound::remote::RemoteTradeStore;
use crate::application::ledger::{LedgerService, ViewState};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Load the config file, or defaults plus environment when it does not exist.
pub fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        debug!(path = %path.display(), "Loading config");
        Config::load(path)
    } else {
        debug!(path = %path.display(), "No config file, using defaults");
        Ok(Config::from_env())
    }
}

/// Connect to the store and load every trade.
pub async fn open_ledger(config: &Config, view: ViewState) -> Result<LedgerService<RemoteTradeStore>> {
    let store = RemoteTradeStore::from_config(&config.store)?;
    let mut service = LedgerService::new(store, view);

    let spinner = output::spinner("Loading trades");
    service.load().await;
    output::spinner_clear(&spinner);
    Ok(service)
}

/// View from the config, with optional overrides.
#[must_use]
pub fn view(config: &Config) -> ViewState {
    ViewState {
        market: config.display.market,
        sort: config.display.sort_config(),
    }
}
