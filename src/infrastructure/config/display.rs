//! Default view settings for the trade table.

use serde::{Deserialize, Serialize};

use crate::domain::{Market, SortConfig, SortDirection, SortKey};

/// Market filter and ordering used when a command does not override them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub market: Market,
    #[serde(default)]
    pub sort: SortKey,
    #[serde(default)]
    pub direction: SortDirection,
}

impl DisplayConfig {
    #[must_use]
    pub const fn sort_config(&self) -> SortConfig {
        SortConfig::new(self.sort, self.direction)
    }
}
