//! JSON payloads of trades and their metrics.

use serde::Serialize;

use crate::domain::{LedgerEntry, TradeCalculations, TradeId, TradeRecord};

/// One trade as emitted in `--json` mode.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradePayload<'a> {
    pub id: &'a TradeId,
    #[serde(flatten)]
    pub record: TradeRecord,
    pub calculations: &'a TradeCalculations,
}

impl<'a> TradePayload<'a> {
    #[must_use]
    pub fn new(entry: &'a LedgerEntry, calculations: &'a TradeCalculations) -> Self {
        Self {
            id: &entry.id,
            record: TradeRecord::from_trade(&entry.trade),
            calculations,
        }
    }
}

/// Payload of a trade that is not stored.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewPayload<'a> {
    #[serde(flatten)]
    pub record: TradeRecord,
    pub calculations: &'a TradeCalculations,
}
