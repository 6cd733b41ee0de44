//! Persistence port for trade records.

use std::future::Future;

use crate::domain::{LedgerEntry, Trade, TradeId, TradePatch};
use crate::error::Result;

/// Storage operations for trades.
///
/// The store has no transactions and no concurrency token. `update` merges
/// only the keys in the patch, so concurrent edits of different fields both
/// survive and edits of the same field are last-write-wins.
pub trait TradeStore: Send + Sync {
    /// List every stored trade. An empty collection is an empty list.
    fn list(&self) -> impl Future<Output = Result<Vec<LedgerEntry>>> + Send;

    /// Create a trade and return the identifier the store generated.
    fn create(&self, trade: &Trade) -> impl Future<Output = Result<TradeId>> + Send;

    /// Merge the changed fields into the stored record.
    fn update(&self, id: &TradeId, patch: &TradePatch)
        -> impl Future<Output = Result<()>> + Send;

    /// Remove a record.
    fn delete(&self, id: &TradeId) -> impl Future<Output = Result<()>> + Send;
}
