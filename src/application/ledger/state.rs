//! Ledger state container and its transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    calculate, LedgerEntry, Market, PortfolioSummary, SortConfig, SortKey, Trade,
    TradeCalculations, TradeId,
};

/// Market filter and ordering of the trade table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub market: Market,
    pub sort: SortConfig,
}

/// A transition of [`LedgerState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerAction {
    /// Replace every entry with a fresh listing.
    Loaded(Vec<LedgerEntry>),
    /// Append a newly created entry.
    Added(LedgerEntry),
    /// Replace the trade of an existing entry.
    Updated { id: TradeId, trade: Trade },
    Removed(TradeId),
    SelectMarket(Market),
    /// Sort by a column, toggling the direction if it is already active.
    SortBy(SortKey),
    SetSort(SortConfig),
}

/// One visible row: an entry and its metrics.
#[derive(Debug, Clone)]
pub struct LedgerRow<'a> {
    pub entry: &'a LedgerEntry,
    pub calculations: TradeCalculations,
}

/// Loaded trades plus the active view.
///
/// Entries keep store order. Filtering and sorting happen when rows are
/// read, so the same state renders consistently at any `now`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerState {
    entries: Vec<LedgerEntry>,
    view: ViewState,
}

impl LedgerState {
    #[must_use]
    pub fn new(view: ViewState) -> Self {
        Self {
            entries: Vec::new(),
            view,
        }
    }

    /// Apply one transition.
    #[must_use]
    pub fn apply(mut self, action: LedgerAction) -> Self {
        match action {
            LedgerAction::Loaded(entries) => self.entries = entries,
            LedgerAction::Added(entry) => {
                self.entries.retain(|existing| existing.id != entry.id);
                self.entries.push(entry);
            }
            LedgerAction::Updated { id, trade } => {
                if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
                    entry.trade = trade;
                }
            }
            LedgerAction::Removed(id) => self.entries.retain(|e| e.id != id),
            LedgerAction::SelectMarket(market) => self.view.market = market,
            LedgerAction::SortBy(key) => self.view.sort = self.view.sort.select(key),
            LedgerAction::SetSort(sort) => self.view.sort = sort,
        }
        self
    }

    #[must_use]
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    #[must_use]
    pub fn view(&self) -> ViewState {
        self.view
    }

    #[must_use]
    pub fn find(&self, id: &TradeId) -> Option<&LedgerEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    /// Entries of the selected market, in the active order.
    ///
    /// The sort is stable: ties keep store order.
    #[must_use]
    pub fn visible_rows(&self, now: DateTime<Utc>) -> Vec<LedgerRow<'_>> {
        let mut rows: Vec<LedgerRow<'_>> = self
            .entries
            .iter()
            .filter(|entry| entry.trade.market() == self.view.market)
            .map(|entry| LedgerRow {
                entry,
                calculations: calculate(&entry.trade, now),
            })
            .collect();
        let sort = self.view.sort;
        rows.sort_by(|a, b| {
            sort.compare(
                (&a.entry.trade, &a.calculations),
                (&b.entry.trade, &b.calculations),
            )
        });
        rows
    }

    /// Summary cards over the selected market.
    #[must_use]
    pub fn summary(&self, now: DateTime<Utc>) -> PortfolioSummary {
        PortfolioSummary::from_trades(
            self.entries
                .iter()
                .map(|entry| &entry.trade)
                .filter(|trade| trade.market() == self.view.market),
            now,
        )
    }
}
