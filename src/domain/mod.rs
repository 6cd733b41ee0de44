//! Ledger domain: trades, markets, and the profit/loss calculator.
//!
//! Nothing here performs I/O. The calculator is a pure function of a trade
//! and a reference time; storage and presentation live in the adapters.

pub mod calculator;
pub mod error;
mod ids;
pub mod market;
mod money;
pub mod record;
pub mod sort;
pub mod split;
pub mod summary;
pub mod trade;

pub use calculator::{calculate, TradeCalculations};
pub use error::DomainError;
pub use ids::TradeId;
pub use market::{FeeSchedule, Market};
pub use money::{floor_to_unit, Amount, Price, Quantity};
pub use record::{TradePatch, TradeRecord};
pub use sort::{SortConfig, SortDirection, SortKey};
pub use split::{plan_edit, EditPlan, SplitPlan, SPLIT_REMAINDER_MARKER};
pub use summary::PortfolioSummary;
pub use trade::{Disposition, LedgerEntry, Trade, TradeBuilder};
