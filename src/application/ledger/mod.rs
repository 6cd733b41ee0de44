//! Ledger use cases.
//!
//! - [`LedgerState`] - The loaded trades and the active view, updated only
//!   through [`LedgerAction`] transitions
//! - [`LedgerService`] - Persists changes through the store port

mod service;
mod state;

pub use service::{EditOutcome, LedgerService};
pub use state::{LedgerAction, LedgerRow, LedgerState, ViewState};
