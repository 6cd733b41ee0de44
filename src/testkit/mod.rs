//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] — Builders for trades and ledger entries.
//! - [`store`] — In-memory [`TradeStore`](crate::port::TradeStore) with
//!   failure injection.
//! - [`confirm`] — Scripted [`Confirmer`](crate::port::Confirmer).
//! - [`config`] — Canonical test configurations.

pub mod config;
pub mod confirm;
pub mod domain;
pub mod store;
