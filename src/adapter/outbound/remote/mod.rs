//! Remote document store integration.
//!
//! Trades live in one collection of a Firebase-style JSON store: each record
//! is addressed by `{base}/{collection}/{id}.json` and the whole collection
//! by `{base}/{collection}.json`.

pub mod client;

pub use client::RemoteTradeStore;
