//! Outbound adapters (driven side).

pub mod remote;
