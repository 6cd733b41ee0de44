//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod confirm;
pub mod store;
