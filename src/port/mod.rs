//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points of the ledger. The application layer
//! talks to storage and to the user only through these traits, so the
//! calculator and the ledger state never see HTTP or a terminal.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤   Domain + Port         ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                                                       ▼
//! ┌──────────────┐                                    ┌───────────────┐
//! │ TradeStore   │                                    │ Confirmer     │
//! │ HTTP adapter │                                    │ CLI prompt    │
//! └──────────────┘                                    └───────────────┘
//! ```

pub mod outbound;

pub use outbound::confirm::Confirmer;
pub use outbound::store::TradeStore;
