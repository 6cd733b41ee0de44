//! Stockledger - stock trade ledger with fee-aware profit and loss.
//!
//! Trades are recorded per market (Taiwan, US, UK) in a remote JSON document
//! store. Every view derives its numbers from one calculator: buy and sell
//! fees, transaction tax, net income, profit, return, holding period and
//! annualized return.
//!
//! # Architecture
//!
//! - **`domain`** - Trades, the calculator, partial-sell planning, sorting
//!   and the portfolio summary. Pure, no I/O.
//! - **`port`** - Traits the application needs from the outside world:
//!   [`port::TradeStore`] and [`port::Confirmer`].
//! - **`application`** - [`application::ledger::LedgerService`] applies
//!   edits optimistically and reloads when a write fails.
//! - **`adapter`** - The HTTP document store and the command line.
//! - **`infrastructure`** - Configuration and logging.
//!
//! # Example
//!
//! ```
//! use chrono::{NaiveDate, TimeZone, Utc};
//! use rust_decimal_macros::dec;
//! use stockledger::domain::{calculate, Market, Trade};
//!
//! let trade = Trade::builder()
//!     .market(Market::Us)
//!     .name("Apple")
//!     .quantity(dec!(10))
//!     .buy_date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
//!     .buy_price(dec!(180))
//!     .held(Some(dec!(200)))
//!     .build()
//!     .unwrap();
//!
//! let now = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
//! let calc = calculate(&trade, now);
//! assert_eq!(calc.total_cost, dec!(1801));
//! assert_eq!(calc.expected_profit, Some(dec!(197)));
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
