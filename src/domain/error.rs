//! Domain validation errors for core domain types.
//!
//! This module defines errors that occur when domain invariants are violated.
//! These errors are returned by the trade builder and the edit planner.
//!
//! # Examples
//!
//! ```
//! use stockledger::domain::DomainError;
//! use stockledger::domain::Trade;
//! use rust_decimal_macros::dec;
//!
//! let result = Trade::builder()
//!     .name("TSMC")
//!     .quantity(dec!(0))
//!     .buy_price(dec!(600))
//!     .build();
//!
//! assert!(matches!(result, Err(DomainError::NonPositiveQuantity { .. })));
//! ```

use thiserror::Error;

use super::money::{Price, Quantity};

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Every trade needs a stock name.
    #[error("stock name cannot be empty")]
    EmptyStockName,

    /// Quantity must be positive.
    #[error("quantity must be positive, got {quantity}")]
    NonPositiveQuantity {
        /// The invalid quantity that was provided.
        quantity: Quantity,
    },

    /// Prices cannot be negative.
    #[error("{field} cannot be negative, got {price}")]
    NegativePrice {
        /// Which price field was rejected.
        field: &'static str,
        /// The invalid price.
        price: Price,
    },

    /// A required field was not supplied.
    #[error("missing required field: {field}")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// A sale needs both a price and a date.
    #[error("sell price and sell date must be given together")]
    IncompleteSale,

    /// A sold trade cannot carry an expected sell price.
    #[error("a sold trade cannot carry an expected sell price")]
    ExpectedPriceOnSoldTrade,

    /// The sell quantity of an edit must be positive.
    #[error("sell quantity must be positive, got {quantity}")]
    NonPositiveSellQuantity {
        /// The invalid sell quantity.
        quantity: Quantity,
    },

    /// The sell quantity of an edit cannot exceed the holding.
    #[error("sell quantity {sell} exceeds held quantity {held}")]
    SellQuantityExceedsHolding {
        /// Requested sell quantity.
        sell: Quantity,
        /// Quantity held by the original record.
        held: Quantity,
    },

    /// A sell quantity was supplied for an edit that does not sell.
    #[error("sell quantity given but the edited trade has no sale")]
    SellQuantityWithoutSale,

    /// Market code not recognised.
    #[error("unknown market '{0}', expected TW, US or UK")]
    UnknownMarket(String),

    /// A date field is not a `YYYY-MM-DD` calendar date.
    #[error("invalid {field} '{value}', expected YYYY-MM-DD")]
    InvalidDate {
        /// Name of the date field.
        field: &'static str,
        /// The rejected text.
        value: String,
    },

    /// A numeric field is not a decimal number.
    #[error("invalid {field} '{value}', expected a number")]
    InvalidNumber {
        /// Name of the numeric field.
        field: &'static str,
        /// The rejected text.
        value: String,
    },

    /// A persisted record does not have the trade shape.
    #[error("malformed trade record: {0}")]
    MalformedRecord(String),
}
