//! Monetary types for price, quantity, and amount representation.

use rust_decimal::Decimal;

/// Per-share price represented as a Decimal for precision.
pub type Price = Decimal;

/// Share count. Fractional shares are allowed by the model.
pub type Quantity = Decimal;

/// Currency amount (price × quantity, fees, tax, profit).
pub type Amount = Decimal;

/// Round a fee or tax amount down to the nearest currency unit.
///
/// Fees and tax are each floored on their own, never on their sum.
#[must_use]
pub fn floor_to_unit(amount: Amount) -> Amount {
    amount.floor()
}
