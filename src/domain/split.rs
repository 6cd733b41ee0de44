//! Partial-sell split planning.
//!
//! Editing a held trade into a sale of fewer shares than it holds is a
//! partial disposal: the edited record keeps only the sold shares and a new
//! record carries the remainder. [`plan_edit`] decides which of the two
//! shapes an edit takes. It performs no I/O; the caller asks for
//! confirmation and issues the writes.

use rust_decimal::Decimal;

use super::error::DomainError;
use super::money::Quantity;
use super::trade::{Disposition, Trade};

/// Prefix added to the note of the remainder record.
pub const SPLIT_REMAINDER_MARKER: &str = "(split remainder)";

/// How an edit is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditPlan {
    /// Overwrite the record with the edited trade.
    Update(Trade),
    /// Overwrite the record with the sold portion and create the remainder.
    Split(SplitPlan),
}

/// The two records a partial sale turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPlan {
    /// Replaces the original record. Carries the sale.
    pub sold: Trade,
    /// New record for the shares still held. No sale, no expected price.
    pub remainder: Trade,
    /// The edit exactly as entered, used when the split is declined.
    fallback: Trade,
}

impl SplitPlan {
    /// Quantity of the original record.
    #[must_use]
    pub fn original_quantity(&self) -> Quantity {
        self.sold.quantity() + self.remainder.quantity()
    }

    /// Single-record update applied when the user declines the split.
    #[must_use]
    pub fn fallback(&self) -> &Trade {
        &self.fallback
    }

    /// Consume the plan, keeping only the fallback update.
    #[must_use]
    pub fn into_fallback(self) -> Trade {
        self.fallback
    }
}

/// Plan how to persist `edited` over `original`.
///
/// `sell_quantity` is the number of shares sold by the edit; `None` means
/// the whole holding. A split is planned iff the edited trade is sold and
/// `0 < sell_quantity < original.quantity()`. The remainder quantity is
/// computed from the original record, so `sold + remainder == original`.
/// Every other shape, including a declined split, writes `edited` as is.
pub fn plan_edit(
    original: &Trade,
    edited: Trade,
    sell_quantity: Option<Quantity>,
) -> Result<EditPlan, DomainError> {
    let Some(sell) = sell_quantity else {
        return Ok(EditPlan::Update(edited));
    };

    if !edited.is_sold() {
        return Err(DomainError::SellQuantityWithoutSale);
    }
    if sell <= Decimal::ZERO {
        return Err(DomainError::NonPositiveSellQuantity { quantity: sell });
    }

    let held = original.quantity();
    if sell > held {
        return Err(DomainError::SellQuantityExceedsHolding { sell, held });
    }
    if sell == held {
        return Ok(EditPlan::Update(edited));
    }

    let sold = edited.with_quantity(sell)?;
    let remainder = edited
        .to_builder()
        .quantity(held - sell)
        .disposition(Disposition::Held {
            expected_price: None,
        })
        .note(remainder_note(edited.note()))
        .build()?;

    Ok(EditPlan::Split(SplitPlan {
        sold,
        remainder,
        fallback: edited,
    }))
}

fn remainder_note(note: Option<&str>) -> String {
    match note {
        Some(note) if !note.is_empty() => format!("{SPLIT_REMAINDER_MARKER} {note}"),
        _ => SPLIT_REMAINDER_MARKER.to_string(),
    }
}
