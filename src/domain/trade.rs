//! Trade records.
//!
//! This module provides the persisted trade entity:
//!
//! - [`Trade`] - A single buy, optionally closed by a sale
//! - [`Disposition`] - Whether the position is still held or has been sold
//! - [`LedgerEntry`] - A trade paired with its storage identifier
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use stockledger::domain::{Disposition, Market, Trade};
//!
//! let trade = Trade::builder()
//!     .market(Market::Tw)
//!     .symbol("2330")
//!     .name("TSMC")
//!     .quantity(dec!(1000))
//!     .buy_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
//!     .buy_price(dec!(590))
//!     .build()
//!     .unwrap();
//!
//! assert!(!trade.is_sold());
//! assert_eq!(trade.disposition(), &Disposition::Held { expected_price: None });
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::DomainError;
use super::ids::TradeId;
use super::market::Market;
use super::money::{Price, Quantity};

/// What happened to the shares after the buy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Still held. May carry a what-if sell price for projections.
    Held {
        /// Advisory sell price, never a realized outcome.
        expected_price: Option<Price>,
    },
    /// Closed at the given price on the given date.
    Sold {
        /// Realized sell price per share.
        price: Price,
        /// Date of the sale.
        date: NaiveDate,
    },
}

impl Default for Disposition {
    fn default() -> Self {
        Self::Held {
            expected_price: None,
        }
    }
}

impl Disposition {
    /// Build a disposition from the sparse optional fields of a form or record.
    ///
    /// A sale needs both price and date. When a sale is present the expected
    /// price is ignored unless `strict` is set, in which case it is an error.
    pub fn from_parts(
        sell_price: Option<Price>,
        sell_date: Option<NaiveDate>,
        expected_price: Option<Price>,
        strict: bool,
    ) -> Result<Self, DomainError> {
        match (sell_price, sell_date) {
            (Some(price), Some(date)) => {
                if strict && expected_price.is_some() {
                    return Err(DomainError::ExpectedPriceOnSoldTrade);
                }
                Ok(Self::Sold { price, date })
            }
            (None, None) => Ok(Self::Held { expected_price }),
            _ if strict => Err(DomainError::IncompleteSale),
            _ => Ok(Self::Held { expected_price }),
        }
    }

    /// Sell price if sold.
    #[must_use]
    pub const fn sell_price(&self) -> Option<Price> {
        match self {
            Self::Sold { price, .. } => Some(*price),
            Self::Held { .. } => None,
        }
    }

    /// Sell date if sold.
    #[must_use]
    pub const fn sell_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Sold { date, .. } => Some(*date),
            Self::Held { .. } => None,
        }
    }

    /// Expected sell price if held with a projection.
    #[must_use]
    pub const fn expected_price(&self) -> Option<Price> {
        match self {
            Self::Held { expected_price } => *expected_price,
            Self::Sold { .. } => None,
        }
    }
}

/// A stock purchase and its eventual disposition.
///
/// Construct through [`Trade::builder`] so the invariants are checked once:
/// the stock name is non-empty, quantity is positive and prices are not
/// negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    market: Market,
    symbol: Option<String>,
    name: String,
    quantity: Quantity,
    buy_date: NaiveDate,
    buy_price: Price,
    disposition: Disposition,
    note: Option<String>,
}

impl Trade {
    /// Create a builder for a new trade.
    pub fn builder() -> TradeBuilder {
        TradeBuilder::new()
    }

    /// Builder pre-filled with this trade's fields, for edits.
    pub fn to_builder(&self) -> TradeBuilder {
        TradeBuilder {
            market: Some(self.market),
            symbol: self.symbol.clone(),
            name: Some(self.name.clone()),
            quantity: Some(self.quantity),
            buy_date: Some(self.buy_date),
            buy_price: Some(self.buy_price),
            disposition: self.disposition.clone(),
            note: self.note.clone(),
        }
    }

    #[must_use]
    pub const fn market(&self) -> Market {
        self.market
    }

    #[must_use]
    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    #[must_use]
    pub const fn buy_date(&self) -> NaiveDate {
        self.buy_date
    }

    #[must_use]
    pub const fn buy_price(&self) -> Price {
        self.buy_price
    }

    #[must_use]
    pub const fn disposition(&self) -> &Disposition {
        &self.disposition
    }

    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// True iff the trade carries both a sell price and a sell date.
    #[must_use]
    pub const fn is_sold(&self) -> bool {
        matches!(self.disposition, Disposition::Sold { .. })
    }

    /// Copy of this trade with a different quantity.
    pub fn with_quantity(&self, quantity: Quantity) -> Result<Self, DomainError> {
        self.to_builder().quantity(quantity).build()
    }

    /// Label used in tables and prompts: `name (symbol)` or just the name.
    #[must_use]
    pub fn label(&self) -> String {
        match self.symbol() {
            Some(symbol) if !symbol.is_empty() => format!("{} ({symbol})", self.name),
            _ => self.name.clone(),
        }
    }
}

/// Builder for constructing [`Trade`] instances.
#[derive(Debug, Default, Clone)]
pub struct TradeBuilder {
    market: Option<Market>,
    symbol: Option<String>,
    name: Option<String>,
    quantity: Option<Quantity>,
    buy_date: Option<NaiveDate>,
    buy_price: Option<Price>,
    disposition: Disposition,
    note: Option<String>,
}

impl TradeBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn market(mut self, market: Market) -> Self {
        self.market = Some(market);
        self
    }

    /// Set the ticker symbol. Blank symbols are dropped.
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        self.symbol = (!symbol.trim().is_empty()).then_some(symbol);
        self
    }

    pub fn clear_symbol(mut self) -> Self {
        self.symbol = None;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn buy_date(mut self, date: NaiveDate) -> Self {
        self.buy_date = Some(date);
        self
    }

    pub fn buy_price(mut self, price: Price) -> Self {
        self.buy_price = Some(price);
        self
    }

    pub fn disposition(mut self, disposition: Disposition) -> Self {
        self.disposition = disposition;
        self
    }

    /// Mark the trade sold.
    pub fn sold(self, price: Price, date: NaiveDate) -> Self {
        self.disposition(Disposition::Sold { price, date })
    }

    /// Mark the trade held with an optional what-if price.
    pub fn held(self, expected_price: Option<Price>) -> Self {
        self.disposition(Disposition::Held { expected_price })
    }

    /// Set the note. Blank notes are dropped.
    pub fn note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        self.note = (!note.trim().is_empty()).then_some(note);
        self
    }

    pub fn clear_note(mut self) -> Self {
        self.note = None;
        self
    }

    /// Build the trade, validating invariants. The market defaults to TW.
    pub fn build(self) -> Result<Trade, DomainError> {
        let name = self.name.ok_or(DomainError::MissingField { field: "stockName" })?;
        if name.trim().is_empty() {
            return Err(DomainError::EmptyStockName);
        }

        let quantity = self
            .quantity
            .ok_or(DomainError::MissingField { field: "quantity" })?;
        if quantity <= Decimal::ZERO {
            return Err(DomainError::NonPositiveQuantity { quantity });
        }

        let buy_price = self
            .buy_price
            .ok_or(DomainError::MissingField { field: "buyPrice" })?;
        check_price("buyPrice", buy_price)?;

        match &self.disposition {
            Disposition::Sold { price, .. } => check_price("sellPrice", *price)?,
            Disposition::Held {
                expected_price: Some(price),
            } => check_price("expectedSellPrice", *price)?,
            Disposition::Held { .. } => {}
        }

        let buy_date = self
            .buy_date
            .ok_or(DomainError::MissingField { field: "buyDate" })?;

        Ok(Trade {
            market: self.market.unwrap_or_default(),
            symbol: self.symbol,
            name,
            quantity,
            buy_date,
            buy_price,
            disposition: self.disposition,
            note: self.note,
        })
    }
}

fn check_price(field: &'static str, price: Price) -> Result<(), DomainError> {
    if price < Decimal::ZERO {
        return Err(DomainError::NegativePrice { field, price });
    }
    Ok(())
}

/// A stored trade with the identifier the document store assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub id: TradeId,
    pub trade: Trade,
}

impl LedgerEntry {
    pub fn new(id: TradeId, trade: Trade) -> Self {
        Self { id, trade }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn base() -> TradeBuilder {
        Trade::builder()
            .name("TSMC")
            .quantity(dec!(1000))
            .buy_date(date(2024, 1, 1))
            .buy_price(dec!(100))
    }

    #[test]
    fn builder_defaults_market_to_taiwan() {
        let trade = base().build().unwrap();
        assert_eq!(trade.market(), Market::Tw);
        assert!(trade.symbol().is_none());
        assert!(trade.note().is_none());
    }

    #[test]
    fn builder_rejects_blank_name() {
        let err = base().name("   ").build().unwrap_err();
        assert_eq!(err, DomainError::EmptyStockName);
    }

    #[test]
    fn builder_rejects_non_positive_quantity() {
        let err = base().quantity(dec!(-5)).build().unwrap_err();
        assert_eq!(
            err,
            DomainError::NonPositiveQuantity {
                quantity: dec!(-5)
            }
        );
    }

    #[test]
    fn builder_rejects_negative_sell_price() {
        let err = base().sold(dec!(-1), date(2024, 2, 1)).build().unwrap_err();
        assert!(matches!(
            err,
            DomainError::NegativePrice {
                field: "sellPrice",
                ..
            }
        ));
    }

    #[test]
    fn builder_requires_buy_date() {
        let err = Trade::builder()
            .name("TSMC")
            .quantity(dec!(1))
            .buy_price(dec!(1))
            .build()
            .unwrap_err();
        assert_eq!(err, DomainError::MissingField { field: "buyDate" });
    }

    #[test]
    fn blank_symbol_and_note_are_dropped() {
        let trade = base().symbol("  ").note("").build().unwrap();
        assert!(trade.symbol().is_none());
        assert!(trade.note().is_none());
    }

    #[test]
    fn sold_trade_reports_sale_fields() {
        let trade = base().sold(dec!(110), date(2024, 7, 1)).build().unwrap();
        assert!(trade.is_sold());
        assert_eq!(trade.disposition().sell_price(), Some(dec!(110)));
        assert_eq!(trade.disposition().sell_date(), Some(date(2024, 7, 1)));
        assert_eq!(trade.disposition().expected_price(), None);
    }

    #[test]
    fn disposition_from_parts_pairs_price_and_date() {
        let sold =
            Disposition::from_parts(Some(dec!(5)), Some(date(2024, 1, 2)), None, true).unwrap();
        assert!(matches!(sold, Disposition::Sold { .. }));

        let err = Disposition::from_parts(Some(dec!(5)), None, None, true).unwrap_err();
        assert_eq!(err, DomainError::IncompleteSale);

        let lenient = Disposition::from_parts(Some(dec!(5)), None, Some(dec!(7)), false).unwrap();
        assert_eq!(
            lenient,
            Disposition::Held {
                expected_price: Some(dec!(7))
            }
        );
    }

    #[test]
    fn strict_parts_reject_expected_price_on_sale() {
        let err = Disposition::from_parts(
            Some(dec!(5)),
            Some(date(2024, 1, 2)),
            Some(dec!(6)),
            true,
        )
        .unwrap_err();
        assert_eq!(err, DomainError::ExpectedPriceOnSoldTrade);
    }

    #[test]
    fn lenient_parts_keep_sale_over_expected_price() {
        let sold = Disposition::from_parts(
            Some(dec!(5)),
            Some(date(2024, 1, 2)),
            Some(dec!(6)),
            false,
        )
        .unwrap();
        assert_eq!(sold.expected_price(), None);
        assert_eq!(sold.sell_price(), Some(dec!(5)));
    }

    #[test]
    fn label_includes_symbol_when_present() {
        assert_eq!(base().symbol("2330").build().unwrap().label(), "TSMC (2330)");
        assert_eq!(base().build().unwrap().label(), "TSMC");
    }

    #[test]
    fn with_quantity_revalidates() {
        let trade = base().build().unwrap();
        assert_eq!(trade.with_quantity(dec!(400)).unwrap().quantity(), dec!(400));
        assert!(trade.with_quantity(dec!(0)).is_err());
    }
}
