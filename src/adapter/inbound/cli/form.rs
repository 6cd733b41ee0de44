//! Coercion of raw form values into trades.
//!
//! Every field arrives as text, exactly as typed. Numbers parse as decimals,
//! dates as `YYYY-MM-DD` and markets case-insensitively. Blank optional text
//! counts as absent.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::record::parse_date;
use crate::domain::{Disposition, DomainError, Market, Quantity, Trade};

/// Raw trade fields from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradeForm {
    pub market: Option<String>,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub quantity: Option<String>,
    pub buy_date: Option<String>,
    pub buy_price: Option<String>,
    pub sell_price: Option<String>,
    pub sell_date: Option<String>,
    pub expected_price: Option<String>,
    pub note: Option<String>,
}

/// Which stored values an edit removes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Clearing {
    pub sale: bool,
    pub expected: bool,
}

/// Parse a decimal number. Plain and scientific notation are accepted.
pub fn parse_decimal(field: &'static str, text: &str) -> Result<Decimal, DomainError> {
    let trimmed = text.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| DomainError::InvalidNumber {
            field,
            value: text.to_string(),
        })
}

/// Parse a sell quantity flag.
pub fn parse_quantity(text: &str) -> Result<Quantity, DomainError> {
    parse_decimal("sellQuantity", text)
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn decimal_field(field: &'static str, value: Option<&str>) -> Result<Option<Decimal>, DomainError> {
    present(value).map(|v| parse_decimal(field, v)).transpose()
}

fn date_field(field: &'static str, value: Option<&str>) -> Result<Option<NaiveDate>, DomainError> {
    present(value).map(|v| parse_date(field, v)).transpose()
}

fn market_field(value: Option<&str>) -> Result<Option<Market>, DomainError> {
    present(value).map(Market::from_str).transpose()
}

impl TradeForm {
    /// A new trade. The buy date defaults to `today` and the market to TW.
    ///
    /// A sell price needs a sell date and the reverse; a sale and an
    /// expected price cannot be entered together.
    pub fn into_new_trade(self, today: NaiveDate) -> Result<Trade, DomainError> {
        let disposition = Disposition::from_parts(
            decimal_field("sellPrice", self.sell_price.as_deref())?,
            date_field("sellDate", self.sell_date.as_deref())?,
            decimal_field("expectedSellPrice", self.expected_price.as_deref())?,
            true,
        )?;

        let mut builder = Trade::builder()
            .market(market_field(self.market.as_deref())?.unwrap_or_default())
            .buy_date(date_field("buyDate", self.buy_date.as_deref())?.unwrap_or(today))
            .disposition(disposition);
        if let Some(name) = self.name {
            builder = builder.name(name.trim());
        }
        if let Some(quantity) = decimal_field("quantity", self.quantity.as_deref())? {
            builder = builder.quantity(quantity);
        }
        if let Some(price) = decimal_field("buyPrice", self.buy_price.as_deref())? {
            builder = builder.buy_price(price);
        }
        if let Some(symbol) = self.symbol {
            builder = builder.symbol(symbol.trim());
        }
        if let Some(note) = self.note {
            builder = builder.note(note.trim());
        }
        builder.build()
    }

    /// `original` with the entered fields replaced.
    ///
    /// Entering a sale drops an inherited expected price. Blank symbol or
    /// note text clears the stored value.
    pub fn apply_to(self, original: &Trade, clearing: Clearing) -> Result<Trade, DomainError> {
        let current = original.disposition();
        let sale_entered = present(self.sell_price.as_deref()).is_some()
            || present(self.sell_date.as_deref()).is_some();

        let (sell_price, sell_date) = if clearing.sale {
            (None, None)
        } else {
            (
                decimal_field("sellPrice", self.sell_price.as_deref())?
                    .or(current.sell_price()),
                date_field("sellDate", self.sell_date.as_deref())?.or(current.sell_date()),
            )
        };
        let expected = match decimal_field("expectedSellPrice", self.expected_price.as_deref())? {
            Some(price) => Some(price),
            None if clearing.expected || sale_entered => None,
            None => current.expected_price(),
        };
        let disposition = Disposition::from_parts(sell_price, sell_date, expected, true)?;

        let mut builder = original.to_builder().disposition(disposition);
        if let Some(market) = market_field(self.market.as_deref())? {
            builder = builder.market(market);
        }
        if let Some(name) = present(self.name.as_deref()) {
            builder = builder.name(name);
        }
        if let Some(quantity) = decimal_field("quantity", self.quantity.as_deref())? {
            builder = builder.quantity(quantity);
        }
        if let Some(date) = date_field("buyDate", self.buy_date.as_deref())? {
            builder = builder.buy_date(date);
        }
        if let Some(price) = decimal_field("buyPrice", self.buy_price.as_deref())? {
            builder = builder.buy_price(price);
        }
        if let Some(symbol) = self.symbol {
            builder = builder.symbol(symbol.trim());
        }
        if let Some(note) = self.note {
            builder = builder.note(note.trim());
        }
        builder.build()
    }
}
