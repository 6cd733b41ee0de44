//! Builders for domain values used across tests.
//!
//! Trades default to a Taiwan holding of 1000 shares bought on 2024-01-01,
//! the shape most calculator examples use.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{LedgerEntry, Market, Trade, TradeBuilder, TradeId};

/// Calendar date shorthand.
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// Fixed "now" for deterministic holding periods: 2024-12-31 00:00 UTC.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0)
        .single()
        .expect("valid test time")
}

/// Builder for a TW trade of 1000 shares bought on 2024-01-01.
pub fn base(name: &str, buy_price: Decimal) -> TradeBuilder {
    Trade::builder()
        .market(Market::Tw)
        .name(name)
        .quantity(dec!(1000))
        .buy_date(date(2024, 1, 1))
        .buy_price(buy_price)
}

/// Unsold trade.
pub fn held_trade(name: &str, buy_price: Decimal) -> Trade {
    base(name, buy_price).build().expect("valid held trade")
}

/// Trade sold on 2024-07-01.
pub fn sold_trade(name: &str, buy_price: Decimal, sell_price: Decimal) -> Trade {
    base(name, buy_price)
        .sold(sell_price, date(2024, 7, 1))
        .build()
        .expect("valid sold trade")
}

/// `trade` edited into a sale at 110 on 2024-07-01.
pub fn sell(trade: &Trade) -> Trade {
    trade
        .to_builder()
        .sold(dec!(110), date(2024, 7, 1))
        .build()
        .expect("valid sale")
}

/// Ledger entry with the given id.
pub fn entry(id: &str, trade: Trade) -> LedgerEntry {
    LedgerEntry::new(TradeId::new(id), trade)
}
