//! Persisted trade shape and partial updates.
//!
//! [`TradeRecord`] is the camelCase JSON document stored per trade. It keeps
//! the sparse optional fields of the stored form; [`TradeRecord::into_trade`]
//! folds them into a [`Disposition`].
//!
//! [`TradePatch`] carries only the keys that changed between two trades.
//! Removed optional fields are sent as `null`, which deletes the key in the
//! document store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::DomainError;
use super::market::Market;
use super::money::{Price, Quantity};
use super::trade::{Disposition, Trade};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A trade as stored in the document store.
///
/// Numbers go over the wire as JSON floats (`1000.0`) so the store keeps
/// numeric fields numeric. Records written elsewhere hold integers (`1000`);
/// both decode to the same `Decimal` and re-encode identically, so
/// [`TradePatch::between`] never reports a number that was only reformatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<Market>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_symbol: Option<String>,
    #[serde(default)]
    pub stock_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Quantity,
    pub buy_date: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub buy_price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sell_date: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub sell_price: Option<Price>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub expected_sell_price: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TradeRecord {
    /// Persisted form of a trade.
    #[must_use]
    pub fn from_trade(trade: &Trade) -> Self {
        let disposition = trade.disposition();
        Self {
            market: Some(trade.market()),
            stock_symbol: trade.symbol().map(str::to_string),
            stock_name: trade.name().to_string(),
            quantity: trade.quantity(),
            buy_date: format_date(trade.buy_date()),
            buy_price: trade.buy_price(),
            sell_date: disposition.sell_date().map(format_date),
            sell_price: disposition.sell_price(),
            expected_sell_price: disposition.expected_price(),
            note: trade.note().map(str::to_string),
        }
    }

    /// Decode into a validated trade.
    ///
    /// Stored data is read leniently: a missing market is TW, an empty sell
    /// date means unsold, a sell price without a date is ignored, and a sale
    /// wins over a stale expected price.
    pub fn into_trade(self) -> Result<Trade, DomainError> {
        let buy_date = parse_date("buyDate", &self.buy_date)?;
        let sell_date = match self.sell_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(text) => Some(parse_date("sellDate", text)?),
        };
        let disposition =
            Disposition::from_parts(self.sell_price, sell_date, self.expected_sell_price, false)?;

        let mut builder = Trade::builder()
            .market(self.market.unwrap_or_default())
            .name(self.stock_name)
            .quantity(self.quantity)
            .buy_date(buy_date)
            .buy_price(self.buy_price)
            .disposition(disposition);
        if let Some(symbol) = self.stock_symbol {
            builder = builder.symbol(symbol);
        }
        if let Some(note) = self.note {
            builder = builder.note(note);
        }
        builder.build()
    }

    fn to_object(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(field: &'static str, text: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).map_err(|_| DomainError::InvalidDate {
        field,
        value: text.to_string(),
    })
}

/// Format a calendar date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Partial update body: changed keys only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TradePatch(Map<String, Value>);

impl TradePatch {
    /// Keys whose values differ between `before` and `after`.
    ///
    /// Keys present before and absent after are patched to `null`.
    #[must_use]
    pub fn between(before: &Trade, after: &Trade) -> Self {
        let old = TradeRecord::from_trade(before).to_object();
        let new = TradeRecord::from_trade(after).to_object();

        let mut changes = Map::new();
        for (key, value) in &new {
            if old.get(key) != Some(value) {
                changes.insert(key.clone(), value.clone());
            }
        }
        for key in old.keys() {
            if !new.contains_key(key) {
                changes.insert(key.clone(), Value::Null);
            }
        }
        Self(changes)
    }

    /// True when nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Changed field names.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Merge this patch into `trade` the way the document store does.
    pub fn apply_to(&self, trade: &Trade) -> Result<Trade, DomainError> {
        let mut object = TradeRecord::from_trade(trade).to_object();
        for (key, value) in &self.0 {
            if value.is_null() {
                object.remove(key);
            } else {
                object.insert(key.clone(), value.clone());
            }
        }
        let record: TradeRecord = serde_json::from_value(Value::Object(object))
            .map_err(|e| DomainError::MalformedRecord(e.to_string()))?;
        record.into_trade()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn held() -> Trade {
        Trade::builder()
            .market(Market::Tw)
            .symbol("2330")
            .name("TSMC")
            .quantity(dec!(1000))
            .buy_date(date(2024, 1, 1))
            .buy_price(dec!(590.5))
            .held(Some(dec!(700)))
            .note("core")
            .build()
            .unwrap()
    }

    #[test]
    fn record_uses_camel_case_numbers() {
        let value = serde_json::to_value(TradeRecord::from_trade(&held())).unwrap();
        assert_eq!(
            value,
            json!({
                "market": "TW",
                "stockSymbol": "2330",
                "stockName": "TSMC",
                "quantity": 1000.0,
                "buyDate": "2024-01-01",
                "buyPrice": 590.5,
                "expectedSellPrice": 700.0,
                "note": "core",
            })
        );
    }

    #[test]
    fn decodes_legacy_record_without_market() {
        let record: TradeRecord = serde_json::from_value(json!({
            "stockName": "Foxconn",
            "quantity": 2000,
            "buyDate": "2023-05-04",
            "buyPrice": 101.5,
            "sellDate": "",
            "note": ""
        }))
        .unwrap();
        let trade = record.into_trade().unwrap();

        assert_eq!(trade.market(), Market::Tw);
        assert_eq!(trade.quantity(), dec!(2000));
        assert!(!trade.is_sold());
        assert!(trade.note().is_none());
    }

    #[test]
    fn decodes_sale_and_drops_stale_expected_price() {
        let record: TradeRecord = serde_json::from_value(json!({
            "market": "US",
            "stockName": "Apple",
            "quantity": 10,
            "buyDate": "2024-01-02",
            "buyPrice": 180,
            "sellDate": "2024-03-04",
            "sellPrice": 190.25,
            "expectedSellPrice": 200
        }))
        .unwrap();
        let trade = record.into_trade().unwrap();

        assert_eq!(
            trade.disposition(),
            &Disposition::Sold {
                price: dec!(190.25),
                date: date(2024, 3, 4)
            }
        );
    }

    #[test]
    fn rejects_malformed_date() {
        let record: TradeRecord = serde_json::from_value(json!({
            "stockName": "X",
            "quantity": 1,
            "buyDate": "01/02/2024",
            "buyPrice": 1
        }))
        .unwrap();
        assert!(matches!(
            record.into_trade(),
            Err(DomainError::InvalidDate {
                field: "buyDate",
                ..
            })
        ));
    }

    #[test]
    fn patch_contains_only_changed_keys() {
        let before = held();
        let after = before.to_builder().note("trimmed").build().unwrap();
        let patch = TradePatch::between(&before, &after);

        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({ "note": "trimmed" }));
    }

    #[test]
    fn patch_nulls_cleared_fields() {
        let before = held();
        let after = before
            .to_builder()
            .sold(dec!(650), date(2024, 6, 1))
            .build()
            .unwrap();
        let patch = TradePatch::between(&before, &after);

        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({
                "sellDate": "2024-06-01",
                "sellPrice": 650.0,
                "expectedSellPrice": null,
            })
        );
    }

    #[test]
    fn patch_applies_like_the_store() {
        let before = held();
        let after = before
            .to_builder()
            .quantity(dec!(400))
            .sold(dec!(650), date(2024, 6, 1))
            .clear_note()
            .build()
            .unwrap();
        let patch = TradePatch::between(&before, &after);

        assert_eq!(patch.apply_to(&before).unwrap(), after);
    }

    #[test]
    fn integer_stored_numbers_are_not_patched() {
        let record: TradeRecord = serde_json::from_value(json!({
            "market": "TW",
            "stockName": "TSMC",
            "quantity": 1000,
            "buyDate": "2024-01-01",
            "buyPrice": 100
        }))
        .unwrap();
        let stored = record.into_trade().unwrap();
        let edited = stored.to_builder().note("long hold").build().unwrap();

        let patch = TradePatch::between(&stored, &edited);
        assert_eq!(patch.keys().collect::<Vec<_>>(), ["note"]);
    }

    #[test]
    fn identical_trades_yield_empty_patch() {
        let trade = held();
        assert!(TradePatch::between(&trade, &trade).is_empty());
    }
}
