//! Portfolio summary over a set of trades.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::calculator::calculate;
use super::money::Amount;
use super::trade::Trade;

/// Aggregates shown above the trade table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// Sum of profit over sold trades.
    pub realized_profit: Amount,
    /// Number of sold trades.
    pub closed_trades: usize,
    /// Sold trades with a positive profit.
    pub winning_trades: usize,
    /// Trades still held.
    pub open_trades: usize,
    /// Buy amount + sell amount over sold trades.
    pub total_volume: Amount,
    pub total_tax: Amount,
    /// Buy and sell fees over sold trades.
    pub total_fees: Amount,
    /// Total cost of trades still held.
    pub holding_cost: Amount,
}

impl PortfolioSummary {
    /// Summarize `trades` as of `now`.
    pub fn from_trades<'a>(
        trades: impl IntoIterator<Item = &'a Trade>,
        now: DateTime<Utc>,
    ) -> Self {
        trades.into_iter().fold(Self::default(), |mut acc, trade| {
            let calc = calculate(trade, now);
            if calc.is_sold {
                acc.realized_profit = acc.realized_profit.saturating_add(calc.profit);
                acc.closed_trades += 1;
                if calc.profit > Decimal::ZERO {
                    acc.winning_trades += 1;
                }
                acc.total_volume = acc
                    .total_volume
                    .saturating_add(calc.sell_amount.saturating_add(calc.buy_amount));
                acc.total_tax = acc.total_tax.saturating_add(calc.tax);
                acc.total_fees = acc
                    .total_fees
                    .saturating_add(calc.buy_fee.saturating_add(calc.sell_fee));
            } else {
                acc.open_trades += 1;
                acc.holding_cost = acc.holding_cost.saturating_add(calc.total_cost);
            }
            acc
        })
    }

    /// Winning share of sold trades in percent. Zero when nothing is sold.
    #[must_use]
    pub fn win_rate(&self) -> Decimal {
        if self.closed_trades == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(self.winning_trades) / Decimal::from(self.closed_trades) * dec!(100)
    }

    /// Tax plus fees paid on sold trades.
    #[must_use]
    pub fn trading_costs(&self) -> Amount {
        self.total_tax.saturating_add(self.total_fees)
    }
}
