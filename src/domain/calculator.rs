//! Trade profit/loss calculation.
//!
//! [`calculate`] maps a [`Trade`] and a reference time to the derived
//! [`TradeCalculations`]: cost basis, fees, tax, net income, profit,
//! percentage return, holding period and annualized return.
//!
//! Every fee and tax amount is floored to a whole currency unit on its own.
//! The result is a projection: it is recomputed whenever a trade is shown and
//! never persisted.
//!
//! # Examples
//!
//! ```
//! use chrono::{NaiveDate, TimeZone, Utc};
//! use rust_decimal_macros::dec;
//! use stockledger::domain::{calculate, Market, Trade};
//!
//! let date = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap();
//! let trade = Trade::builder()
//!     .market(Market::Tw)
//!     .name("TSMC")
//!     .quantity(dec!(1000))
//!     .buy_date(date(1, 1))
//!     .buy_price(dec!(100))
//!     .sold(dec!(110), date(7, 1))
//!     .build()
//!     .unwrap();
//!
//! let calc = calculate(&trade, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
//! assert_eq!(calc.buy_fee, dec!(142));
//! assert_eq!(calc.profit, dec!(9372));
//! assert_eq!(calc.holding_days, 182);
//! ```

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::market::FeeSchedule;
use super::money::{floor_to_unit, Amount, Price, Quantity};
use super::trade::{Disposition, Trade};

const MS_PER_DAY: i64 = 1000 * 60 * 60 * 24;
const DAYS_PER_YEAR: f64 = 365.0;
const HUNDRED: Decimal = dec!(100);

/// Annualized return reported for a sale that returned nothing or less.
pub const FULL_LOSS_RETURN: Decimal = dec!(-100);

/// Metrics derived from a trade at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeCalculations {
    pub buy_amount: Amount,
    pub buy_fee: Amount,
    pub total_cost: Amount,
    pub sell_amount: Amount,
    pub sell_fee: Amount,
    pub tax: Amount,
    pub net_income: Amount,
    pub profit: Amount,
    /// Profit as a percentage of total cost.
    pub profit_percent: Decimal,
    pub is_sold: bool,
    /// Whole days held, never less than 1.
    pub holding_days: i64,
    /// Compound annual growth rate in percent. Zero for unsold trades.
    pub annualized_return: Decimal,
    /// What-if profit at the expected sell price of an unsold trade.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_profit: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_profit_percent: Option<Decimal>,
}

impl TradeCalculations {
    /// Buy fee + sell fee + tax.
    #[must_use]
    pub fn total_charges(&self) -> Amount {
        self.buy_fee
            .saturating_add(self.sell_fee)
            .saturating_add(self.tax)
    }
}

/// Sell-side figures at one sell price.
#[derive(Debug, Clone, Copy)]
struct SaleMetrics {
    sell_amount: Amount,
    sell_fee: Amount,
    tax: Amount,
    net_income: Amount,
    profit: Amount,
    profit_percent: Decimal,
}

impl SaleMetrics {
    fn at_price(
        schedule: FeeSchedule,
        quantity: Quantity,
        total_cost: Amount,
        price: Price,
    ) -> Self {
        let sell_amount = price.saturating_mul(quantity);
        let sell_fee = floor_to_unit(sell_amount * schedule.fee_rate);
        let tax = floor_to_unit(sell_amount * schedule.tax_rate);
        let net_income = sell_amount.saturating_sub(sell_fee).saturating_sub(tax);
        let profit = net_income.saturating_sub(total_cost);

        Self {
            sell_amount,
            sell_fee,
            tax,
            net_income,
            profit,
            profit_percent: percent_of(profit, total_cost),
        }
    }
}

/// Compute the derived metrics of `trade` as of `now`.
///
/// `now` is only used as the end of the holding period of unsold trades.
#[must_use]
pub fn calculate(trade: &Trade, now: DateTime<Utc>) -> TradeCalculations {
    let schedule = trade.market().fee_schedule();
    let quantity = trade.quantity();

    let buy_amount = trade.buy_price().saturating_mul(quantity);
    let buy_fee = floor_to_unit(buy_amount * schedule.fee_rate);
    let total_cost = buy_amount.saturating_add(buy_fee);

    let end = match trade.disposition() {
        Disposition::Sold { date, .. } => start_of_day(*date),
        Disposition::Held { .. } => now,
    };
    let holding_days = holding_days(start_of_day(trade.buy_date()), end);

    let unsold = TradeCalculations {
        buy_amount,
        buy_fee,
        total_cost,
        sell_amount: Decimal::ZERO,
        sell_fee: Decimal::ZERO,
        tax: Decimal::ZERO,
        net_income: Decimal::ZERO,
        profit: Decimal::ZERO,
        profit_percent: Decimal::ZERO,
        is_sold: false,
        holding_days,
        annualized_return: Decimal::ZERO,
        expected_profit: None,
        expected_profit_percent: None,
    };

    match trade.disposition() {
        Disposition::Sold { price, .. } => {
            let sale = SaleMetrics::at_price(schedule, quantity, total_cost, *price);
            TradeCalculations {
                sell_amount: sale.sell_amount,
                sell_fee: sale.sell_fee,
                tax: sale.tax,
                net_income: sale.net_income,
                profit: sale.profit,
                profit_percent: sale.profit_percent,
                is_sold: true,
                annualized_return: annualized_return(total_cost, sale.net_income, holding_days),
                ..unsold
            }
        }
        Disposition::Held {
            expected_price: Some(price),
        } => {
            let projected = SaleMetrics::at_price(schedule, quantity, total_cost, *price);
            TradeCalculations {
                expected_profit: Some(projected.profit),
                expected_profit_percent: Some(projected.profit_percent),
                ..unsold
            }
        }
        Disposition::Held {
            expected_price: None,
        } => unsold,
    }
}

/// Whole days between two instants, rounded up, at least 1.
#[must_use]
pub fn holding_days(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let elapsed_ms = (end - start).num_milliseconds().abs();
    let days = elapsed_ms / MS_PER_DAY + i64::from(elapsed_ms % MS_PER_DAY != 0);
    days.max(1)
}

/// Calendar dates are taken at UTC midnight.
fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// `part` as a percentage of `whole`; zero when `whole` is not positive.
///
/// Saturates at `Decimal::MAX`/`MIN` when a tiny cost basis makes the
/// ratio unrepresentable.
fn percent_of(part: Amount, whole: Amount) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .unwrap_or_else(|| saturated(part))
}

fn saturated(sign: Decimal) -> Decimal {
    if sign.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

/// CAGR in percent over `holding_days`.
///
/// A non-positive net income cannot be annualized with a fractional power,
/// so it is reported as a full loss.
fn annualized_return(total_cost: Amount, net_income: Amount, holding_days: i64) -> Decimal {
    if total_cost <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    if net_income <= Decimal::ZERO {
        return FULL_LOSS_RETURN;
    }

    let ratio = net_income
        .checked_div(total_cost)
        .and_then(|ratio| ratio.to_f64())
        .unwrap_or(f64::MAX);
    let years = holding_days as f64 / DAYS_PER_YEAR;
    let growth = (ratio.powf(1.0 / years) - 1.0) * 100.0;

    Decimal::from_f64(growth).unwrap_or(Decimal::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::Market;
    use chrono::{Duration, TimeZone};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
    }

    fn tw_trade() -> crate::domain::trade::TradeBuilder {
        Trade::builder()
            .market(Market::Tw)
            .name("TSMC")
            .quantity(dec!(1000))
            .buy_date(date(2024, 1, 1))
            .buy_price(dec!(100))
    }

    #[test]
    fn taiwan_sale_matches_broker_statement() {
        let trade = tw_trade().sold(dec!(110), date(2024, 7, 1)).build().unwrap();
        let calc = calculate(&trade, now());

        assert_eq!(calc.buy_amount, dec!(100000));
        assert_eq!(calc.buy_fee, dec!(142));
        assert_eq!(calc.total_cost, dec!(100142));
        assert_eq!(calc.sell_amount, dec!(110000));
        assert_eq!(calc.sell_fee, dec!(156));
        assert_eq!(calc.tax, dec!(330));
        assert_eq!(calc.net_income, dec!(109514));
        assert_eq!(calc.profit, dec!(9372));
        assert_eq!(calc.holding_days, 182);
        assert!(calc.is_sold);
        assert!(calc.expected_profit.is_none());

        let percent = calc.profit_percent.round_dp(3);
        assert_eq!(percent, dec!(9.359));

        let expected_cagr = ((109514.0_f64 / 100142.0).powf(365.0 / 182.0) - 1.0) * 100.0;
        let cagr = calc.annualized_return.to_f64().unwrap();
        assert!((cagr - expected_cagr).abs() < 1e-9, "cagr {cagr}");
        assert!((cagr - 19.6).abs() < 0.1, "cagr {cagr}");
    }

    #[test]
    fn sale_at_cost_loses_exactly_fees_and_tax() {
        let trade = tw_trade().sold(dec!(100), date(2024, 3, 1)).build().unwrap();
        let calc = calculate(&trade, now());

        assert_eq!(calc.profit, -(calc.buy_fee + calc.sell_fee + calc.tax));
        assert_eq!(calc.profit, -dec!(142) - dec!(142) - dec!(300));
    }

    #[test]
    fn fee_and_tax_are_floored_separately() {
        // 333 × 3 = 999; fee 1.423575 → 1, tax 2.997 → 2. Flooring the sum
        // (4.420575) would give 4 instead of 3.
        let trade = Trade::builder()
            .name("Tiny")
            .quantity(dec!(3))
            .buy_date(date(2024, 1, 1))
            .buy_price(dec!(333))
            .sold(dec!(333), date(2024, 1, 2))
            .build()
            .unwrap();
        let calc = calculate(&trade, now());

        assert_eq!(calc.sell_fee, dec!(1));
        assert_eq!(calc.tax, dec!(2));
        assert_eq!(calc.net_income, dec!(996));
    }

    #[test]
    fn us_market_has_no_tax() {
        let trade = tw_trade()
            .market(Market::Us)
            .sold(dec!(120), date(2024, 6, 1))
            .build()
            .unwrap();
        let calc = calculate(&trade, now());

        assert_eq!(calc.buy_fee, dec!(100));
        assert_eq!(calc.sell_fee, dec!(120));
        assert_eq!(calc.tax, Decimal::ZERO);
        assert_eq!(calc.profit, dec!(120000) - dec!(120) - dec!(100100));
    }

    #[test]
    fn zero_cost_trade_never_divides_by_zero() {
        let trade = tw_trade()
            .buy_price(Decimal::ZERO)
            .sold(dec!(10), date(2024, 2, 1))
            .build()
            .unwrap();
        let calc = calculate(&trade, now());

        assert_eq!(calc.total_cost, Decimal::ZERO);
        assert_eq!(calc.profit_percent, Decimal::ZERO);
        assert_eq!(calc.annualized_return, Decimal::ZERO);
        assert_eq!(calc.profit, calc.net_income);
    }

    #[test]
    fn worthless_sale_reports_full_loss() {
        let trade = tw_trade().sold(Decimal::ZERO, date(2024, 5, 1)).build().unwrap();
        let calc = calculate(&trade, now());

        assert_eq!(calc.net_income, Decimal::ZERO);
        assert_eq!(calc.annualized_return, FULL_LOSS_RETURN);
        assert_eq!(calc.profit, -calc.total_cost);
    }

    #[test]
    fn expected_price_projects_without_realizing() {
        let trade = tw_trade().held(Some(dec!(110))).build().unwrap();
        let calc = calculate(&trade, now());

        assert!(!calc.is_sold);
        assert_eq!(calc.profit, Decimal::ZERO);
        assert_eq!(calc.profit_percent, Decimal::ZERO);
        assert_eq!(calc.sell_amount, Decimal::ZERO);
        assert_eq!(calc.annualized_return, Decimal::ZERO);
        assert_eq!(calc.expected_profit, Some(dec!(9372)));
        assert_eq!(
            calc.expected_profit_percent.map(|p| p.round_dp(3)),
            Some(dec!(9.359))
        );
    }

    #[test]
    fn held_trade_without_projection_has_no_profit_fields() {
        let trade = tw_trade().build().unwrap();
        let calc = calculate(&trade, now());

        assert!(!calc.is_sold);
        assert_eq!(calc.total_cost, dec!(100142));
        assert_eq!(calc.net_income, Decimal::ZERO);
        assert!(calc.expected_profit.is_none());
        assert!(calc.expected_profit_percent.is_none());
    }

    #[test]
    fn held_trade_counts_days_until_now() {
        let trade = tw_trade().build().unwrap();
        let calc = calculate(&trade, now());

        // 2024 is a leap year: 366 full days plus twelve hours, rounded up.
        assert_eq!(calc.holding_days, 367);
    }

    #[test]
    fn same_day_counts_as_one_day() {
        let trade = tw_trade().sold(dec!(101), date(2024, 1, 1)).build().unwrap();
        assert_eq!(calculate(&trade, now()).holding_days, 1);

        let start = start_of_day(date(2024, 1, 1));
        assert_eq!(holding_days(start, start), 1);
        assert_eq!(holding_days(start, start + Duration::milliseconds(1)), 1);
    }

    #[test]
    fn holding_days_rounds_up_partial_days() {
        let start = start_of_day(date(2024, 1, 1));
        assert_eq!(holding_days(start, start + Duration::hours(25)), 2);
        assert_eq!(holding_days(start, start + Duration::days(3)), 3);
    }

    #[test]
    fn holding_days_uses_absolute_difference() {
        let start = start_of_day(date(2024, 1, 10));
        let earlier = start_of_day(date(2024, 1, 1));
        assert_eq!(holding_days(start, earlier), 9);

        // Buy date in the future relative to now.
        let trade = tw_trade().buy_date(date(2025, 1, 11)).build().unwrap();
        assert_eq!(calculate(&trade, now()).holding_days, 10);
    }

    #[test]
    fn fees_are_whole_and_non_negative() {
        let prices = [dec!(0), dec!(0.01), dec!(12.34), dec!(599.5), dec!(1234.567)];
        let quantities = [dec!(1), dec!(7), dec!(1000), dec!(0.5)];
        for market in Market::ALL {
            for price in prices {
                for quantity in quantities {
                    let trade = Trade::builder()
                        .market(market)
                        .name("X")
                        .quantity(quantity)
                        .buy_date(date(2024, 1, 1))
                        .buy_price(price)
                        .sold(price + dec!(1), date(2024, 2, 1))
                        .build()
                        .unwrap();
                    let calc = calculate(&trade, now());
                    for amount in [calc.buy_fee, calc.sell_fee, calc.tax] {
                        assert!(amount >= Decimal::ZERO);
                        assert_eq!(amount, amount.trunc());
                    }
                }
            }
        }
    }

    #[test]
    fn short_profitable_hold_annualizes_upward() {
        let trade = tw_trade().sold(dec!(120), date(2024, 1, 31)).build().unwrap();
        let calc = calculate(&trade, now());

        assert_eq!(calc.holding_days, 30);
        assert!(calc.annualized_return > calc.profit_percent);
    }

    #[test]
    fn extreme_return_saturates_instead_of_overflowing() {
        let trade = Trade::builder()
            .market(Market::Us)
            .name("Penny")
            .quantity(dec!(1))
            .buy_date(date(2024, 1, 1))
            .buy_price(dec!(0.000001))
            .sold(Decimal::from_scientific("1e21").unwrap(), date(2024, 7, 1))
            .build()
            .unwrap();
        let calc = calculate(&trade, now());

        assert!(calc.is_sold);
        assert_eq!(calc.profit_percent, Decimal::MAX);
        assert!(calc.annualized_return > Decimal::ZERO);

        let held = trade
            .to_builder()
            .held(Some(Decimal::from_scientific("1e21").unwrap()))
            .build()
            .unwrap();
        assert_eq!(
            calculate(&held, now()).expected_profit_percent,
            Some(Decimal::MAX)
        );
    }

    #[test]
    fn total_charges_sums_fees_and_tax() {
        let trade = tw_trade().sold(dec!(110), date(2024, 7, 1)).build().unwrap();
        assert_eq!(calculate(&trade, now()).total_charges(), dec!(628));
    }
}
