//! Handler for the `show` command.

use chrono::Utc;

use super::command::IdArg;
use super::output::{self, amount, percent, signed};
use super::session;
use super::view::TradePayload;
use crate::domain::record::format_date;
use crate::domain::{calculate, Disposition, LedgerEntry, TradeCalculations, TradeId};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Execute `show`.
pub async fn execute(config: &Config, args: &IdArg) -> Result<()> {
    let service = session::open_ledger(config, session::view(config)).await?;
    let entry = service.entry(&TradeId::new(args.id.as_str()))?;
    let calc = calculate(&entry.trade, Utc::now());

    output::record("trade", &TradePayload::new(entry, &calc));
    print_entry(entry, &calc);
    Ok(())
}

/// Print a stored trade with its metrics.
pub fn print_entry(entry: &LedgerEntry, calc: &TradeCalculations) {
    if output::is_json() {
        return;
    }
    let trade = &entry.trade;
    output::section(&trade.label());
    output::field("ID", &entry.id);
    output::field("Market", trade.market());
    output::field("Quantity", trade.quantity().normalize());
    output::field(
        "Bought",
        format!(
            "{} @ {}",
            format_date(trade.buy_date()),
            trade.buy_price().normalize()
        ),
    );
    if let Disposition::Sold { price, date } = trade.disposition() {
        output::field(
            "Sold",
            format!("{} @ {}", format_date(*date), price.normalize()),
        );
    }
    if let Some(expected) = trade.disposition().expected_price() {
        output::field("Expected", expected.normalize());
    }
    if let Some(note) = trade.note() {
        output::field("Note", note);
    }
    print_metrics(calc);
}

/// Print the derived metrics of a trade.
pub fn print_metrics(calc: &TradeCalculations) {
    if output::is_json() {
        return;
    }
    output::field("Buy amount", amount(calc.buy_amount));
    output::field("Buy fee", amount(calc.buy_fee));
    output::field("Total cost", amount(calc.total_cost));
    output::field("Holding", format!("{} days", calc.holding_days));

    if calc.is_sold {
        output::field("Sell amount", amount(calc.sell_amount));
        output::field("Sell fee", amount(calc.sell_fee));
        output::field("Tax", amount(calc.tax));
        output::field("Net income", amount(calc.net_income));
        output::field("Profit", signed(calc.profit, amount(calc.profit)));
        output::field(
            "Return",
            signed(calc.profit_percent, percent(calc.profit_percent)),
        );
        output::field(
            "Annualized",
            signed(calc.annualized_return, percent(calc.annualized_return)),
        );
    } else if let (Some(profit), Some(pct)) = (calc.expected_profit, calc.expected_profit_percent) {
        output::field("Expected", signed(profit, amount(profit)));
        output::field("Expected %", signed(pct, percent(pct)));
    }
}
