//! Trade table rendering.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::output::{amount, percent};
use crate::application::ledger::LedgerRow;
use crate::domain::record::format_date;

#[derive(Tabled)]
struct TradeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Stock")]
    stock: String,
    #[tabled(rename = "Qty")]
    quantity: String,
    #[tabled(rename = "Bought")]
    buy_date: String,
    #[tabled(rename = "Buy")]
    buy_price: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Sold")]
    sell_date: String,
    #[tabled(rename = "Sell")]
    sell_price: String,
    #[tabled(rename = "Fees+Tax")]
    charges: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "Return")]
    profit_percent: String,
    #[tabled(rename = "Days")]
    holding_days: i64,
    #[tabled(rename = "Annual")]
    annualized: String,
}

const NONE: &str = "-";

impl TradeRow {
    fn from_row(row: &LedgerRow<'_>) -> Self {
        let trade = &row.entry.trade;
        let calc = &row.calculations;
        let disposition = trade.disposition();

        // Held trades show the projection, if any, in the profit columns.
        let (profit, profit_percent, annualized) = if calc.is_sold {
            (
                amount(calc.profit),
                percent(calc.profit_percent),
                percent(calc.annualized_return),
            )
        } else {
            match (calc.expected_profit, calc.expected_profit_percent) {
                (Some(profit), Some(pct)) => {
                    (format!("~{}", amount(profit)), format!("~{}", percent(pct)), NONE.into())
                }
                _ => (NONE.into(), NONE.into(), NONE.into()),
            }
        };
        let sell_price = match (disposition.sell_price(), disposition.expected_price()) {
            (Some(price), _) => price.normalize().to_string(),
            (None, Some(expected)) => format!("~{}", expected.normalize()),
            (None, None) => NONE.into(),
        };

        Self {
            id: row.entry.id.to_string(),
            stock: trade.label(),
            quantity: trade.quantity().normalize().to_string(),
            buy_date: format_date(trade.buy_date()),
            buy_price: trade.buy_price().normalize().to_string(),
            cost: amount(calc.total_cost),
            sell_date: disposition
                .sell_date()
                .map_or_else(|| NONE.to_string(), format_date),
            sell_price,
            charges: amount(calc.total_charges()),
            profit,
            profit_percent,
            holding_days: calc.holding_days,
            annualized,
        }
    }
}

/// Render rows as a table. `~` marks projections at the expected price.
#[must_use]
pub fn render(rows: &[LedgerRow<'_>]) -> String {
    let rows: Vec<TradeRow> = rows.iter().map(TradeRow::from_row).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}
