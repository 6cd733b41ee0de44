//! Handler for the `summary` command.

use chrono::Utc;
use serde::Serialize;

use super::command::MarketArg;
use super::output::{self, amount, percent, signed};
use super::session;
use crate::application::ledger::LedgerAction;
use crate::domain::{Market, PortfolioSummary};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryPayload<'a> {
    market: Market,
    #[serde(flatten)]
    summary: &'a PortfolioSummary,
    win_rate: rust_decimal::Decimal,
    trading_costs: rust_decimal::Decimal,
}

/// Execute `summary`.
pub async fn execute(config: &Config, args: &MarketArg) -> Result<()> {
    let mut service = session::open_ledger(config, session::view(config)).await?;
    if let Some(market) = args.market {
        service.dispatch(LedgerAction::SelectMarket(market));
    }
    let market = service.state().view().market;
    let summary = service.state().summary(Utc::now());

    output::record(
        "summary",
        &SummaryPayload {
            market,
            summary: &summary,
            win_rate: summary.win_rate(),
            trading_costs: summary.trading_costs(),
        },
    );
    if output::is_json() {
        return Ok(());
    }

    output::header(&format!("{market} summary"));
    output::field(
        "Realized",
        signed(summary.realized_profit, amount(summary.realized_profit)),
    );
    output::field(
        "Win rate",
        format!(
            "{} ({} of {} sold)",
            percent(summary.win_rate()),
            summary.winning_trades,
            summary.closed_trades
        ),
    );
    output::field("Volume", amount(summary.total_volume));
    output::field(
        "Fees + tax",
        format!(
            "{} ({} fees, {} tax)",
            amount(summary.trading_costs()),
            amount(summary.total_fees),
            amount(summary.total_tax)
        ),
    );
    output::field(
        "Holding",
        format!(
            "{} in {} open trades",
            amount(summary.holding_cost),
            summary.open_trades
        ),
    );
    Ok(())
}
