//! Handler for the `list` command.

use chrono::Utc;

use super::command::ListArgs;
use super::output;
use super::session;
use super::table;
use super::view::TradePayload;
use crate::application::ledger::LedgerAction;
use crate::domain::{SortConfig, SortDirection};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Execute `list`.
pub async fn execute(config: &Config, args: &ListArgs) -> Result<()> {
    let mut service = session::open_ledger(config, session::view(config)).await?;
    if let Some(market) = args.market.market {
        service.dispatch(LedgerAction::SelectMarket(market));
    }
    let current = service.state().view().sort;
    let direction = if args.asc {
        SortDirection::Asc
    } else if args.desc {
        SortDirection::Desc
    } else if args.sort.is_some_and(|key| key != current.key) {
        SortDirection::Desc
    } else {
        current.direction
    };
    let key = args.sort.unwrap_or(current.key);
    service.dispatch(LedgerAction::SetSort(SortConfig::new(key, direction)));

    let state = service.state();
    let view = state.view();
    let rows = state.visible_rows(Utc::now());

    for row in &rows {
        output::record("trade", &TradePayload::new(row.entry, &row.calculations));
    }
    if output::is_json() {
        return Ok(());
    }

    output::header(&format!(
        "{} trades by {} {}",
        view.market, view.sort.key, view.sort.direction
    ));
    if rows.is_empty() {
        output::note(&format!("No {} trades recorded", view.market));
        output::hint("add one with `stockledger add --name <NAME> --quantity <Q> --buy-price <P>`");
        return Ok(());
    }
    output::block(&table::render(&rows));
    Ok(())
}
