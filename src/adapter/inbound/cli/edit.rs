//! Handler for the `edit` command.

use chrono::Utc;

use super::command::EditArgs;
use super::form::{parse_quantity, Clearing};
use super::output;
use super::prompt::TerminalConfirmer;
use super::session;
use super::show::print_entry;
use super::view::TradePayload;
use crate::application::ledger::EditOutcome;
use crate::domain::{calculate, LedgerEntry, TradeId};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Execute `edit`.
///
/// When `--sell-quantity` is below the shares held the trade is split
/// after confirmation. Without confirmation the edit applies to the whole
/// holding.
pub async fn execute(config: &Config, args: &EditArgs) -> Result<()> {
    let id = TradeId::new(args.id.as_str());
    let sell_quantity = args
        .sell_quantity
        .as_deref()
        .map(parse_quantity)
        .transpose()?;
    let clearing = Clearing {
        sale: args.clear_sale,
        expected: args.clear_expected,
    };

    let mut service = session::open_ledger(config, session::view(config)).await?;
    let original = service.entry(&id)?.trade.clone();
    let edited = args.fields.form().apply_to(&original, clearing)?;

    let confirmer = TerminalConfirmer::new(args.yes);
    let outcome = service.edit(&id, edited, sell_quantity, &confirmer).await?;

    match outcome {
        EditOutcome::Updated(entry) => {
            output::success(&format!("Updated {}", entry.trade.label()));
            emit("updated", &entry);
        }
        EditOutcome::SplitDeclined(entry) => {
            output::warning("Split declined, the sale was applied to the whole holding");
            emit("updated", &entry);
        }
        EditOutcome::Split { sold, remainder } => {
            output::success(&format!(
                "Split {}: {} sold, {} kept as {}",
                sold.trade.label(),
                sold.trade.quantity().normalize(),
                remainder.trade.quantity().normalize(),
                remainder.id
            ));
            emit("updated", &sold);
            emit("created", &remainder);
        }
    }
    Ok(())
}

fn emit(kind: &str, entry: &LedgerEntry) {
    let calc = calculate(&entry.trade, Utc::now());
    output::record(kind, &TradePayload::new(entry, &calc));
    print_entry(entry, &calc);
}
