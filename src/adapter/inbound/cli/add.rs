//! Handler for the `add` command.

use chrono::Utc;

use super::command::AddArgs;
use super::output;
use super::session;
use super::show::print_entry;
use super::view::TradePayload;
use crate::domain::calculate;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Execute `add`.
pub async fn execute(config: &Config, args: &AddArgs) -> Result<()> {
    let now = Utc::now();
    let trade = args.fields.form().into_new_trade(now.date_naive())?;
    let mut service = session::open_ledger(config, session::view(config)).await?;

    let spinner = output::spinner("Saving trade");
    let entry = match service.add(trade).await {
        Ok(entry) => entry,
        Err(err) => {
            output::spinner_fail(&spinner, "Trade was not saved");
            return Err(err);
        }
    };
    output::spinner_clear(&spinner);

    let calc = calculate(&entry.trade, now);
    output::record("created", &TradePayload::new(&entry, &calc));
    output::success(&format!("Recorded {} as {}", entry.trade.label(), entry.id));
    print_entry(&entry, &calc);
    Ok(())
}
