//! Handler for the `preview` command.

use chrono::Utc;

use super::command::PreviewArgs;
use super::output;
use super::show::print_metrics;
use super::view::PreviewPayload;
use crate::domain::{calculate, TradeRecord};
use crate::error::Result;

/// Execute `preview`. Nothing is stored.
pub fn execute(args: &PreviewArgs) -> Result<()> {
    let now = Utc::now();
    let trade = args.form().into_new_trade(now.date_naive())?;
    let calc = calculate(&trade, now);

    output::record(
        "preview",
        &PreviewPayload {
            record: TradeRecord::from_trade(&trade),
            calculations: &calc,
        },
    );
    output::header(&format!("{} preview", trade.market()));
    print_metrics(&calc);
    Ok(())
}
