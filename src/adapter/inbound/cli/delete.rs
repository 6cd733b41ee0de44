//! Handler for the `delete` command.

use serde_json::json;

use super::command::DeleteArgs;
use super::output;
use super::prompt::TerminalConfirmer;
use super::session;
use crate::domain::TradeId;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Execute `delete`. Declining the confirmation changes nothing.
pub async fn execute(config: &Config, args: &DeleteArgs) -> Result<()> {
    let id = TradeId::new(args.id.as_str());
    let mut service = session::open_ledger(config, session::view(config)).await?;
    let label = service.entry(&id)?.trade.label();

    let deleted = service.delete(&id, &TerminalConfirmer::new(args.yes)).await?;
    output::record("deleted", &json!({ "id": id, "deleted": deleted }));
    if deleted {
        output::success(&format!("Deleted {label}"));
    } else {
        output::warning("Delete cancelled");
        if output::is_json() {
            output::hint("pass --yes to delete in JSON mode");
        }
    }
    Ok(())
}
