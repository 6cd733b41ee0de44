//! Interactive confirmations.

use std::io::IsTerminal;

use dialoguer::{theme::ColorfulTheme, Confirm};
use tracing::debug;

use super::output;
use crate::domain::{LedgerEntry, SplitPlan};
use crate::error::Result;
use crate::port::Confirmer;

/// [`Confirmer`] asking on the terminal.
///
/// `--yes` answers every question with yes. Without a terminal, and in JSON
/// mode, questions count as declined.
#[derive(Debug, Clone, Copy)]
pub struct TerminalConfirmer {
    assume_yes: bool,
}

impl TerminalConfirmer {
    #[must_use]
    pub const fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }

    fn ask(&self, question: &str) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        if output::is_json() || !std::io::stdin().is_terminal() {
            debug!(question, "No interactive terminal, treating as declined");
            return Ok(false);
        }

        let answer = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(question)
            .default(false)
            .interact()?;
        Ok(answer)
    }
}

impl Confirmer for TerminalConfirmer {
    fn confirm_split(&self, original: &LedgerEntry, plan: &SplitPlan) -> Result<bool> {
        let question = format!(
            "Sell {} of {} shares of {}? The record keeps the sold shares and a new record holds the remaining {}",
            plan.sold.quantity().normalize(),
            plan.original_quantity().normalize(),
            original.trade.label(),
            plan.remainder.quantity().normalize(),
        );
        self.ask(&question)
    }

    fn confirm_delete(&self, entry: &LedgerEntry) -> Result<bool> {
        let question = format!(
            "Delete {} bought {}?",
            entry.trade.label(),
            entry.trade.buy_date()
        );
        self.ask(&question)
    }
}
