//! Confirmation port for edits that rewrite more than one record.

use crate::domain::{LedgerEntry, SplitPlan};
use crate::error::Result;

/// Asks the user before destructive or multi-record changes.
pub trait Confirmer: Send + Sync {
    /// Whether to split `original` into the sold and remainder records.
    fn confirm_split(&self, original: &LedgerEntry, plan: &SplitPlan) -> Result<bool>;

    /// Whether to delete `entry`.
    fn confirm_delete(&self, entry: &LedgerEntry) -> Result<bool>;
}
