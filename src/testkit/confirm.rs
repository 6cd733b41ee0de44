//! Scripted confirmation answers.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{LedgerEntry, SplitPlan};
use crate::error::Result;
use crate::port::Confirmer;

/// Answers every question the same way and counts how often it was asked.
#[derive(Debug, Default)]
pub struct FixedConfirmer {
    answer: bool,
    asked: AtomicUsize,
}

impl FixedConfirmer {
    pub fn yes() -> Self {
        Self {
            answer: true,
            ..Self::default()
        }
    }

    pub fn no() -> Self {
        Self::default()
    }

    /// Number of questions asked so far.
    pub fn asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }

    fn answer(&self) -> Result<bool> {
        self.asked.fetch_add(1, Ordering::SeqCst);
        Ok(self.answer)
    }
}

impl Confirmer for FixedConfirmer {
    fn confirm_split(&self, _original: &LedgerEntry, _plan: &SplitPlan) -> Result<bool> {
        self.answer()
    }

    fn confirm_delete(&self, _entry: &LedgerEntry) -> Result<bool> {
        self.answer()
    }
}
