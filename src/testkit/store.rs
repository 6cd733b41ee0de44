//! In-memory trade store.

use std::future::{ready, Future};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;
use uuid::Uuid;

use crate::domain::{LedgerEntry, Trade, TradeId, TradePatch};
use crate::error::{Result, StoreError};
use crate::port::TradeStore;

/// [`TradeStore`] keeping records in insertion order.
///
/// Patches merge the way the document store merges them. Each `fail_next_*`
/// call makes the next matching operation return
/// [`StoreError::Unavailable`] without touching the records.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<LedgerEntry>>,
    fail_list: AtomicBool,
    fail_create: AtomicBool,
    fail_write: AtomicBool,
    list_calls: AtomicUsize,
    update_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<LedgerEntry>) -> Self {
        Self {
            records: Mutex::new(entries),
            ..Self::default()
        }
    }

    pub fn fail_next_list(&self) {
        self.fail_list.store(true, Ordering::SeqCst);
    }

    pub fn fail_next_create(&self) {
        self.fail_create.store(true, Ordering::SeqCst);
    }

    /// Fail the next update or delete.
    pub fn fail_next_write(&self) {
        self.fail_write.store(true, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    /// Stored trade for `id`.
    pub fn get(&self, id: &TradeId) -> Option<Trade> {
        self.records
            .lock()
            .iter()
            .find(|e| &e.id == id)
            .map(|e| e.trade.clone())
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    fn injected(flag: &AtomicBool, operation: &str) -> Result<()> {
        if flag.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!("injected {operation} failure")).into());
        }
        Ok(())
    }

    fn list_now(&self) -> Result<Vec<LedgerEntry>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Self::injected(&self.fail_list, "list")?;
        Ok(self.records.lock().clone())
    }

    fn create_now(&self, trade: &Trade) -> Result<TradeId> {
        Self::injected(&self.fail_create, "create")?;
        let id = TradeId::new(Uuid::new_v4().simple().to_string());
        self.records
            .lock()
            .push(LedgerEntry::new(id.clone(), trade.clone()));
        Ok(id)
    }

    fn update_now(&self, id: &TradeId, patch: &TradePatch) -> Result<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        Self::injected(&self.fail_write, "update")?;
        let mut records = self.records.lock();
        let entry = records
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        entry.trade = patch.apply_to(&entry.trade)?;
        Ok(())
    }

    fn delete_now(&self, id: &TradeId) -> Result<()> {
        Self::injected(&self.fail_write, "delete")?;
        self.records.lock().retain(|e| &e.id != id);
        Ok(())
    }
}

impl TradeStore for MemoryStore {
    fn list(&self) -> impl Future<Output = Result<Vec<LedgerEntry>>> + Send {
        ready(self.list_now())
    }

    fn create(&self, trade: &Trade) -> impl Future<Output = Result<TradeId>> + Send {
        ready(self.create_now(trade))
    }

    fn update(&self, id: &TradeId, patch: &TradePatch) -> impl Future<Output = Result<()>> + Send {
        ready(self.update_now(id, patch))
    }

    fn delete(&self, id: &TradeId) -> impl Future<Output = Result<()>> + Send {
        ready(self.delete_now(id))
    }
}
