//! Ledger service: optimistic writes with refetch on failure.

use tracing::{debug, error, info, warn};

use super::state::{LedgerAction, LedgerState, ViewState};
use crate::domain::{plan_edit, EditPlan, LedgerEntry, Quantity, SplitPlan, Trade, TradeId, TradePatch};
use crate::error::{Result, StoreError};
use crate::port::{Confirmer, TradeStore};

/// Result of [`LedgerService::edit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The record was overwritten with the edit.
    Updated(LedgerEntry),
    /// A partial sale was declined; the edit was applied to the whole holding.
    SplitDeclined(LedgerEntry),
    /// The record now holds the sold shares and a new record holds the rest.
    Split {
        sold: LedgerEntry,
        remainder: LedgerEntry,
    },
}

/// Application service owning the ledger state.
///
/// Updates and deletes are applied locally before the store write. When a
/// write fails the service reloads every record, so local state never
/// drifts from the store. Creates wait for the generated id.
pub struct LedgerService<S> {
    store: S,
    state: LedgerState,
}

impl<S: TradeStore> LedgerService<S> {
    pub fn new(store: S, view: ViewState) -> Self {
        Self {
            store,
            state: LedgerState::new(view),
        }
    }

    #[must_use]
    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply a view or state transition.
    pub fn dispatch(&mut self, action: LedgerAction) {
        self.state = std::mem::take(&mut self.state).apply(action);
    }

    /// Load every record. A failed read leaves an empty ledger.
    pub async fn load(&mut self) {
        match self.store.list().await {
            Ok(entries) => {
                debug!(count = entries.len(), "Loaded trades");
                self.dispatch(LedgerAction::Loaded(entries));
            }
            Err(err) => {
                warn!(error = %err, "Failed to load trades, showing an empty ledger");
                self.dispatch(LedgerAction::Loaded(Vec::new()));
            }
        }
    }

    /// Look up a loaded entry.
    pub fn entry(&self, id: &TradeId) -> Result<&LedgerEntry> {
        self.state.find(id).ok_or_else(|| {
            StoreError::NotFound {
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Create a trade. The entry appears once the store returns its id.
    pub async fn add(&mut self, trade: Trade) -> Result<LedgerEntry> {
        let id = self.store.create(&trade).await.map_err(|err| {
            error!(error = %err, "Failed to create trade");
            err
        })?;
        let entry = LedgerEntry::new(id, trade);
        self.dispatch(LedgerAction::Added(entry.clone()));
        Ok(entry)
    }

    /// Overwrite a record with `edited`, sending only the changed fields.
    pub async fn update(&mut self, id: &TradeId, edited: Trade) -> Result<LedgerEntry> {
        let original = self.entry(id)?.trade.clone();
        let patch = TradePatch::between(&original, &edited);
        let entry = LedgerEntry::new(id.clone(), edited.clone());
        if patch.is_empty() {
            debug!(id = %id, "Edit changes nothing");
            return Ok(entry);
        }

        self.dispatch(LedgerAction::Updated {
            id: id.clone(),
            trade: edited,
        });
        if let Err(err) = self.store.update(id, &patch).await {
            error!(id = %id, error = %err, "Failed to update trade, reloading");
            self.load().await;
            return Err(err);
        }
        Ok(entry)
    }

    /// Remove a record.
    pub async fn remove(&mut self, id: &TradeId) -> Result<()> {
        self.entry(id)?;
        self.dispatch(LedgerAction::Removed(id.clone()));
        if let Err(err) = self.store.delete(id).await {
            error!(id = %id, error = %err, "Failed to delete trade, reloading");
            self.load().await;
            return Err(err);
        }
        Ok(())
    }

    /// Remove a record after confirmation. Returns false when declined.
    pub async fn delete<C: Confirmer>(&mut self, id: &TradeId, confirmer: &C) -> Result<bool> {
        let entry = self.entry(id)?.clone();
        if !confirmer.confirm_delete(&entry)? {
            info!(id = %id, "Delete declined");
            return Ok(false);
        }
        self.remove(id).await?;
        Ok(true)
    }

    /// Persist an edit, splitting a partial sale into two records.
    ///
    /// `sell_quantity` is the number of shares the edit sells, `None` for
    /// the whole holding. A split needs confirmation; when declined the
    /// edit is applied to the whole holding instead.
    pub async fn edit<C: Confirmer>(
        &mut self,
        id: &TradeId,
        edited: Trade,
        sell_quantity: Option<Quantity>,
        confirmer: &C,
    ) -> Result<EditOutcome> {
        let original = self.entry(id)?.clone();
        match plan_edit(&original.trade, edited, sell_quantity)? {
            EditPlan::Update(trade) => self.update(id, trade).await.map(EditOutcome::Updated),
            EditPlan::Split(plan) => {
                if confirmer.confirm_split(&original, &plan)? {
                    self.split(id, plan).await
                } else {
                    info!(id = %id, "Split declined, updating whole holding");
                    self.update(id, plan.into_fallback())
                        .await
                        .map(EditOutcome::SplitDeclined)
                }
            }
        }
    }

    /// Write the sold record, then create the remainder.
    ///
    /// The first write is not rolled back if the second fails.
    async fn split(&mut self, id: &TradeId, plan: SplitPlan) -> Result<EditOutcome> {
        let original_quantity = plan.original_quantity();
        let SplitPlan {
            sold, remainder, ..
        } = plan;

        let sold = self.update(id, sold).await?;
        let remainder = match self.store.create(&remainder).await {
            Ok(remainder_id) => LedgerEntry::new(remainder_id, remainder),
            Err(err) => {
                error!(
                    id = %id,
                    error = %err,
                    "Sold portion saved but remainder was not created, reloading"
                );
                self.load().await;
                return Err(err);
            }
        };
        self.dispatch(LedgerAction::Added(remainder.clone()));

        info!(
            id = %id,
            remainder_id = %remainder.id,
            sold = %sold.trade.quantity(),
            remaining = %remainder.trade.quantity(),
            original = %original_quantity,
            "Split trade"
        );
        Ok(EditOutcome::Split { sold, remainder })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SPLIT_REMAINDER_MARKER;
    use crate::testkit::domain::{entry, held_trade, sell};
    use crate::testkit::confirm::FixedConfirmer;
    use crate::testkit::store::MemoryStore;
    use rust_decimal_macros::dec;

    async fn service_with(entries: Vec<LedgerEntry>) -> LedgerService<MemoryStore> {
        let mut service = LedgerService::new(MemoryStore::with_entries(entries), ViewState::default());
        service.load().await;
        service
    }

    #[tokio::test]
    async fn failed_load_yields_empty_ledger() {
        let store = MemoryStore::with_entries(vec![entry("a", held_trade("Alpha", dec!(100)))]);
        store.fail_next_list();
        let mut service = LedgerService::new(store, ViewState::default());

        service.load().await;
        assert!(service.state().entries().is_empty());
    }

    #[tokio::test]
    async fn add_waits_for_store_id() {
        let mut service = service_with(Vec::new()).await;
        let created = service.add(held_trade("Alpha", dec!(100))).await.unwrap();

        assert_eq!(service.state().entries(), std::slice::from_ref(&created));
        assert!(service.store().get(&created.id).is_some());
    }

    #[tokio::test]
    async fn failed_update_refetches() {
        let original = held_trade("Alpha", dec!(100));
        let mut service = service_with(vec![entry("a", original.clone())]).await;
        service.store().fail_next_write();

        let edited = original.to_builder().name("Alpha Pro").build().unwrap();
        let result = service.update(&TradeId::new("a"), edited).await;

        assert!(result.is_err());
        assert_eq!(service.state().entries()[0].trade, original);
        assert_eq!(service.store().list_calls(), 2);
    }

    #[tokio::test]
    async fn failed_delete_refetches() {
        let mut service = service_with(vec![entry("a", held_trade("Alpha", dec!(100)))]).await;
        service.store().fail_next_write();

        assert!(service.remove(&TradeId::new("a")).await.is_err());
        assert_eq!(service.state().entries().len(), 1);
    }

    #[tokio::test]
    async fn unchanged_edit_skips_store() {
        let original = held_trade("Alpha", dec!(100));
        let mut service = service_with(vec![entry("a", original.clone())]).await;

        service.update(&TradeId::new("a"), original).await.unwrap();
        assert_eq!(service.store().update_calls(), 0);
    }

    #[tokio::test]
    async fn confirmed_partial_sale_splits_records() {
        let original = held_trade("Alpha", dec!(100));
        let mut service = service_with(vec![entry("a", original.clone())]).await;

        let outcome = service
            .edit(
                &TradeId::new("a"),
                sell(&original),
                Some(dec!(400)),
                &FixedConfirmer::yes(),
            )
            .await
            .unwrap();

        let EditOutcome::Split { sold, remainder } = outcome else {
            panic!("expected split, got {outcome:?}");
        };
        assert_eq!(sold.trade.quantity(), dec!(400));
        assert!(sold.trade.is_sold());
        assert_eq!(remainder.trade.quantity(), dec!(600));
        assert!(!remainder.trade.is_sold());
        assert_eq!(remainder.trade.note(), Some(SPLIT_REMAINDER_MARKER));

        assert_eq!(service.state().entries().len(), 2);
        assert_eq!(service.store().get(&TradeId::new("a")).unwrap(), sold.trade);
        assert_eq!(service.store().get(&remainder.id).unwrap(), remainder.trade);
    }

    #[tokio::test]
    async fn declined_split_updates_whole_holding() {
        let original = held_trade("Alpha", dec!(100));
        let mut service = service_with(vec![entry("a", original.clone())]).await;

        let outcome = service
            .edit(
                &TradeId::new("a"),
                sell(&original),
                Some(dec!(400)),
                &FixedConfirmer::no(),
            )
            .await
            .unwrap();

        let EditOutcome::SplitDeclined(updated) = outcome else {
            panic!("expected declined split, got {outcome:?}");
        };
        assert_eq!(updated.trade.quantity(), dec!(1000));
        assert!(updated.trade.is_sold());
        assert_eq!(service.state().entries().len(), 1);
    }

    #[tokio::test]
    async fn declined_split_keeps_edited_quantity() {
        let original = held_trade("Alpha", dec!(100));
        let mut service = service_with(vec![entry("a", original.clone())]).await;
        let edited = sell(&original).with_quantity(dec!(800)).unwrap();

        let outcome = service
            .edit(
                &TradeId::new("a"),
                edited.clone(),
                Some(dec!(400)),
                &FixedConfirmer::no(),
            )
            .await
            .unwrap();

        let EditOutcome::SplitDeclined(updated) = outcome else {
            panic!("expected declined split, got {outcome:?}");
        };
        assert_eq!(updated.trade.quantity(), dec!(800));
        assert_eq!(service.store().get(&TradeId::new("a")).unwrap(), edited);
        assert_eq!(service.store().len(), 1);
    }

    #[tokio::test]
    async fn failed_remainder_create_keeps_sold_write() {
        let original = held_trade("Alpha", dec!(100));
        let mut service = service_with(vec![entry("a", original.clone())]).await;
        service.store().fail_next_create();

        let result = service
            .edit(
                &TradeId::new("a"),
                sell(&original),
                Some(dec!(400)),
                &FixedConfirmer::yes(),
            )
            .await;

        assert!(result.is_err());
        let entries = service.state().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].trade.quantity(), dec!(400));
    }

    #[tokio::test]
    async fn declined_delete_keeps_entry() {
        let mut service = service_with(vec![entry("a", held_trade("Alpha", dec!(100)))]).await;

        let deleted = service
            .delete(&TradeId::new("a"), &FixedConfirmer::no())
            .await
            .unwrap();
        assert!(!deleted);
        assert_eq!(service.state().entries().len(), 1);

        let deleted = service
            .delete(&TradeId::new("a"), &FixedConfirmer::yes())
            .await
            .unwrap();
        assert!(deleted);
        assert!(service.state().entries().is_empty());
        assert!(service.store().get(&TradeId::new("a")).is_none());
    }

    #[tokio::test]
    async fn edit_of_unknown_id_is_not_found() {
        let mut service = service_with(Vec::new()).await;
        let err = service
            .edit(
                &TradeId::new("missing"),
                held_trade("X", dec!(1)),
                None,
                &FixedConfirmer::yes(),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Store(StoreError::NotFound { .. })
        ));
    }
}
