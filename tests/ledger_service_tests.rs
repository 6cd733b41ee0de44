use rust_decimal_macros::dec;
use stockledger::application::ledger::{EditOutcome, LedgerAction, LedgerService, ViewState};
use stockledger::domain::{Market, SortKey, TradeId, SPLIT_REMAINDER_MARKER};
use stockledger::testkit::confirm::FixedConfirmer;
use stockledger::testkit::domain::{base, entry, held_trade, now, sell, sold_trade};
use stockledger::testkit::store::MemoryStore;

async fn loaded(store: MemoryStore) -> LedgerService<MemoryStore> {
    let mut service = LedgerService::new(store, ViewState::default());
    service.load().await;
    service
}

#[tokio::test]
async fn partial_sale_survives_reload_and_feeds_summary() {
    let store = MemoryStore::with_entries(vec![entry("tsmc", held_trade("TSMC", dec!(100)))]);
    let mut service = loaded(store).await;
    let id = TradeId::new("tsmc");
    let edited = sell(&service.entry(&id).unwrap().trade);

    let confirmer = FixedConfirmer::yes();
    let outcome = service
        .edit(&id, edited, Some(dec!(400)), &confirmer)
        .await
        .unwrap();
    assert_eq!(confirmer.asked(), 1);
    let EditOutcome::Split { sold, remainder } = outcome else {
        panic!("expected a split, got {outcome:?}");
    };
    assert_eq!(sold.id, id);
    assert_eq!(remainder.trade.note(), Some(SPLIT_REMAINDER_MARKER));

    service.load().await;
    let entries = service.state().entries();
    assert_eq!(entries.len(), 2);
    let total: rust_decimal::Decimal = entries.iter().map(|e| e.trade.quantity()).sum();
    assert_eq!(total, dec!(1000));

    // Sold 400: 44000 - 62 fee - 132 tax - (40000 + 57) cost.
    let summary = service.state().summary(now());
    assert_eq!(summary.closed_trades, 1);
    assert_eq!(summary.open_trades, 1);
    assert_eq!(summary.realized_profit, dec!(3749));
    assert_eq!(summary.holding_cost, dec!(60085));
}

#[tokio::test]
async fn market_filter_and_sort_shape_visible_rows() {
    let us = |name: &str, buy| {
        base(name, buy)
            .market(Market::Us)
            .quantity(dec!(10))
            .sold(dec!(150), stockledger::testkit::domain::date(2024, 6, 1))
            .build()
            .unwrap()
    };
    let store = MemoryStore::with_entries(vec![
        entry("tw", sold_trade("TSMC", dec!(100), dec!(110))),
        entry("aapl", us("Apple", dec!(140))),
        entry("msft", us("Microsoft", dec!(100))),
    ]);
    let mut service = loaded(store).await;

    service.dispatch(LedgerAction::SelectMarket(Market::Us));
    service.dispatch(LedgerAction::SortBy(SortKey::Profit));

    let rows = service.state().visible_rows(now());
    let ids: Vec<&str> = rows.iter().map(|row| row.entry.id.as_str()).collect();
    assert_eq!(ids, ["msft", "aapl"]);

    service.dispatch(LedgerAction::SortBy(SortKey::Profit));
    let rows = service.state().visible_rows(now());
    assert_eq!(rows[0].entry.id.as_str(), "aapl");

    let summary = service.state().summary(now());
    assert_eq!(summary.closed_trades, 2);
    assert_eq!(summary.open_trades, 0);
}

#[tokio::test]
async fn delete_requires_confirmation() {
    let store = MemoryStore::with_entries(vec![entry("a", held_trade("Alpha", dec!(100)))]);
    let mut service = loaded(store).await;
    let id = TradeId::new("a");

    assert!(!service.delete(&id, &FixedConfirmer::no()).await.unwrap());
    assert_eq!(service.store().len(), 1);

    assert!(service.delete(&id, &FixedConfirmer::yes()).await.unwrap());
    assert!(service.store().is_empty());
    assert!(service.state().entries().is_empty());
}

#[tokio::test]
async fn edit_of_unknown_trade_is_not_found() {
    let mut service = loaded(MemoryStore::new()).await;
    let result = service
        .edit(
            &TradeId::new("missing"),
            held_trade("Alpha", dec!(100)),
            None,
            &FixedConfirmer::yes(),
        )
        .await;
    assert!(result.is_err());
}
