use std::sync::Arc;

use chrono::Utc;
use database_layer::{ClinicStore, InMemoryStore, Inventory, InventoryCounters};
use futures::future::join_all;
use inventory_service::{ConsumedAccounting, InventoryError, InventoryLedger, LedgerPolicy};
use uuid::Uuid;

async fn seed(store: &InMemoryStore, stocks: i32, buffer: i32) -> Uuid {
    let now = Utc::now();
    store
        .create_inventory(Inventory {
            id: Uuid::new_v4(),
            name: "Speeda".to_string(),
            stocks,
            buffer,
            consumed: 0,
            branch_id: None,
            created_at: now,
            updated_at: now,
        })
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn test_deduct_shortfall_scenario() {
    let store = Arc::new(InMemoryStore::new());
    let id = seed(&store, 5, 10).await;
    let ledger = InventoryLedger::new(store.clone(), LedgerPolicy::default());

    let receipt = ledger.deduct(id, 8).await.unwrap();
    assert!(receipt.drew_from_buffer);
    assert_eq!(receipt.before, InventoryCounters { stocks: 5, buffer: 10, consumed: 0 });
    assert_eq!(receipt.after, InventoryCounters { stocks: 0, buffer: 7, consumed: 10 });
    assert_eq!(store.find_inventory(id).await.unwrap().unwrap().counters(), receipt.after);
}

#[tokio::test]
async fn test_deduct_exact_accounting() {
    let store = Arc::new(InMemoryStore::new());
    let id = seed(&store, 5, 10).await;
    let policy = LedgerPolicy {
        consumed_accounting: ConsumedAccounting::Exact,
        ..Default::default()
    };
    let ledger = InventoryLedger::new(store, policy);

    let receipt = ledger.deduct(id, 8).await.unwrap();
    assert_eq!(receipt.after.consumed, 8);
}

#[tokio::test]
async fn test_deduct_missing_inventory() {
    let ledger = InventoryLedger::new(Arc::new(InMemoryStore::new()), LedgerPolicy::default());
    let missing = Uuid::new_v4();

    let err = ledger.deduct(missing, 1).await.unwrap_err();
    assert!(matches!(err, InventoryError::NotFound(id) if id == missing));
}

#[tokio::test]
async fn test_clamped_buffer_leaves_counters_untouched() {
    let store = Arc::new(InMemoryStore::new());
    let id = seed(&store, 2, 1).await;
    let policy = LedgerPolicy {
        allow_negative_buffer: false,
        ..Default::default()
    };
    let ledger = InventoryLedger::new(store.clone(), policy);

    let err = ledger.deduct(id, 4).await.unwrap_err();
    assert!(matches!(err, InventoryError::InsufficientStock { requested: 4, available: 3 }));
    assert_eq!(
        store.find_inventory(id).await.unwrap().unwrap().counters(),
        InventoryCounters { stocks: 2, buffer: 1, consumed: 0 }
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_deductions_do_not_lose_updates() {
    let store = Arc::new(InMemoryStore::new());
    let id = seed(&store, 20, 10).await;
    let policy = LedgerPolicy {
        consumed_accounting: ConsumedAccounting::Exact,
        max_conflict_retries: 1_000,
        ..Default::default()
    };
    let ledger = InventoryLedger::new(store.clone(), policy);

    let tasks = (0..25).map(|_| {
        let ledger = ledger.clone();
        tokio::spawn(async move { ledger.deduct(id, 1).await })
    });
    for result in join_all(tasks).await {
        result.unwrap().unwrap();
    }

    let after = store.find_inventory(id).await.unwrap().unwrap().counters();
    assert_eq!(after, InventoryCounters { stocks: 0, buffer: 5, consumed: 25 });
}
