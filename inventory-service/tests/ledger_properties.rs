#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Property-based tests for the deduction arithmetic.
//!
//! Invariants tested:
//! - When stocks cover the request, buffer is untouched and stocks and
//!   consumed move by exactly the quantity
//! - When stocks are positive but short, stocks drain to zero and buffer
//!   covers exactly the shortfall
//! - When stocks are exhausted, buffer drops by the full quantity and stocks
//!   stay put

use std::sync::Arc;

use chrono::Utc;
use database_layer::{ClinicStore, InMemoryStore, Inventory, InventoryCounters};
use inventory_service::{ConsumedAccounting, DeductionPlan, InventoryLedger, LedgerPolicy};
use proptest::prelude::*;
use uuid::Uuid;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn policy_from_seed(seed: bool) -> LedgerPolicy {
    LedgerPolicy {
        consumed_accounting: if seed { ConsumedAccounting::Legacy } else { ConsumedAccounting::Exact },
        ..Default::default()
    }
}

fn apply(counters: InventoryCounters, quantity: i32, policy: &LedgerPolicy) -> InventoryCounters {
    let plan = DeductionPlan::plan(counters, quantity, policy).unwrap();
    counters.apply(plan.adjustment)
}

/// Run one deduction through the ledger against a fresh in-memory store.
fn deduct_through_store(counters: InventoryCounters, quantity: i32) -> InventoryCounters {
    let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
    runtime.block_on(async {
        let store = Arc::new(InMemoryStore::new());
        let now = Utc::now();
        let item = store
            .create_inventory(Inventory {
                id: Uuid::new_v4(),
                name: "Verorab".to_string(),
                stocks: counters.stocks,
                buffer: counters.buffer,
                consumed: counters.consumed,
                branch_id: None,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
        let ledger = InventoryLedger::new(store, LedgerPolicy::default());
        ledger.deduct(item.id, quantity).await.unwrap().after
    })
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    /// Stocks cover the request: buffer untouched, exact movement elsewhere.
    #[test]
    fn prop_stock_priority(
        quantity in 1i32..=500,
        extra in 0i32..=500,
        buffer in -100i32..=500,
        consumed in 0i32..=10_000,
        legacy in any::<bool>(),
    ) {
        let before = InventoryCounters { stocks: quantity + extra, buffer, consumed };
        let after = apply(before, quantity, &policy_from_seed(legacy));

        prop_assert_eq!(after.buffer, before.buffer);
        prop_assert_eq!(after.stocks, before.stocks - quantity);
        prop_assert_eq!(after.consumed, before.consumed + quantity);
    }

    /// Positive but short stocks: drain to zero, buffer covers the rest.
    #[test]
    fn prop_buffer_fallback(
        stocks in 1i32..=500,
        shortfall in 1i32..=500,
        buffer in -100i32..=500,
        legacy in any::<bool>(),
    ) {
        let quantity = stocks + shortfall;
        let before = InventoryCounters { stocks, buffer, consumed: 0 };
        let policy = policy_from_seed(legacy);
        let after = apply(before, quantity, &policy);

        prop_assert_eq!(after.stocks, 0);
        prop_assert_eq!(after.buffer, buffer - shortfall);
        let expected_consumed = match policy.consumed_accounting {
            ConsumedAccounting::Legacy => 2 * stocks,
            ConsumedAccounting::Exact => quantity,
        };
        prop_assert_eq!(after.consumed, expected_consumed);
    }

    /// Exhausted stocks: buffer drops by the full quantity.
    #[test]
    fn prop_zero_stock_path(
        stocks in -50i32..=0,
        quantity in 1i32..=500,
        buffer in -100i32..=500,
        legacy in any::<bool>(),
    ) {
        let before = InventoryCounters { stocks, buffer, consumed: 1_000 };
        let after = apply(before, quantity, &policy_from_seed(legacy));

        prop_assert_eq!(after.stocks, stocks);
        prop_assert_eq!(after.buffer, buffer - quantity);
    }

    /// The ledger writes exactly what the plan computes.
    #[test]
    fn prop_ledger_matches_plan(
        stocks in -10i32..=50,
        buffer in -10i32..=50,
        quantity in 1i32..=60,
    ) {
        let before = InventoryCounters { stocks, buffer, consumed: 0 };
        let expected = apply(before, quantity, &LedgerPolicy::default());
        prop_assert_eq!(deduct_through_store(before, quantity), expected);
    }
}
