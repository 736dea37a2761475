//! Vaccine stock ledger
//!
//! A deduction draws from `stocks` first and only reaches into the `buffer`
//! reserve for the shortfall. The arithmetic lives in [`DeductionPlan`], a
//! pure function of the current counters. [`InventoryLedger`] reads the
//! counters, plans, and writes the result with the store's compare-and-adjust
//! primitive, re-reading and re-planning when a concurrent deduction got
//! there first.

use std::sync::Arc;

use database_layer::{ClinicStore, InventoryAdjustment, InventoryCounters};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{InventoryError, InventoryResult};
use crate::models::DeductionReceipt;

/// How the consumed counter grows on a deduction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsumedAccounting {
    /// Historical accounting: adds `min(stocks, quantity)` once from stocks,
    /// again when the buffer covers a shortfall, and only
    /// `min(stocks, quantity)` when stocks were already exhausted.
    #[default]
    Legacy,
    /// Adds exactly the quantity deducted
    Exact,
}

/// Deduction rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerPolicy {
    pub consumed_accounting: ConsumedAccounting,
    /// When false, a deduction that would leave the buffer below zero is
    /// rejected before anything is written
    pub allow_negative_buffer: bool,
    /// Re-plans allowed after losing a compare-and-adjust race
    pub max_conflict_retries: u32,
}

impl Default for LedgerPolicy {
    fn default() -> Self {
        Self {
            consumed_accounting: ConsumedAccounting::Legacy,
            allow_negative_buffer: true,
            max_conflict_retries: 5,
        }
    }
}

/// Counter deltas for one deduction against a known snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeductionPlan {
    pub adjustment: InventoryAdjustment,
    /// Units taken from the buffer
    pub shortfall: i32,
}

impl DeductionPlan {
    pub fn plan(
        counters: InventoryCounters,
        quantity: i32,
        policy: &LedgerPolicy,
    ) -> InventoryResult<Self> {
        if quantity <= 0 {
            return Err(InventoryError::Validation(
                "Validation Error: Quantity must be at least 1.".to_string(),
            ));
        }

        let available = counters.stocks;
        let taken = available.min(quantity);
        let legacy = policy.consumed_accounting == ConsumedAccounting::Legacy;

        let (adjustment, shortfall) = if available > 0 {
            let mut adjustment = InventoryAdjustment {
                stocks_delta: -taken,
                buffer_delta: 0,
                consumed_delta: taken,
            };
            let shortfall = (quantity - available).max(0);
            if shortfall > 0 {
                adjustment.buffer_delta = -shortfall;
                adjustment.consumed_delta = if legacy { taken.saturating_mul(2) } else { quantity };
            }
            (adjustment, shortfall)
        } else {
            let adjustment = InventoryAdjustment {
                stocks_delta: 0,
                buffer_delta: -quantity,
                consumed_delta: if legacy { taken } else { quantity },
            };
            (adjustment, quantity)
        };

        if !policy.allow_negative_buffer
            && i64::from(counters.buffer) - i64::from(shortfall) < 0
        {
            return Err(InventoryError::InsufficientStock {
                requested: quantity,
                available: available.max(0).saturating_add(counters.buffer.max(0)),
            });
        }

        Ok(Self { adjustment, shortfall })
    }
}

/// Applies deductions against stored inventory
#[derive(Clone)]
pub struct InventoryLedger {
    store: Arc<dyn ClinicStore>,
    policy: LedgerPolicy,
}

impl InventoryLedger {
    pub fn new(store: Arc<dyn ClinicStore>, policy: LedgerPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> &LedgerPolicy {
        &self.policy
    }

    /// Deduct `quantity` units from one inventory item.
    ///
    /// Fails with [`InventoryError::NotFound`] when the item does not exist
    /// and with [`InventoryError::Conflict`] when concurrent writers kept
    /// winning for more than `max_conflict_retries` re-plans.
    pub async fn deduct(&self, inventory_id: Uuid, quantity: i32) -> InventoryResult<DeductionReceipt> {
        let max_attempts = self.policy.max_conflict_retries.saturating_add(1);
        let mut attempts = 0u32;

        loop {
            attempts += 1;

            let current = self
                .store
                .find_inventory(inventory_id)
                .await
                .map_err(InventoryError::persistence("deduct inventory"))?
                .ok_or(InventoryError::NotFound(inventory_id))?;
            let before = current.counters();
            let plan = DeductionPlan::plan(before, quantity, &self.policy)?;

            let written = self
                .store
                .compare_and_adjust_inventory(inventory_id, before, plan.adjustment)
                .await
                .map_err(InventoryError::persistence("deduct inventory"))?;

            match written {
                Some(updated) => {
                    if plan.shortfall > 0 {
                        info!(
                            inventory_id = %inventory_id,
                            shortfall = plan.shortfall,
                            buffer = updated.buffer,
                            "Stocks exhausted, drew shortfall from buffer"
                        );
                    }
                    if updated.buffer < 0 {
                        warn!(inventory_id = %inventory_id, buffer = updated.buffer, "Inventory buffer is negative");
                    }
                    return Ok(DeductionReceipt {
                        inventory_id,
                        quantity,
                        before,
                        after: updated.counters(),
                        drew_from_buffer: plan.shortfall > 0,
                        attempts,
                    });
                }
                None if attempts < max_attempts => {
                    debug!(inventory_id = %inventory_id, attempts, "Inventory changed concurrently, re-planning");
                    tokio::task::yield_now().await;
                }
                None => {
                    warn!(inventory_id = %inventory_id, attempts, "Giving up on contended deduction");
                    return Err(InventoryError::Conflict { inventory_id, attempts });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counters(stocks: i32, buffer: i32, consumed: i32) -> InventoryCounters {
        InventoryCounters { stocks, buffer, consumed }
    }

    fn exact() -> LedgerPolicy {
        LedgerPolicy {
            consumed_accounting: ConsumedAccounting::Exact,
            ..Default::default()
        }
    }

    #[test]
    fn test_shortfall_example_legacy_double_counts_consumed() {
        let before = counters(5, 10, 0);
        let plan = DeductionPlan::plan(before, 8, &LedgerPolicy::default()).unwrap();
        assert_eq!(before.apply(plan.adjustment), counters(0, 7, 10));
        assert_eq!(plan.shortfall, 3);
    }

    #[test]
    fn test_shortfall_example_exact_accounting() {
        let before = counters(5, 10, 0);
        let plan = DeductionPlan::plan(before, 8, &exact()).unwrap();
        assert_eq!(before.apply(plan.adjustment), counters(0, 7, 8));
    }

    #[test]
    fn test_zero_stock_legacy_leaves_consumed() {
        let before = counters(0, 4, 12);
        let plan = DeductionPlan::plan(before, 3, &LedgerPolicy::default()).unwrap();
        assert_eq!(before.apply(plan.adjustment), counters(0, 1, 12));

        let plan = DeductionPlan::plan(before, 3, &exact()).unwrap();
        assert_eq!(before.apply(plan.adjustment), counters(0, 1, 15));
    }

    #[test]
    fn test_negative_stock_legacy_subtracts_from_consumed() {
        let before = counters(-2, 4, 10);
        let plan = DeductionPlan::plan(before, 1, &LedgerPolicy::default()).unwrap();
        assert_eq!(before.apply(plan.adjustment), counters(-2, 3, 8));
    }

    #[test]
    fn test_buffer_may_go_negative_by_default() {
        let before = counters(1, 1, 0);
        let plan = DeductionPlan::plan(before, 5, &LedgerPolicy::default()).unwrap();
        assert_eq!(before.apply(plan.adjustment).buffer, -3);
    }

    #[test]
    fn test_clamped_policy_rejects_overdraw() {
        let policy = LedgerPolicy {
            allow_negative_buffer: false,
            ..Default::default()
        };
        let err = DeductionPlan::plan(counters(1, 1, 0), 5, &policy).unwrap_err();
        assert!(matches!(err, InventoryError::InsufficientStock { requested: 5, available: 2 }));

        // exactly draining the buffer is fine
        assert!(DeductionPlan::plan(counters(1, 4, 0), 5, &policy).is_ok());
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let err = DeductionPlan::plan(counters(5, 5, 0), 0, &LedgerPolicy::default()).unwrap_err();
        assert_eq!(err.to_string(), "Validation Error: Quantity must be at least 1.");
    }

    #[test]
    fn test_policy_deserializes_lowercase() {
        let policy: LedgerPolicy =
            serde_json::from_str(r#"{"consumed_accounting":"exact","allow_negative_buffer":false}"#).unwrap();
        assert_eq!(policy.consumed_accounting, ConsumedAccounting::Exact);
        assert!(!policy.allow_negative_buffer);
        assert_eq!(policy.max_conflict_retries, 5);
    }
}
