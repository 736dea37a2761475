use chrono::Utc;
use database_layer::{Inventory, InventoryCounters};
use error_common::FormFields;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Vaccine create/update form
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct InventoryForm {
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,
    #[validate(range(min = 1, message = "Stocks is required."))]
    pub stocks: i32,
    #[validate(range(min = 1, message = "Buffer is required."))]
    pub buffer: i32,
    /// Overwrites the consumed counter on update; ignored on create
    #[serde(default)]
    pub consumed: Option<i32>,
    #[serde(default)]
    pub branch_id: Option<Uuid>,
}

impl FormFields for InventoryForm {
    const FIELDS: &'static [&'static str] = &["name", "stocks", "buffer", "consumed", "branch_id"];
}

impl InventoryForm {
    pub(crate) fn into_new_record(self) -> Inventory {
        let now = Utc::now();
        Inventory {
            id: Uuid::new_v4(),
            name: self.name,
            stocks: self.stocks,
            buffer: self.buffer,
            consumed: 0,
            branch_id: self.branch_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn apply_to(self, existing: Inventory) -> Inventory {
        Inventory {
            name: self.name,
            stocks: self.stocks,
            buffer: self.buffer,
            consumed: self.consumed.unwrap_or(existing.consumed),
            branch_id: self.branch_id.or(existing.branch_id),
            updated_at: Utc::now(),
            ..existing
        }
    }
}

/// Outcome of one ledger deduction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeductionReceipt {
    pub inventory_id: Uuid,
    pub quantity: i32,
    pub before: InventoryCounters,
    pub after: InventoryCounters,
    /// Whether the deduction reached into the buffer reserve
    pub drew_from_buffer: bool,
    /// Write attempts, more than one when concurrent deductions collided
    pub attempts: u32,
}
