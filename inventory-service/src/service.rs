use std::sync::Arc;

use database_layer::{ClinicStore, Inventory};
use error_common::{join_validation_errors, FormFields};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::{InventoryError, InventoryResult};
use crate::models::InventoryForm;

/// Vaccine inventory administration
#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn ClinicStore>,
}

impl InventoryService {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }

    fn validate(form: &InventoryForm) -> InventoryResult<()> {
        form.validate()
            .map_err(|errors| InventoryError::Validation(join_validation_errors(&errors, InventoryForm::FIELDS)))
    }

    /// Add a vaccine with a zero consumed counter
    pub async fn create_inventory(&self, form: InventoryForm) -> InventoryResult<Inventory> {
        Self::validate(&form)?;
        let created = self
            .store
            .create_inventory(form.into_new_record())
            .await
            .map_err(InventoryError::persistence("add vaccine"))?;
        info!(inventory_id = %created.id, "Vaccine added");
        Ok(created)
    }

    /// Replace name and counters; `consumed` is only overwritten when given
    pub async fn update_inventory(&self, id: Uuid, form: InventoryForm) -> InventoryResult<Inventory> {
        Self::validate(&form)?;
        let existing = self
            .store
            .find_inventory(id)
            .await
            .map_err(InventoryError::persistence("update vaccine"))?
            .ok_or(InventoryError::NotFound(id))?;
        let updated = self
            .store
            .update_inventory(form.apply_to(existing))
            .await
            .map_err(InventoryError::persistence("update vaccine"))?;
        info!(inventory_id = %id, "Vaccine updated");
        Ok(updated)
    }

    pub async fn delete_inventory(&self, id: Uuid) -> InventoryResult<()> {
        self.store
            .delete_inventory(id)
            .await
            .map_err(InventoryError::persistence("delete vaccine"))?;
        info!(inventory_id = %id, "Vaccine deleted");
        Ok(())
    }

    /// All vaccines ordered by name, optionally for one branch
    pub async fn list_inventory(&self, branch_id: Option<Uuid>) -> InventoryResult<Vec<Inventory>> {
        self.store
            .list_inventory(branch_id)
            .await
            .map_err(InventoryError::persistence("load inventory"))
    }
}
