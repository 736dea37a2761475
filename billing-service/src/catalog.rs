use std::sync::Arc;

use chrono::Utc;
use database_layer::{ClinicStore, Service};
use error_common::{field_error, finish_validation, join_validation_errors, FormFields};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::{BillingError, BillingResult};
use crate::models::ServiceForm;

/// Billable services offered by the clinic
#[derive(Clone)]
pub struct ServiceCatalog {
    store: Arc<dyn ClinicStore>,
}

impl ServiceCatalog {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }

    fn validate(form: &ServiceForm) -> BillingResult<()> {
        let mut extra = Vec::new();
        if form.price < Decimal::ONE {
            extra.push(("price", field_error("range", "Service price is required.")));
        }
        finish_validation(form.validate(), extra)
            .map_err(|errors| BillingError::Validation(join_validation_errors(&errors, ServiceForm::FIELDS)))
    }

    pub async fn create_service(&self, form: ServiceForm) -> BillingResult<Service> {
        Self::validate(&form)?;
        let now = Utc::now();
        let service = self
            .store
            .create_service(Service {
                id: Uuid::new_v4(),
                name: form.name,
                description: form.description,
                price: form.price,
                created_at: now,
                updated_at: now,
            })
            .await
            .map_err(BillingError::persistence("create service"))?;
        info!(service_id = %service.id, "Service created");
        Ok(service)
    }

    pub async fn update_service(&self, id: Uuid, form: ServiceForm) -> BillingResult<Service> {
        Self::validate(&form)?;
        let existing = self
            .store
            .find_service(id)
            .await
            .map_err(BillingError::persistence("update service"))?
            .ok_or(BillingError::ServiceNotFound(id))?;
        self.store
            .update_service(Service {
                name: form.name,
                description: form.description,
                price: form.price,
                updated_at: Utc::now(),
                ..existing
            })
            .await
            .map_err(BillingError::persistence("update service"))
    }

    pub async fn delete_service(&self, id: Uuid) -> BillingResult<()> {
        self.store
            .delete_service(id)
            .await
            .map_err(BillingError::persistence("delete service"))?;
        info!(service_id = %id, "Service deleted");
        Ok(())
    }

    /// Ordered by name
    pub async fn list_services(&self) -> BillingResult<Vec<Service>> {
        self.store
            .list_services()
            .await
            .map_err(BillingError::persistence("load services"))
    }
}
