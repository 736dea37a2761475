//! Billing composition for a patient visit
//!
//! A composition writes one [`Billing`] stamped with a single clock reading
//! and one [`BillingItem`] per selected service. Every service id is
//! resolved before the billing is written, so a bad selection leaves no
//! billing behind.

use std::sync::Arc;

use chrono::Utc;
use database_layer::{Billing, BillingItem, ClinicStore, Service};
use futures::future::try_join_all;
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{BillingError, BillingResult};
use crate::models::{BillingRequest, BillingStamp, ComposedBilling, SelectedService};

/// Status written on every new billing item
pub const BILLING_ITEM_STATUS: &str = "Completed";

#[derive(Clone)]
pub struct BillingComposer {
    store: Arc<dyn ClinicStore>,
}

impl BillingComposer {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }

    pub async fn compose(&self, request: BillingRequest) -> BillingResult<ComposedBilling> {
        self.compose_with_stamp(request, BillingStamp::now()).await
    }

    pub async fn compose_with_stamp(
        &self,
        request: BillingRequest,
        stamp: BillingStamp,
    ) -> BillingResult<ComposedBilling> {
        let services = self.resolve_services(&request.services).await?;

        let now = Utc::now();
        let billing = self
            .store
            .create_billing(Billing {
                id: Uuid::new_v4(),
                date: stamp.date,
                time: stamp.time,
                for_insurance: request.for_insurance,
                for_aics: request.for_aics,
                user_category: request.user_category.as_str().to_string(),
                user_id: request.user_id,
                created_at: now,
                updated_at: now,
            })
            .await
            .map_err(BillingError::persistence("create billing"))?;

        let items = try_join_all(services.iter().map(|service| {
            self.store.create_billing_item(BillingItem {
                id: Uuid::new_v4(),
                billing_id: billing.id,
                service_id: service.id,
                status: BILLING_ITEM_STATUS.to_string(),
                created_at: now,
                updated_at: now,
            })
        }))
        .await
        .map_err(BillingError::persistence("create billing items"))?;

        let total = services.iter().map(|service| service.price).sum::<Decimal>();
        info!(
            billing_id = %billing.id,
            user_id = %billing.user_id,
            items = items.len(),
            "Billing created"
        );

        Ok(ComposedBilling { billing, items, total })
    }

    async fn resolve_services(&self, selected: &[SelectedService]) -> BillingResult<Vec<Service>> {
        try_join_all(selected.iter().enumerate().map(|(index, entry)| async move {
            let service_id = entry.service_id.ok_or_else(|| {
                BillingError::MalformedItem(format!("selected service #{} has no service id", index + 1))
            })?;
            let service = self
                .store
                .find_service(service_id)
                .await
                .map_err(BillingError::persistence("look up service"))?;
            debug!(service_id = %service_id, found = service.is_some(), "Resolved selected service");
            service.ok_or_else(|| BillingError::MalformedItem(format!("service {service_id} does not exist")))
        }))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PayerCategory;
    use database_layer::{InMemoryStore, User};

    async fn seed_service(store: &InMemoryStore, name: &str, price: i64) -> Service {
        let now = Utc::now();
        store
            .create_service(Service {
                id: Uuid::new_v4(),
                name: name.to_string(),
                description: format!("{name} service"),
                price: Decimal::new(price, 0),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap()
    }

    fn request(user_id: Uuid, services: Vec<SelectedService>) -> BillingRequest {
        BillingRequest {
            user_id,
            for_insurance: true,
            for_aics: false,
            user_category: PayerCategory::SeniorCitizen,
            services,
        }
    }

    #[tokio::test]
    async fn test_compose_fans_out_items() {
        let store = Arc::new(InMemoryStore::new());
        let user = store.create_user(User::new("Ana", "Reyes", "ana@example.com")).await.unwrap();
        let consult = seed_service(&store, "Consultation", 300).await;
        let dose = seed_service(&store, "Anti-rabies dose", 1200).await;
        let wound = seed_service(&store, "Wound care", 150).await;

        let composer = BillingComposer::new(store.clone());
        let stamp = BillingStamp { date: "2024-11-05".to_string(), time: "9:05 AM".to_string() };
        let composed = composer
            .compose_with_stamp(
                request(user.id, vec![
                    SelectedService::new(consult.id),
                    SelectedService::new(dose.id),
                    SelectedService::new(wound.id),
                ]),
                stamp,
            )
            .await
            .unwrap();

        assert_eq!(composed.billing.user_category, "SENIOR CITIZEN");
        assert_eq!(composed.billing.date, "2024-11-05");
        assert_eq!(composed.billing.time, "9:05 AM");
        assert!(composed.billing.for_insurance);
        assert_eq!(composed.total, Decimal::new(1650, 0));

        let stored = store.list_billing_items(composed.billing.id).await.unwrap();
        assert_eq!(stored.len(), 3);
        assert!(stored.iter().all(|item| item.status == BILLING_ITEM_STATUS));

        let mut service_ids: Vec<Uuid> = stored.iter().map(|item| item.service_id).collect();
        service_ids.sort();
        let mut expected = vec![consult.id, dose.id, wound.id];
        expected.sort();
        assert_eq!(service_ids, expected);
    }

    #[tokio::test]
    async fn test_missing_service_writes_nothing() {
        let store = Arc::new(InMemoryStore::new());
        let consult = seed_service(&store, "Consultation", 300).await;
        let composer = BillingComposer::new(store.clone());

        let err = composer
            .compose(request(Uuid::new_v4(), vec![SelectedService::new(consult.id), SelectedService::new(Uuid::new_v4())]))
            .await
            .unwrap_err();
        assert!(matches!(err, BillingError::MalformedItem(_)));

        let err = composer
            .compose(request(Uuid::new_v4(), vec![SelectedService::default()]))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Malformed billing item: selected service #1 has no service id");

        let counts = store.counts();
        assert_eq!(counts.billings, 0);
        assert_eq!(counts.billing_items, 0);
    }

    #[tokio::test]
    async fn test_compose_without_services() {
        let store = Arc::new(InMemoryStore::new());
        let composed = BillingComposer::new(store.clone())
            .compose(request(Uuid::new_v4(), Vec::new()))
            .await
            .unwrap();
        assert!(composed.items.is_empty());
        assert_eq!(composed.total, Decimal::ZERO);
        assert_eq!(store.counts().billings, 1);
    }
}
