//! Appointment settlement
//!
//! Settling moves an appointment to `On Going` or `Completed`, writes the
//! visit's billing, records each administered vaccine and deducts it from
//! inventory, in that order. The steps are not wrapped in a transaction: a
//! failure part-way leaves the writes of earlier steps in place, and
//! submitting the same settlement twice bills and deducts twice.

use std::sync::Arc;

use billing_service::{BillingComposer, BillingRequest};
use chrono::Utc;
use database_layer::{AppointmentStatus, ClinicStore, Vaccination};
use futures::future::join_all;
use inventory_service::InventoryLedger;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::{SettlementError, SettlementResult};
use crate::models::{SettlementOutcome, SettlementRequest};

#[derive(Clone)]
pub struct SettlementWorkflow {
    store: Arc<dyn ClinicStore>,
    composer: BillingComposer,
    ledger: InventoryLedger,
}

impl SettlementWorkflow {
    pub fn new(store: Arc<dyn ClinicStore>, composer: BillingComposer, ledger: InventoryLedger) -> Self {
        Self { store, composer, ledger }
    }

    #[instrument(skip(self, request), fields(user_id = %request.user_id, status = %request.status))]
    pub async fn settle(&self, appointment_id: Uuid, request: SettlementRequest) -> SettlementResult<SettlementOutcome> {
        let billing_fields = request.validate_fields()?;

        self.store
            .find_user(request.user_id)
            .await
            .map_err(SettlementError::persistence("settle appointment"))?
            .ok_or(SettlementError::PatientNotFound(request.user_id))?;

        let current = self
            .store
            .find_appointment(appointment_id)
            .await
            .map_err(SettlementError::persistence("settle appointment"))?
            .ok_or(SettlementError::AppointmentNotFound(appointment_id))?;
        if current.status.rank() > request.status.rank() {
            return Err(SettlementError::StatusRegression {
                from: current.status,
                to: request.status,
            });
        }
        if current.status == AppointmentStatus::Completed {
            warn!(appointment_id = %appointment_id, "Settling an already completed appointment again");
        }

        let appointment = self
            .store
            .update_appointment_status(appointment_id, request.status, request.user_id)
            .await
            .map_err(SettlementError::persistence("update appointment"))?;

        let billing = self
            .composer
            .compose(BillingRequest {
                user_id: request.user_id,
                for_insurance: billing_fields.for_insurance,
                for_aics: billing_fields.for_aics,
                user_category: billing_fields.user_category,
                services: request.services,
            })
            .await?;

        let now = Utc::now();
        // Every entry of a batch runs to completion before the first failure is
        // reported, so one bad inventory id never strands its siblings.
        let vaccinations = join_all(request.vaccinations.iter().map(|selected| {
            self.store.create_vaccination(Vaccination {
                id: Uuid::new_v4(),
                inventory_id: selected.inventory_id,
                quantity: selected.quantity,
                user_id: request.user_id,
                created_at: now,
                updated_at: now,
            })
        }))
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .map_err(SettlementError::persistence("record vaccinations"))?;

        let deductions = join_all(
            request
                .vaccinations
                .iter()
                .map(|selected| self.ledger.deduct(selected.inventory_id, selected.quantity)),
        )
        .await;
        for (selected, outcome) in request.vaccinations.iter().zip(&deductions) {
            if let Err(e) = outcome {
                warn!(inventory_id = %selected.inventory_id, error = %e, "Vaccine deduction failed");
            }
        }
        let deductions = deductions.into_iter().collect::<Result<Vec<_>, _>>()?;

        info!(
            appointment_id = %appointment_id,
            billing_id = %billing.billing.id,
            services = billing.items.len(),
            vaccinations = vaccinations.len(),
            "Appointment settled"
        );

        Ok(SettlementOutcome {
            success: format!("Appointment {} successfully", settled_verb(request.status)),
            appointment,
            billing,
            vaccinations,
            deductions,
        })
    }
}

fn settled_verb(status: AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::Completed => "completed",
        _ => "updated",
    }
}
