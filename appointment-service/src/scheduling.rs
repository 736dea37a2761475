use std::sync::Arc;

use database_layer::{Appointment, ClinicStore};
use tracing::info;
use uuid::Uuid;

use crate::error::{SettlementError, SettlementResult};
use crate::models::AppointmentRequest;

/// Books and looks up appointments
#[derive(Clone)]
pub struct AppointmentScheduler {
    store: Arc<dyn ClinicStore>,
}

impl AppointmentScheduler {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }

    /// Book a `Pending` appointment for an existing user
    pub async fn create_appointment(&self, request: AppointmentRequest) -> SettlementResult<Appointment> {
        let user_id = match request.user_id {
            Some(id) if !id.is_nil() => id,
            _ => return Err(SettlementError::PatientNotFound(Uuid::nil())),
        };
        if request.date.trim().is_empty() {
            return Err(SettlementError::Validation("Date is required".to_string()));
        }
        if request.time.trim().is_empty() {
            return Err(SettlementError::Validation("Time is required".to_string()));
        }

        self.store
            .find_user(user_id)
            .await
            .map_err(SettlementError::persistence("create appointment"))?
            .ok_or(SettlementError::PatientNotFound(user_id))?;

        let appointment = self
            .store
            .create_appointment(Appointment::new(user_id, request.date, request.time))
            .await
            .map_err(SettlementError::persistence("create appointment"))?;
        info!(appointment_id = %appointment.id, user_id = %user_id, "Appointment booked");
        Ok(appointment)
    }

    pub async fn get_appointment(&self, id: Uuid) -> SettlementResult<Appointment> {
        self.store
            .find_appointment(id)
            .await
            .map_err(SettlementError::persistence("load appointment"))?
            .ok_or(SettlementError::AppointmentNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database_layer::{AppointmentStatus, InMemoryStore, User};

    fn request(user_id: Option<Uuid>, date: &str, time: &str) -> AppointmentRequest {
        AppointmentRequest {
            user_id,
            date: date.to_string(),
            time: time.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_appointment_starts_pending() {
        let store = Arc::new(InMemoryStore::new());
        let user = store.create_user(User::new("Ana", "Reyes", "ana@example.com")).await.unwrap();
        let scheduler = AppointmentScheduler::new(store);

        let appointment = scheduler
            .create_appointment(request(Some(user.id), "2024-11-05", "9:30 AM"))
            .await
            .unwrap();
        assert_eq!(appointment.status, AppointmentStatus::Pending);
        assert_eq!(scheduler.get_appointment(appointment.id).await.unwrap(), appointment);
    }

    #[tokio::test]
    async fn test_create_appointment_messages() {
        let store = Arc::new(InMemoryStore::new());
        let user = store.create_user(User::new("Ana", "Reyes", "ana@example.com")).await.unwrap();
        let scheduler = AppointmentScheduler::new(store);

        let cases = [
            (request(None, "2024-11-05", "9:30 AM"), "User not found"),
            (request(Some(Uuid::new_v4()), "2024-11-05", "9:30 AM"), "User not found"),
            (request(Some(user.id), "", "9:30 AM"), "Date is required"),
            (request(Some(user.id), "2024-11-05", " "), "Time is required"),
        ];
        for (req, message) in cases {
            let err = scheduler.create_appointment(req).await.unwrap_err();
            assert_eq!(err.to_string(), message);
        }
    }
}
