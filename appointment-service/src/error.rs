use billing_service::BillingError;
use database_layer::{AppointmentStatus, DatabaseError};
use error_common::codes;
use inventory_service::InventoryError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum SettlementError {
    #[error("{0}")]
    Validation(String),

    #[error("User not found")]
    PatientNotFound(Uuid),

    #[error("Appointment not found ({0})")]
    AppointmentNotFound(Uuid),

    #[error("Appointment is already {from} and cannot move back to {to}")]
    StatusRegression {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error(transparent)]
    Billing(#[from] BillingError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error("Failed to {action}. Please try again. {source}")]
    Persistence {
        action: &'static str,
        #[source]
        source: DatabaseError,
    },
}

impl SettlementError {
    pub(crate) fn persistence(action: &'static str) -> impl FnOnce(DatabaseError) -> Self {
        move |source| match source {
            DatabaseError::NotFound { entity: "Appointment", id } => SettlementError::AppointmentNotFound(id),
            source => SettlementError::Persistence { action, source },
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            SettlementError::Validation(_) => codes::validation::INVALID_INPUT,
            SettlementError::PatientNotFound(_) | SettlementError::AppointmentNotFound(_) => {
                codes::resource::NOT_FOUND
            }
            SettlementError::StatusRegression { .. } => codes::business::STATUS_REGRESSION,
            SettlementError::Billing(err) => err.code(),
            SettlementError::Inventory(err) => err.code(),
            SettlementError::Persistence { .. } => codes::database::QUERY_FAILED,
        }
    }
}

pub type SettlementResult<T> = Result<T, SettlementError>;
