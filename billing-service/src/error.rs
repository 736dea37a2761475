use database_layer::DatabaseError;
use error_common::codes;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum BillingError {
    #[error("{0}")]
    Validation(String),

    #[error("Malformed billing item: {0}")]
    MalformedItem(String),

    #[error("Service not found ({0})")]
    ServiceNotFound(Uuid),

    #[error("Failed to {action}. Please try again. {source}")]
    Persistence {
        action: &'static str,
        #[source]
        source: DatabaseError,
    },
}

impl BillingError {
    pub(crate) fn persistence(action: &'static str) -> impl FnOnce(DatabaseError) -> Self {
        move |source| match source {
            DatabaseError::NotFound { entity: "Service", id } => BillingError::ServiceNotFound(id),
            source => BillingError::Persistence { action, source },
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            BillingError::Validation(_) => codes::validation::INVALID_INPUT,
            BillingError::MalformedItem(_) => codes::business::MALFORMED_BILLING_ITEM,
            BillingError::ServiceNotFound(_) => codes::resource::NOT_FOUND,
            BillingError::Persistence { .. } => codes::database::QUERY_FAILED,
        }
    }
}

pub type BillingResult<T> = Result<T, BillingError>;
