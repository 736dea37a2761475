use database_layer::DatabaseError;
use error_common::codes;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum InventoryError {
    /// Joined form failures, already prefixed with `Validation Error: `
    #[error("{0}")]
    Validation(String),

    #[error("Inventory not found ({0})")]
    NotFound(Uuid),

    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: i32, available: i32 },

    #[error("Inventory {inventory_id} kept changing underneath the deduction, gave up after {attempts} attempts")]
    Conflict { inventory_id: Uuid, attempts: u32 },

    #[error("Failed to {action}. Please try again. {source}")]
    Persistence {
        action: &'static str,
        #[source]
        source: DatabaseError,
    },
}

impl InventoryError {
    /// Map a store failure, keeping missing inventory rows distinguishable
    pub(crate) fn persistence(action: &'static str) -> impl FnOnce(DatabaseError) -> Self {
        move |source| match source {
            DatabaseError::NotFound { id, .. } => InventoryError::NotFound(id),
            source => InventoryError::Persistence { action, source },
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            InventoryError::Validation(_) => codes::validation::INVALID_INPUT,
            InventoryError::NotFound(_) => codes::resource::NOT_FOUND,
            InventoryError::InsufficientStock { .. } => codes::business::INSUFFICIENT_STOCK,
            InventoryError::Conflict { .. } => codes::database::WRITE_CONFLICT,
            InventoryError::Persistence { .. } => codes::database::QUERY_FAILED,
        }
    }
}

pub type InventoryResult<T> = Result<T, InventoryError>;
