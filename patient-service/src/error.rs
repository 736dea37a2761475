use database_layer::DatabaseError;
use error_common::codes;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum PatientError {
    /// Joined form failures, shown to staff as is
    #[error("{0}")]
    Validation(String),

    #[error("User not found")]
    UserNotFound(Uuid),

    #[error("Patient does not exist")]
    PatientNotFound(Uuid),

    #[error("Failed to {action}. Please try again. {source}")]
    Persistence {
        action: &'static str,
        #[source]
        source: DatabaseError,
    },
}

impl PatientError {
    pub(crate) fn persistence(action: &'static str) -> impl FnOnce(DatabaseError) -> Self {
        move |source| match source {
            DatabaseError::NotFound { entity: "Patient", id } => PatientError::PatientNotFound(id),
            source => PatientError::Persistence { action, source },
        }
    }

    /// Whether the store refused the write as a duplicate or dangling reference
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            PatientError::Persistence { source: DatabaseError::ConstraintViolation(_), .. }
        )
    }

    pub fn code(&self) -> &'static str {
        match self {
            PatientError::Validation(_) => codes::validation::INVALID_INPUT,
            PatientError::UserNotFound(_) | PatientError::PatientNotFound(_) => codes::resource::NOT_FOUND,
            PatientError::Persistence { .. } if self.is_constraint_violation() => {
                codes::database::CONSTRAINT_VIOLATION
            }
            PatientError::Persistence { .. } => codes::database::QUERY_FAILED,
        }
    }
}

pub type PatientResult<T> = Result<T, PatientError>;
