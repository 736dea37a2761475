use serde::Serialize;
use thiserror::Error;

use crate::codes;

/// Process-level error enum shared across the engine
#[derive(Error, Debug)]
pub enum ClinicError {
    /// Validation errors
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database operation errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Business logic errors
    #[error("Business logic error: {0}")]
    BusinessError(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Network communication errors
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Server errors
    #[error("Server error: {0}")]
    ServerError(String),

    /// Internal system errors
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Wrapped external errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Coarse error category, used for metrics labels and API error types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Database,
    Business,
    System,
}

impl ClinicError {
    /// Stable error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            ClinicError::ValidationError(_) => codes::validation::INVALID_INPUT,
            ClinicError::NotFound(_) => codes::resource::NOT_FOUND,
            ClinicError::DatabaseError(_) => codes::database::QUERY_FAILED,
            ClinicError::BusinessError(_) => codes::business::RULE_VIOLATION,
            ClinicError::ConfigError(_) => codes::system::CONFIGURATION,
            ClinicError::NetworkError(_) | ClinicError::ServerError(_) => codes::system::SERVER,
            ClinicError::InternalError(_) | ClinicError::Other(_) => codes::system::INTERNAL,
        }
    }

    /// Category of this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClinicError::ValidationError(_) => ErrorCategory::Validation,
            ClinicError::NotFound(_) => ErrorCategory::NotFound,
            ClinicError::DatabaseError(_) => ErrorCategory::Database,
            ClinicError::BusinessError(_) => ErrorCategory::Business,
            _ => ErrorCategory::System,
        }
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, ClinicError>;

/// Log an error with the context it surfaced in
pub fn log_error(context: &str, error: &ClinicError) {
    tracing::error!(
        context = context,
        error_code = error.code(),
        error = %error,
        "Clinic engine error occurred"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_category() {
        let err = ClinicError::NotFound("Appointment".to_string());
        assert_eq!(err.code(), codes::resource::NOT_FOUND);
        assert_eq!(err.category(), ErrorCategory::NotFound);

        let err = ClinicError::from(anyhow::anyhow!("boom"));
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.to_string(), "boom");
    }
}
