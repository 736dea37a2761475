use std::collections::HashMap;

use appointment_service::SettlementError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use billing_service::BillingError;
use database_layer::DatabaseError;
use error_common::{codes, validation_messages, ClinicError, VALIDATION_PREFIX};
use inventory_service::InventoryError;
use patient_service::PatientError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::ValidationErrors;

/// Standard API error response structure
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Unique error ID for tracking
    pub error_id: String,
    /// Error type, e.g. `validation_error`
    pub error_type: String,
    /// Stable error code, e.g. `BUSINESS_3002`
    pub error_code: String,
    /// Human-readable error message
    pub message: String,
    /// Field-specific validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<HashMap<String, Vec<String>>>,
    /// Timestamp when error occurred
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Suggested actions for resolving the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

/// Standard API success response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ResponseMetadata>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResponseMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<usize>,
}

/// Main API error enum
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    Validation {
        message: String,
        field_errors: Option<HashMap<String, Vec<String>>>,
    },

    #[error("{message}")]
    NotFound { message: String, code: &'static str },

    #[error("{message}")]
    Conflict { message: String, code: &'static str },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("{message}")]
    Internal { message: String, code: &'static str },
}

impl ApiError {
    /// Create a simple validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field_errors: None,
        }
    }

    /// Create a validation error from `validator` output, keeping per-field
    /// messages alongside the joined one
    pub fn from_validation_errors(errors: &ValidationErrors, fields: &[&str]) -> Self {
        let field_errors = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages = errs
                    .iter()
                    .map(|e| match &e.message {
                        Some(message) => message.to_string(),
                        None => format!("{field} is invalid."),
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();

        Self::Validation {
            message: format!("{VALIDATION_PREFIX}{}", validation_messages(errors, fields).join(", ")),
            field_errors: Some(field_errors),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            code: codes::resource::NOT_FOUND,
        }
    }

    pub fn conflict(message: impl Into<String>, code: &'static str) -> Self {
        Self::Conflict {
            message: message.into(),
            code,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            code: codes::system::INTERNAL,
        }
    }

    /// Map a store failure during `action`. Missing rows stay 404, anything
    /// else becomes `Failed to {action}. Please try again. {cause}`.
    pub fn persistence(action: &'static str) -> impl FnOnce(DatabaseError) -> Self {
        move |source| match source {
            DatabaseError::NotFound { .. } | DatabaseError::ConstraintViolation(_) => ApiError::Database(source),
            source => ApiError::Internal {
                message: format!("Failed to {action}. Please try again. {source}"),
                code: codes::database::QUERY_FAILED,
            },
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Database(db_err) => match db_err {
                DatabaseError::NotFound { .. } => StatusCode::NOT_FOUND,
                DatabaseError::ConstraintViolation(_) => StatusCode::CONFLICT,
                DatabaseError::ConnectionFailed(_) => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "validation_error",
            ApiError::NotFound { .. } => "not_found",
            ApiError::Conflict { .. } => "conflict",
            ApiError::BadRequest { .. } => "bad_request",
            ApiError::Database(_) => "database_error",
            ApiError::Internal { .. } => "internal_error",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => codes::validation::INVALID_INPUT,
            ApiError::BadRequest { .. } => codes::validation::INVALID_FORMAT,
            ApiError::NotFound { code, .. }
            | ApiError::Conflict { code, .. }
            | ApiError::Internal { code, .. } => code,
            ApiError::Database(db_err) => match db_err {
                DatabaseError::NotFound { .. } => codes::resource::NOT_FOUND,
                DatabaseError::ConnectionFailed(_) => codes::database::CONNECTION_FAILED,
                DatabaseError::ConstraintViolation(_) => codes::database::CONSTRAINT_VIOLATION,
                _ => codes::database::QUERY_FAILED,
            },
        }
    }

    /// Get suggested actions for resolving the error
    pub fn suggestions(&self) -> Option<Vec<String>> {
        match self {
            ApiError::Validation { .. } => Some(vec![
                "Check the request payload for invalid fields".to_string(),
                "Ensure all required fields are provided".to_string(),
            ]),
            ApiError::NotFound { .. } => Some(vec![
                "Verify the resource ID is correct".to_string(),
                "Check if the resource exists".to_string(),
            ]),
            ApiError::Conflict { .. } => Some(vec![
                "Reload the record and retry the operation".to_string(),
            ]),
            ApiError::Database(DatabaseError::ConnectionFailed(_)) => Some(vec![
                "Try again in a few moments".to_string(),
                "Contact support if the issue persists".to_string(),
            ]),
            _ => None,
        }
    }

    /// Pretty format database errors for better user experience
    pub fn format_database_error(db_error: &DatabaseError) -> String {
        match db_error {
            DatabaseError::NotFound { entity, id } => format!("{entity} not found ({id})"),
            DatabaseError::ConnectionFailed(msg) => {
                format!("Unable to connect to the database. {msg}")
            }
            DatabaseError::ConstraintViolation(msg) => {
                if msg.contains("duplicate key") {
                    "A record with these details already exists.".to_string()
                } else if msg.contains("foreign key") {
                    "Referenced record does not exist or has been deleted.".to_string()
                } else {
                    format!("The provided data violates a constraint: {msg}")
                }
            }
            DatabaseError::SqlxError(_) => "Database operation failed. Please try again.".to_string(),
            other => format!("Database operation failed: {other}"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4().to_string();
        let status_code = self.status_code();

        if status_code.is_server_error() {
            error!(
                error_id = %error_id,
                error_type = %self.error_type(),
                error_code = %self.code(),
                status_code = %status_code.as_u16(),
                error = %self,
                "API error occurred"
            );
        } else {
            warn!(
                error_id = %error_id,
                error_type = %self.error_type(),
                error_code = %self.code(),
                status_code = %status_code.as_u16(),
                "Request rejected"
            );
        }

        let field_errors = match &self {
            ApiError::Validation { field_errors, .. } => field_errors.clone(),
            _ => None,
        };

        let message = match &self {
            ApiError::Database(db_err) => ApiError::format_database_error(db_err),
            _ => self.to_string(),
        };

        let error_response = ApiErrorResponse {
            error_id,
            error_type: self.error_type().to_string(),
            error_code: self.code().to_string(),
            message,
            field_errors,
            timestamp: chrono::Utc::now(),
            suggestions: self.suggestions(),
        };

        (status_code, Json(error_response)).into_response()
    }
}

impl From<InventoryError> for ApiError {
    fn from(err: InventoryError) -> Self {
        let code = err.code();
        match err {
            InventoryError::Validation(message) => ApiError::validation(message),
            InventoryError::NotFound(_) => ApiError::not_found(err.to_string()),
            InventoryError::InsufficientStock { .. } | InventoryError::Conflict { .. } => {
                ApiError::conflict(err.to_string(), code)
            }
            InventoryError::Persistence { .. } => ApiError::Internal {
                message: err.to_string(),
                code,
            },
        }
    }
}

impl From<BillingError> for ApiError {
    fn from(err: BillingError) -> Self {
        let code = err.code();
        match err {
            BillingError::Validation(message) => ApiError::validation(message),
            BillingError::MalformedItem(_) | BillingError::ServiceNotFound(_) => ApiError::NotFound {
                message: err.to_string(),
                code,
            },
            BillingError::Persistence { .. } => ApiError::Internal {
                message: err.to_string(),
                code,
            },
        }
    }
}

impl From<SettlementError> for ApiError {
    fn from(err: SettlementError) -> Self {
        let code = err.code();
        match err {
            SettlementError::Validation(message) => ApiError::validation(message),
            SettlementError::PatientNotFound(_) | SettlementError::AppointmentNotFound(_) => {
                ApiError::not_found(err.to_string())
            }
            SettlementError::StatusRegression { .. } => ApiError::conflict(err.to_string(), code),
            SettlementError::Billing(inner) => inner.into(),
            SettlementError::Inventory(inner) => inner.into(),
            SettlementError::Persistence { .. } => ApiError::Internal {
                message: err.to_string(),
                code,
            },
        }
    }
}

impl From<PatientError> for ApiError {
    fn from(err: PatientError) -> Self {
        let code = err.code();
        match err {
            PatientError::Validation(message) => ApiError::validation(message),
            PatientError::UserNotFound(_) | PatientError::PatientNotFound(_) => ApiError::not_found(err.to_string()),
            PatientError::Persistence { .. } if err.is_constraint_violation() => {
                ApiError::conflict(err.to_string(), code)
            }
            PatientError::Persistence { .. } => ApiError::Internal {
                message: err.to_string(),
                code,
            },
        }
    }
}

impl From<ClinicError> for ApiError {
    fn from(err: ClinicError) -> Self {
        let code = err.code();
        match err {
            ClinicError::ValidationError(message) => ApiError::validation(message),
            ClinicError::NotFound(message) => ApiError::not_found(message),
            other => ApiError::Internal {
                message: other.to_string(),
                code,
            },
        }
    }
}

/// Helper function to create successful API responses
pub fn api_success<T>(data: T) -> ApiResponse<T> {
    ApiResponse {
        success: true,
        data,
        metadata: None,
    }
}

/// Successful list response carrying the row count
pub fn api_list<T>(data: Vec<T>) -> ApiResponse<Vec<T>> {
    let total_count = data.len();
    ApiResponse {
        success: true,
        data,
        metadata: Some(ResponseMetadata {
            total_count: Some(total_count),
        }),
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
