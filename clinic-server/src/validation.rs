//! Request validation for handlers
//!
//! Request bodies derive [`validator::Validate`] and list their fields
//! through [`FormFields`]; [`RequestValidation`] turns their failures into an
//! [`ApiError`] carrying both the joined `Validation Error: ...` message, in
//! declaration order, and the per-field messages.

use error_common::FormFields;
use validator::Validate;

use crate::error::ApiError;

/// Trait for validating request payloads
pub trait RequestValidation {
    /// Returns `Err(ApiError::Validation)` listing every failed field
    fn validate_request(&self) -> Result<(), ApiError>;
}

impl<T: Validate + FormFields> RequestValidation for T {
    fn validate_request(&self) -> Result<(), ApiError> {
        self.validate()
            .map_err(|errors| ApiError::from_validation_errors(&errors, T::FIELDS))
    }
}
