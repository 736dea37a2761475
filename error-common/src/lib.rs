//! Common error handling utilities for the BiteCare clinic engine
//!
//! This crate provides the error vocabulary shared by every service crate:
//! a process-level [`ClinicError`], stable error codes surfaced by the HTTP
//! API, and helpers that turn `validator` failures into the single
//! human-readable message the clinic front-end displays.
//!
//! # Error Categories
//!
//! - **Validation**: bad or missing form fields, reported before any write
//! - **NotFound**: an appointment, service, inventory or patient id that does not resolve
//! - **Database**: persistence failures, carrying the underlying cause text
//! - **Business**: domain rule violations (status regression, insufficient stock)
//! - **Config / Server / Internal**: process-level failures
//!
//! # Example
//!
//! ```rust
//! use error_common::{ClinicError, codes};
//!
//! let err = ClinicError::ValidationError("Validation Error: Name is required.".into());
//! assert_eq!(err.code(), codes::validation::INVALID_INPUT);
//! ```

pub mod codes;
pub mod types;
pub mod validation;

pub use types::*;
pub use validation::*;
