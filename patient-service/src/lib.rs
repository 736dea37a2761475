//! Patient intake for the clinic engine
//!
//! [`PatientService`] registers user accounts and patient profiles and
//! records what staff capture at intake: medical history, vital signs,
//! the bite incident and the treatment given. Deleting a patient removes
//! everything its user owns.

pub mod error;
pub mod models;
pub mod service;

pub use error::*;
pub use models::*;
pub use service::*;
