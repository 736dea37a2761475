//! Billing for clinic visits
//!
//! Provides:
//! - Billing composition: one billing plus one item per service rendered
//! - Payer categories persisted verbatim on each billing
//! - The clinic's billable service catalogue

pub mod catalog;
pub mod composer;
pub mod error;
pub mod models;

pub use catalog::*;
pub use composer::*;
pub use error::*;
pub use models::*;
