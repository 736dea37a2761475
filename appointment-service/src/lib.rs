//! Appointments for the clinic engine
//!
//! [`AppointmentScheduler`] books visits. [`SettlementWorkflow`] closes them
//! out: status transition, billing, vaccination records and inventory
//! deduction.

pub mod error;
pub mod models;
pub mod scheduling;
pub mod settlement;

pub use error::*;
pub use models::*;
pub use scheduling::*;
pub use settlement::*;
