//! Vaccine inventory for the clinic engine
//!
//! - [`InventoryLedger`] deducts administered doses, stocks first, buffer
//!   for the shortfall
//! - [`InventoryService`] handles vaccine create, update, delete and listing

pub mod error;
pub mod ledger;
pub mod models;
pub mod service;

pub use error::*;
pub use ledger::*;
pub use models::*;
pub use service::*;
