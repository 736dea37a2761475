//! Persistence gateway for the clinic engine
//!
//! Every service talks to storage through the [`ClinicStore`] trait. Two
//! implementations ship with the crate:
//!
//! - [`PgStore`] persists records in PostgreSQL through a sqlx pool and
//!   applies the bundled migrations on startup.
//! - [`InMemoryStore`] keeps records in concurrent hash maps. Tests and
//!   database-less development runs use it.
//!
//! # Inventory writes
//!
//! Inventory counters are never written blindly. Callers read a snapshot,
//! compute an [`InventoryAdjustment`] and submit it with
//! [`ClinicStore::compare_and_adjust_inventory`]. The write only lands if
//! the stored counters still match the snapshot, so two concurrent
//! deductions cannot overwrite one another.
//!
//! # Example
//!
//! ```rust
//! use database_layer::{ClinicStore, InMemoryStore, User};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = InMemoryStore::new();
//!     let user = store.create_user(User::new("Ana", "Reyes", "ana@example.com")).await?;
//!
//!     assert!(store.find_user(user.id).await?.is_some());
//!     Ok(())
//! }
//! ```

pub mod connection;
pub mod error;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

use std::sync::Arc;

use tracing::{info, warn};

pub use connection::{DatabaseConfig, DatabasePool};
pub use error::{DatabaseError, DatabaseResult};
pub use memory::{InMemoryStore, TableCounts};
pub use models::*;
pub use postgres::PgStore;
pub use store::ClinicStore;

/// Open the store selected by configuration.
///
/// A configured URL yields a [`PgStore`] (migrated when `run_migrations`
/// is set). Without one the process falls back to an [`InMemoryStore`].
pub async fn open_store(config: &DatabaseConfig) -> DatabaseResult<Arc<dyn ClinicStore>> {
    match config.url.as_deref() {
        Some(url) => {
            let pool = DatabasePool::connect(url, config).await?;
            if config.run_migrations {
                pool.migrate().await?;
            }
            info!("Using PostgreSQL store");
            Ok(Arc::new(PgStore::new(pool)))
        }
        None => {
            warn!("No database URL configured, records will only live in memory");
            Ok(Arc::new(InMemoryStore::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_store_without_url_is_in_memory() {
        let store = open_store(&DatabaseConfig::default()).await.unwrap();
        assert!(store.is_healthy().await);
    }
}
