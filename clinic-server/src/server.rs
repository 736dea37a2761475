use std::sync::Arc;
use std::time::Instant;

use appointment_service::{AppointmentScheduler, SettlementWorkflow};
use billing_service::{BillingComposer, ServiceCatalog};
use config_engine::ClinicConfig;
use database_layer::{open_store, ClinicStore, InMemoryStore};
use inventory_service::{InventoryLedger, InventoryService, LedgerPolicy};
use patient_service::PatientService;
use tracing::info;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct ClinicServer {
    /// Record storage
    pub store: Arc<dyn ClinicStore>,
    pub scheduler: AppointmentScheduler,
    pub settlement: SettlementWorkflow,
    pub ledger: InventoryLedger,
    pub inventory: InventoryService,
    pub catalog: ServiceCatalog,
    pub patients: PatientService,
    /// Process start, reported by the health endpoint
    pub started_at: Instant,
}

impl ClinicServer {
    /// Wire every service onto one store
    pub fn new(store: Arc<dyn ClinicStore>, policy: LedgerPolicy) -> Self {
        let ledger = InventoryLedger::new(store.clone(), policy);
        let settlement = SettlementWorkflow::new(store.clone(), BillingComposer::new(store.clone()), ledger.clone());

        Self {
            scheduler: AppointmentScheduler::new(store.clone()),
            inventory: InventoryService::new(store.clone()),
            catalog: ServiceCatalog::new(store.clone()),
            patients: PatientService::new(store.clone()),
            settlement,
            ledger,
            store,
            started_at: Instant::now(),
        }
    }

    /// Server backed by a fresh in-memory store
    pub fn in_memory(policy: LedgerPolicy) -> Self {
        Self::new(Arc::new(InMemoryStore::new()), policy)
    }

    /// Open the configured store and build the server on it
    pub async fn from_config(config: &ClinicConfig) -> anyhow::Result<Self> {
        let store = open_store(&config.database).await?;
        info!(
            consumed_accounting = ?config.ledger.consumed_accounting,
            allow_negative_buffer = config.ledger.allow_negative_buffer,
            max_conflict_retries = config.ledger.max_conflict_retries,
            "Inventory ledger policy"
        );
        Ok(Self::new(store, config.ledger.clone()))
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
