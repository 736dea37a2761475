// Persistence gateway interface
use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DatabaseResult;
use crate::models::*;

/// Record storage used by every clinic service.
///
/// Create methods take fully-formed records (ids and timestamps assigned by
/// the caller). Update and delete methods fail with
/// [`DatabaseError::NotFound`](crate::DatabaseError::NotFound) when the id
/// does not resolve. Find methods return `Ok(None)` instead.
#[async_trait]
pub trait ClinicStore: Send + Sync {
    async fn is_healthy(&self) -> bool;

    // users and patients
    async fn create_user(&self, user: User) -> DatabaseResult<User>;
    async fn find_user(&self, id: Uuid) -> DatabaseResult<Option<User>>;
    async fn create_patient(&self, patient: Patient) -> DatabaseResult<Patient>;
    async fn find_patient(&self, id: Uuid) -> DatabaseResult<Option<Patient>>;
    /// Newest first
    async fn list_patients(&self) -> DatabaseResult<Vec<Patient>>;

    /// Delete a patient together with its user and every clinical record,
    /// appointment, billing, billing item and vaccination that user owns.
    async fn delete_patient_cascade(&self, id: Uuid) -> DatabaseResult<Patient>;

    // intake records, listed oldest first
    async fn create_medical_history(&self, history: MedicalHistory) -> DatabaseResult<MedicalHistory>;
    async fn update_medical_history(&self, history: MedicalHistory) -> DatabaseResult<MedicalHistory>;
    async fn list_medical_histories_for_user(&self, user_id: Uuid) -> DatabaseResult<Vec<MedicalHistory>>;
    async fn create_treatment(&self, treatment: Treatment) -> DatabaseResult<Treatment>;
    async fn list_treatments_for_user(&self, user_id: Uuid) -> DatabaseResult<Vec<Treatment>>;
    async fn create_vital_sign(&self, vital_sign: VitalSign) -> DatabaseResult<VitalSign>;
    async fn list_vital_signs_for_user(&self, user_id: Uuid) -> DatabaseResult<Vec<VitalSign>>;
    async fn create_incident(&self, incident: Incident) -> DatabaseResult<Incident>;
    async fn list_incidents_for_user(&self, user_id: Uuid) -> DatabaseResult<Vec<Incident>>;

    // branches
    async fn create_branch(&self, branch: Branch) -> DatabaseResult<Branch>;
    async fn find_branch(&self, id: Uuid) -> DatabaseResult<Option<Branch>>;
    async fn update_branch(&self, branch: Branch) -> DatabaseResult<Branch>;
    async fn delete_branch(&self, id: Uuid) -> DatabaseResult<()>;
    async fn list_branches(&self) -> DatabaseResult<Vec<Branch>>;

    // employees
    async fn create_employee(&self, employee: Employee) -> DatabaseResult<Employee>;
    async fn find_employee(&self, id: Uuid) -> DatabaseResult<Option<Employee>>;
    async fn update_employee(&self, employee: Employee) -> DatabaseResult<Employee>;
    async fn delete_employee(&self, id: Uuid) -> DatabaseResult<()>;
    /// Ordered by first name
    async fn list_employees(&self) -> DatabaseResult<Vec<Employee>>;

    // service catalogue
    async fn create_service(&self, service: Service) -> DatabaseResult<Service>;
    async fn find_service(&self, id: Uuid) -> DatabaseResult<Option<Service>>;
    async fn update_service(&self, service: Service) -> DatabaseResult<Service>;
    async fn delete_service(&self, id: Uuid) -> DatabaseResult<()>;
    /// Ordered by name
    async fn list_services(&self) -> DatabaseResult<Vec<Service>>;

    // vaccine inventory
    async fn create_inventory(&self, inventory: Inventory) -> DatabaseResult<Inventory>;
    async fn find_inventory(&self, id: Uuid) -> DatabaseResult<Option<Inventory>>;
    async fn update_inventory(&self, inventory: Inventory) -> DatabaseResult<Inventory>;
    async fn delete_inventory(&self, id: Uuid) -> DatabaseResult<()>;
    /// Ordered by name, optionally restricted to one branch
    async fn list_inventory(&self, branch_id: Option<Uuid>) -> DatabaseResult<Vec<Inventory>>;

    /// Apply `adjustment` only if the stored counters still equal `expected`.
    ///
    /// Returns `Ok(None)` when another writer changed the counters first.
    async fn compare_and_adjust_inventory(
        &self,
        id: Uuid,
        expected: InventoryCounters,
        adjustment: InventoryAdjustment,
    ) -> DatabaseResult<Option<Inventory>>;

    // appointments
    async fn create_appointment(&self, appointment: Appointment) -> DatabaseResult<Appointment>;
    async fn find_appointment(&self, id: Uuid) -> DatabaseResult<Option<Appointment>>;
    async fn update_appointment_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
        user_id: Uuid,
    ) -> DatabaseResult<Appointment>;
    async fn list_appointments_for_user(&self, user_id: Uuid) -> DatabaseResult<Vec<Appointment>>;

    // billing
    async fn create_billing(&self, billing: Billing) -> DatabaseResult<Billing>;
    async fn find_billing(&self, id: Uuid) -> DatabaseResult<Option<Billing>>;
    async fn list_billings_for_user(&self, user_id: Uuid) -> DatabaseResult<Vec<Billing>>;
    async fn create_billing_item(&self, item: BillingItem) -> DatabaseResult<BillingItem>;
    async fn list_billing_items(&self, billing_id: Uuid) -> DatabaseResult<Vec<BillingItem>>;

    // vaccinations
    async fn create_vaccination(&self, vaccination: Vaccination) -> DatabaseResult<Vaccination>;
    async fn list_vaccinations_for_user(&self, user_id: Uuid) -> DatabaseResult<Vec<Vaccination>>;
}
