// In-memory store for tests and database-less development
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::error::{DatabaseError, DatabaseResult};
use crate::models::*;
use crate::store::ClinicStore;

/// One table keyed by primary key
struct Table<T: Record> {
    rows: DashMap<Uuid, T>,
}

impl<T: Record> Table<T> {
    fn new() -> Self {
        Self { rows: DashMap::new() }
    }

    fn insert(&self, record: T) -> DatabaseResult<T> {
        let id = record.id();
        if self.rows.contains_key(&id) {
            return Err(DatabaseError::ConstraintViolation(format!(
                "duplicate key for {} ({id})",
                T::ENTITY
            )));
        }
        self.rows.insert(id, record.clone());
        Ok(record)
    }

    fn get(&self, id: Uuid) -> Option<T> {
        self.rows.get(&id).map(|row| row.value().clone())
    }

    fn replace(&self, record: T) -> DatabaseResult<T> {
        let id = record.id();
        match self.rows.get_mut(&id) {
            Some(mut row) => {
                *row = record.clone();
                Ok(record)
            }
            None => Err(DatabaseError::not_found(T::ENTITY, id)),
        }
    }

    fn remove(&self, id: Uuid) -> DatabaseResult<T> {
        self.rows
            .remove(&id)
            .map(|(_, row)| row)
            .ok_or_else(|| DatabaseError::not_found(T::ENTITY, id))
    }

    fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows
            .iter()
            .filter(|row| predicate(row.value()))
            .map(|row| row.value().clone())
            .collect()
    }

    fn remove_where(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        let ids: Vec<Uuid> = self.filter(&predicate).iter().map(Record::id).collect();
        ids.into_iter()
            .filter_map(|id| self.rows.remove(&id).map(|(_, row)| row))
            .collect()
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

/// `ClinicStore` backed by concurrent hash maps
pub struct InMemoryStore {
    users: Table<User>,
    patients: Table<Patient>,
    medical_histories: Table<MedicalHistory>,
    treatments: Table<Treatment>,
    vital_signs: Table<VitalSign>,
    incidents: Table<Incident>,
    branches: Table<Branch>,
    employees: Table<Employee>,
    services: Table<Service>,
    inventory: Table<Inventory>,
    appointments: Table<Appointment>,
    billings: Table<Billing>,
    billing_items: Table<BillingItem>,
    vaccinations: Table<Vaccination>,
    /// Serializes multi-table deletes
    cascade_lock: Mutex<()>,
}

/// Row counts, handy for asserting on side effects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub medical_histories: usize,
    pub treatments: usize,
    pub vital_signs: usize,
    pub incidents: usize,
    pub appointments: usize,
    pub billings: usize,
    pub billing_items: usize,
    pub vaccinations: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            users: Table::new(),
            patients: Table::new(),
            medical_histories: Table::new(),
            treatments: Table::new(),
            vital_signs: Table::new(),
            incidents: Table::new(),
            branches: Table::new(),
            employees: Table::new(),
            services: Table::new(),
            inventory: Table::new(),
            appointments: Table::new(),
            billings: Table::new(),
            billing_items: Table::new(),
            vaccinations: Table::new(),
            cascade_lock: Mutex::new(()),
        }
    }

    pub fn counts(&self) -> TableCounts {
        TableCounts {
            medical_histories: self.medical_histories.len(),
            treatments: self.treatments.len(),
            vital_signs: self.vital_signs.len(),
            incidents: self.incidents.len(),
            appointments: self.appointments.len(),
            billings: self.billings.len(),
            billing_items: self.billing_items.len(),
            vaccinations: self.vaccinations.len(),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted_by_key<T, K: Ord>(mut rows: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    rows.sort_by_key(|row| key(row));
    rows
}

#[async_trait]
impl ClinicStore for InMemoryStore {
    async fn is_healthy(&self) -> bool {
        true
    }

    async fn create_user(&self, user: User) -> DatabaseResult<User> {
        self.users.insert(user)
    }

    async fn find_user(&self, id: Uuid) -> DatabaseResult<Option<User>> {
        Ok(self.users.get(id))
    }

    async fn create_patient(&self, patient: Patient) -> DatabaseResult<Patient> {
        self.patients.insert(patient)
    }

    async fn find_patient(&self, id: Uuid) -> DatabaseResult<Option<Patient>> {
        Ok(self.patients.get(id))
    }

    async fn list_patients(&self) -> DatabaseResult<Vec<Patient>> {
        let mut rows = sorted_by_key(self.patients.filter(|_| true), |p| p.created_at);
        rows.reverse();
        Ok(rows)
    }

    async fn delete_patient_cascade(&self, id: Uuid) -> DatabaseResult<Patient> {
        let _guard = self.cascade_lock.lock();

        let patient = self.patients.remove(id)?;
        let user_id = patient.user_id;

        self.users.rows.remove(&user_id);
        self.vital_signs.remove_where(|v| v.user_id == user_id);
        self.medical_histories.remove_where(|m| m.user_id == user_id);
        self.incidents.remove_where(|i| i.user_id == user_id);
        self.treatments.remove_where(|t| t.user_id == user_id);
        self.appointments.remove_where(|a| a.user_id == user_id);
        let billings = self.billings.remove_where(|b| b.user_id == user_id);
        for billing in &billings {
            self.billing_items.remove_where(|item| item.billing_id == billing.id);
        }
        self.vaccinations.remove_where(|v| v.user_id == user_id);

        Ok(patient)
    }

    async fn create_medical_history(&self, history: MedicalHistory) -> DatabaseResult<MedicalHistory> {
        self.medical_histories.insert(history)
    }

    async fn update_medical_history(&self, history: MedicalHistory) -> DatabaseResult<MedicalHistory> {
        self.medical_histories.replace(history)
    }

    async fn list_medical_histories_for_user(&self, user_id: Uuid) -> DatabaseResult<Vec<MedicalHistory>> {
        let rows = self.medical_histories.filter(|m| m.user_id == user_id);
        Ok(sorted_by_key(rows, |m| m.created_at))
    }

    async fn create_treatment(&self, treatment: Treatment) -> DatabaseResult<Treatment> {
        self.treatments.insert(treatment)
    }

    async fn list_treatments_for_user(&self, user_id: Uuid) -> DatabaseResult<Vec<Treatment>> {
        let rows = self.treatments.filter(|t| t.user_id == user_id);
        Ok(sorted_by_key(rows, |t| t.created_at))
    }

    async fn create_vital_sign(&self, vital_sign: VitalSign) -> DatabaseResult<VitalSign> {
        self.vital_signs.insert(vital_sign)
    }

    async fn list_vital_signs_for_user(&self, user_id: Uuid) -> DatabaseResult<Vec<VitalSign>> {
        let rows = self.vital_signs.filter(|v| v.user_id == user_id);
        Ok(sorted_by_key(rows, |v| v.created_at))
    }

    async fn create_incident(&self, incident: Incident) -> DatabaseResult<Incident> {
        self.incidents.insert(incident)
    }

    async fn list_incidents_for_user(&self, user_id: Uuid) -> DatabaseResult<Vec<Incident>> {
        let rows = self.incidents.filter(|i| i.user_id == user_id);
        Ok(sorted_by_key(rows, |i| i.created_at))
    }

    async fn create_branch(&self, branch: Branch) -> DatabaseResult<Branch> {
        self.branches.insert(branch)
    }

    async fn find_branch(&self, id: Uuid) -> DatabaseResult<Option<Branch>> {
        Ok(self.branches.get(id))
    }

    async fn update_branch(&self, branch: Branch) -> DatabaseResult<Branch> {
        self.branches.replace(branch)
    }

    async fn delete_branch(&self, id: Uuid) -> DatabaseResult<()> {
        self.branches.remove(id).map(|_| ())
    }

    async fn list_branches(&self) -> DatabaseResult<Vec<Branch>> {
        Ok(sorted_by_key(self.branches.filter(|_| true), |b| b.created_at))
    }

    async fn create_employee(&self, employee: Employee) -> DatabaseResult<Employee> {
        self.employees.insert(employee)
    }

    async fn find_employee(&self, id: Uuid) -> DatabaseResult<Option<Employee>> {
        Ok(self.employees.get(id))
    }

    async fn update_employee(&self, employee: Employee) -> DatabaseResult<Employee> {
        self.employees.replace(employee)
    }

    async fn delete_employee(&self, id: Uuid) -> DatabaseResult<()> {
        self.employees.remove(id).map(|_| ())
    }

    async fn list_employees(&self) -> DatabaseResult<Vec<Employee>> {
        Ok(sorted_by_key(self.employees.filter(|_| true), |e| e.first_name.clone()))
    }

    async fn create_service(&self, service: Service) -> DatabaseResult<Service> {
        self.services.insert(service)
    }

    async fn find_service(&self, id: Uuid) -> DatabaseResult<Option<Service>> {
        Ok(self.services.get(id))
    }

    async fn update_service(&self, service: Service) -> DatabaseResult<Service> {
        self.services.replace(service)
    }

    async fn delete_service(&self, id: Uuid) -> DatabaseResult<()> {
        self.services.remove(id).map(|_| ())
    }

    async fn list_services(&self) -> DatabaseResult<Vec<Service>> {
        Ok(sorted_by_key(self.services.filter(|_| true), |s| s.name.clone()))
    }

    async fn create_inventory(&self, inventory: Inventory) -> DatabaseResult<Inventory> {
        self.inventory.insert(inventory)
    }

    async fn find_inventory(&self, id: Uuid) -> DatabaseResult<Option<Inventory>> {
        Ok(self.inventory.get(id))
    }

    async fn update_inventory(&self, inventory: Inventory) -> DatabaseResult<Inventory> {
        self.inventory.replace(inventory)
    }

    async fn delete_inventory(&self, id: Uuid) -> DatabaseResult<()> {
        self.inventory.remove(id).map(|_| ())
    }

    async fn list_inventory(&self, branch_id: Option<Uuid>) -> DatabaseResult<Vec<Inventory>> {
        let rows = self
            .inventory
            .filter(|item| branch_id.map_or(true, |branch| item.branch_id == Some(branch)));
        Ok(sorted_by_key(rows, |item| item.name.clone()))
    }

    async fn compare_and_adjust_inventory(
        &self,
        id: Uuid,
        expected: InventoryCounters,
        adjustment: InventoryAdjustment,
    ) -> DatabaseResult<Option<Inventory>> {
        // the shard write lock makes the compare and the write one step
        let mut row = self
            .inventory
            .rows
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::not_found(Inventory::ENTITY, id))?;

        if row.counters() != expected {
            return Ok(None);
        }

        let next = expected.apply(adjustment);
        row.stocks = next.stocks;
        row.buffer = next.buffer;
        row.consumed = next.consumed;
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn create_appointment(&self, appointment: Appointment) -> DatabaseResult<Appointment> {
        self.appointments.insert(appointment)
    }

    async fn find_appointment(&self, id: Uuid) -> DatabaseResult<Option<Appointment>> {
        Ok(self.appointments.get(id))
    }

    async fn update_appointment_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
        user_id: Uuid,
    ) -> DatabaseResult<Appointment> {
        let mut row = self
            .appointments
            .rows
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::not_found(Appointment::ENTITY, id))?;
        row.status = status;
        row.user_id = user_id;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn list_appointments_for_user(&self, user_id: Uuid) -> DatabaseResult<Vec<Appointment>> {
        let rows = self.appointments.filter(|a| a.user_id == user_id);
        Ok(sorted_by_key(rows, |a| a.created_at))
    }

    async fn create_billing(&self, billing: Billing) -> DatabaseResult<Billing> {
        self.billings.insert(billing)
    }

    async fn find_billing(&self, id: Uuid) -> DatabaseResult<Option<Billing>> {
        Ok(self.billings.get(id))
    }

    async fn list_billings_for_user(&self, user_id: Uuid) -> DatabaseResult<Vec<Billing>> {
        let rows = self.billings.filter(|b| b.user_id == user_id);
        Ok(sorted_by_key(rows, |b| b.created_at))
    }

    async fn create_billing_item(&self, item: BillingItem) -> DatabaseResult<BillingItem> {
        if self.billings.get(item.billing_id).is_none() {
            return Err(DatabaseError::ConstraintViolation(format!(
                "billing item references missing billing {}",
                item.billing_id
            )));
        }
        self.billing_items.insert(item)
    }

    async fn list_billing_items(&self, billing_id: Uuid) -> DatabaseResult<Vec<BillingItem>> {
        Ok(self.billing_items.filter(|item| item.billing_id == billing_id))
    }

    async fn create_vaccination(&self, vaccination: Vaccination) -> DatabaseResult<Vaccination> {
        self.vaccinations.insert(vaccination)
    }

    async fn list_vaccinations_for_user(&self, user_id: Uuid) -> DatabaseResult<Vec<Vaccination>> {
        let rows = self.vaccinations.filter(|v| v.user_id == user_id);
        Ok(sorted_by_key(rows, |v| v.created_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inventory(stocks: i32, buffer: i32) -> Inventory {
        let now = Utc::now();
        Inventory {
            id: Uuid::new_v4(),
            name: "Verorab".to_string(),
            stocks,
            buffer,
            consumed: 0,
            branch_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_compare_and_adjust_rejects_stale_counters() {
        let store = InMemoryStore::new();
        let item = store.create_inventory(inventory(5, 10)).await.unwrap();
        let adjustment = InventoryAdjustment { stocks_delta: -1, buffer_delta: 0, consumed_delta: 1 };

        let updated = store
            .compare_and_adjust_inventory(item.id, item.counters(), adjustment)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.stocks, 4);

        // second write with the pre-update snapshot loses
        let stale = store
            .compare_and_adjust_inventory(item.id, item.counters(), adjustment)
            .await
            .unwrap();
        assert!(stale.is_none());
        assert_eq!(store.find_inventory(item.id).await.unwrap().unwrap().stocks, 4);
    }

    #[tokio::test]
    async fn test_missing_rows_are_not_found() {
        let store = InMemoryStore::new();
        let missing = Uuid::new_v4();

        let err = store
            .update_appointment_status(missing, AppointmentStatus::Completed, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), format!("Appointment not found ({missing})"));

        assert!(store.delete_branch(missing).await.unwrap_err().is_not_found());
        assert!(store.find_service(missing).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_patient_cascade_removes_owned_rows() {
        let store = InMemoryStore::new();
        let user = store.create_user(User::new("Ana", "Reyes", "ana@example.com")).await.unwrap();
        let other = store.create_user(User::new("Ben", "Cruz", "ben@example.com")).await.unwrap();
        let now = Utc::now();
        let patient = store
            .create_patient(Patient {
                id: Uuid::new_v4(),
                user_id: user.id,
                branch_id: None,
                age: "31".to_string(),
                sex: "Female".to_string(),
                civil_status: "Single".to_string(),
                next_kin: "Rosa Reyes".to_string(),
                contact_number: "09171234567".to_string(),
                address: "Quezon City".to_string(),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();

        store.create_appointment(Appointment::new(user.id, "2024-11-05", "9:30 AM")).await.unwrap();
        store.create_appointment(Appointment::new(other.id, "2024-11-05", "10:00 AM")).await.unwrap();
        store
            .create_vital_sign(VitalSign {
                id: Uuid::new_v4(),
                user_id: user.id,
                patient_id: patient.id,
                temperature: 36.8,
                weight: 54.0,
                pulse: 82,
                respiration: 18,
                blood_pressure: 120,
                last_intake: "Breakfast".to_string(),
                last_output: "Morning".to_string(),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
        store
            .create_incident(Incident {
                id: Uuid::new_v4(),
                user_id: user.id,
                patient_id: patient.id,
                nature_of_incident: "Bite".to_string(),
                date: "2024-11-03".to_string(),
                location: "Marikina".to_string(),
                site_of_bite: "Left calf".to_string(),
                biting_animal: "Dog".to_string(),
                action_taken: "Washed with soap".to_string(),
                clinical_impression: "Category II exposure".to_string(),
                category: "Category II".to_string(),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
        let billing = store
            .create_billing(Billing {
                id: Uuid::new_v4(),
                date: "2024-11-05".to_string(),
                time: "9:45 AM".to_string(),
                for_insurance: false,
                for_aics: false,
                user_category: "SENIOR CITIZEN".to_string(),
                user_id: user.id,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
        store
            .create_billing_item(BillingItem {
                id: Uuid::new_v4(),
                billing_id: billing.id,
                service_id: Uuid::new_v4(),
                status: "Completed".to_string(),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();

        let deleted = store.delete_patient_cascade(patient.id).await.unwrap();
        assert_eq!(deleted.id, patient.id);
        assert!(store.find_user(user.id).await.unwrap().is_none());
        assert_eq!(store.counts(), TableCounts { appointments: 1, ..TableCounts::default() });

        assert!(store.delete_patient_cascade(patient.id).await.unwrap_err().is_not_found());
    }
}
