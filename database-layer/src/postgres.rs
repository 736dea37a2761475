// PostgreSQL-backed persistence gateway
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::connection::DatabasePool;
use crate::error::{DatabaseError, DatabaseResult};
use crate::models::*;
use crate::store::ClinicStore;

/// `ClinicStore` over a PostgreSQL connection pool
#[derive(Clone)]
pub struct PgStore {
    db: DatabasePool,
}

impl PgStore {
    pub fn new(db: DatabasePool) -> Self {
        Self { db }
    }

    fn pool(&self) -> &PgPool {
        self.db.pool()
    }

    async fn delete_by_id(&self, table: &'static str, entity: &'static str, id: Uuid) -> DatabaseResult<()> {
        let sql = format!("DELETE FROM {table} WHERE id = $1");
        let result = sqlx::query(&sql).bind(id).execute(self.pool()).await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(entity, id));
        }
        Ok(())
    }
}

/// Map a unique or foreign-key failure onto a constraint violation
fn map_write_error(err: sqlx::Error) -> DatabaseError {
    match &err {
        sqlx::Error::Database(db_err)
            if db_err.is_unique_violation() || db_err.is_foreign_key_violation() =>
        {
            DatabaseError::ConstraintViolation(db_err.message().to_string())
        }
        _ => DatabaseError::SqlxError(err),
    }
}

#[async_trait]
impl ClinicStore for PgStore {
    async fn is_healthy(&self) -> bool {
        self.db.is_healthy().await
    }

    async fn create_user(&self, user: User) -> DatabaseResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, first_name, last_name, email, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(self.pool())
        .await
        .map_err(map_write_error)
    }

    async fn find_user(&self, id: Uuid) -> DatabaseResult<Option<User>> {
        Ok(sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?)
    }

    async fn create_patient(&self, patient: Patient) -> DatabaseResult<Patient> {
        sqlx::query_as::<_, Patient>(
            "INSERT INTO patients (id, user_id, branch_id, age, sex, civil_status, next_kin,
                                   contact_number, address, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING *",
        )
        .bind(patient.id)
        .bind(patient.user_id)
        .bind(patient.branch_id)
        .bind(&patient.age)
        .bind(&patient.sex)
        .bind(&patient.civil_status)
        .bind(&patient.next_kin)
        .bind(&patient.contact_number)
        .bind(&patient.address)
        .bind(patient.created_at)
        .bind(patient.updated_at)
        .fetch_one(self.pool())
        .await
        .map_err(map_write_error)
    }

    async fn find_patient(&self, id: Uuid) -> DatabaseResult<Option<Patient>> {
        Ok(sqlx::query_as::<_, Patient>("SELECT * FROM patients WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?)
    }

    async fn list_patients(&self) -> DatabaseResult<Vec<Patient>> {
        Ok(sqlx::query_as::<_, Patient>("SELECT * FROM patients ORDER BY created_at DESC")
            .fetch_all(self.pool())
            .await?)
    }

    async fn delete_patient_cascade(&self, id: Uuid) -> DatabaseResult<Patient> {
        let mut tx = self.pool().begin().await?;

        let patient = sqlx::query_as::<_, Patient>("DELETE FROM patients WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DatabaseError::not_found(Patient::ENTITY, id))?;

        for sql in [
            "DELETE FROM vital_signs WHERE user_id = $1",
            "DELETE FROM medical_histories WHERE user_id = $1",
            "DELETE FROM incidents WHERE user_id = $1",
            "DELETE FROM treatments WHERE user_id = $1",
            "DELETE FROM billing_items WHERE billing_id IN (SELECT id FROM billings WHERE user_id = $1)",
            "DELETE FROM billings WHERE user_id = $1",
            "DELETE FROM vaccinations WHERE user_id = $1",
            "DELETE FROM appointments WHERE user_id = $1",
            "DELETE FROM users WHERE id = $1",
        ] {
            sqlx::query(sql).bind(patient.user_id).execute(&mut *tx).await?;
        }

        tx.commit().await?;
        debug!("Deleted patient {} and owned records", id);
        Ok(patient)
    }

    async fn create_medical_history(&self, history: MedicalHistory) -> DatabaseResult<MedicalHistory> {
        sqlx::query_as::<_, MedicalHistory>(
            "INSERT INTO medical_histories (id, user_id, patient_id, illness, post_surgeries, medication,
                                            dosage, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(history.id)
        .bind(history.user_id)
        .bind(history.patient_id)
        .bind(&history.illness)
        .bind(&history.post_surgeries)
        .bind(&history.medication)
        .bind(&history.dosage)
        .bind(history.created_at)
        .bind(history.updated_at)
        .fetch_one(self.pool())
        .await
        .map_err(map_write_error)
    }

    async fn update_medical_history(&self, history: MedicalHistory) -> DatabaseResult<MedicalHistory> {
        sqlx::query_as::<_, MedicalHistory>(
            "UPDATE medical_histories SET illness = $2, post_surgeries = $3, medication = $4, dosage = $5,
                                          updated_at = $6
             WHERE id = $1 RETURNING *",
        )
        .bind(history.id)
        .bind(&history.illness)
        .bind(&history.post_surgeries)
        .bind(&history.medication)
        .bind(&history.dosage)
        .bind(history.updated_at)
        .fetch_optional(self.pool())
        .await
        .map_err(map_write_error)?
        .ok_or_else(|| DatabaseError::not_found(MedicalHistory::ENTITY, history.id))
    }

    async fn list_medical_histories_for_user(&self, user_id: Uuid) -> DatabaseResult<Vec<MedicalHistory>> {
        Ok(sqlx::query_as::<_, MedicalHistory>(
            "SELECT * FROM medical_histories WHERE user_id = $1 ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await?)
    }

    async fn create_treatment(&self, treatment: Treatment) -> DatabaseResult<Treatment> {
        sqlx::query_as::<_, Treatment>(
            "INSERT INTO treatments (id, user_id, patient_id, treatment_date, bite_center, tetanus_toxoid,
                                     tetanus_immunoglobulin, tetanus_serum, anti_rabies_serum,
                                     chick_embryo_cell_vaccine, verocell_rabies_vaccine, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) RETURNING *",
        )
        .bind(treatment.id)
        .bind(treatment.user_id)
        .bind(treatment.patient_id)
        .bind(&treatment.treatment_date)
        .bind(&treatment.bite_center)
        .bind(&treatment.tetanus_toxoid)
        .bind(&treatment.tetanus_immunoglobulin)
        .bind(&treatment.tetanus_serum)
        .bind(&treatment.anti_rabies_serum)
        .bind(&treatment.chick_embryo_cell_vaccine)
        .bind(&treatment.verocell_rabies_vaccine)
        .bind(treatment.created_at)
        .bind(treatment.updated_at)
        .fetch_one(self.pool())
        .await
        .map_err(map_write_error)
    }

    async fn list_treatments_for_user(&self, user_id: Uuid) -> DatabaseResult<Vec<Treatment>> {
        Ok(
            sqlx::query_as::<_, Treatment>("SELECT * FROM treatments WHERE user_id = $1 ORDER BY created_at")
                .bind(user_id)
                .fetch_all(self.pool())
                .await?,
        )
    }

    async fn create_vital_sign(&self, vital_sign: VitalSign) -> DatabaseResult<VitalSign> {
        sqlx::query_as::<_, VitalSign>(
            "INSERT INTO vital_signs (id, user_id, patient_id, temperature, weight, pulse, respiration,
                                      blood_pressure, last_intake, last_output, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING *",
        )
        .bind(vital_sign.id)
        .bind(vital_sign.user_id)
        .bind(vital_sign.patient_id)
        .bind(vital_sign.temperature)
        .bind(vital_sign.weight)
        .bind(vital_sign.pulse)
        .bind(vital_sign.respiration)
        .bind(vital_sign.blood_pressure)
        .bind(&vital_sign.last_intake)
        .bind(&vital_sign.last_output)
        .bind(vital_sign.created_at)
        .bind(vital_sign.updated_at)
        .fetch_one(self.pool())
        .await
        .map_err(map_write_error)
    }

    async fn list_vital_signs_for_user(&self, user_id: Uuid) -> DatabaseResult<Vec<VitalSign>> {
        Ok(
            sqlx::query_as::<_, VitalSign>("SELECT * FROM vital_signs WHERE user_id = $1 ORDER BY created_at")
                .bind(user_id)
                .fetch_all(self.pool())
                .await?,
        )
    }

    async fn create_incident(&self, incident: Incident) -> DatabaseResult<Incident> {
        sqlx::query_as::<_, Incident>(
            "INSERT INTO incidents (id, user_id, patient_id, nature_of_incident, date, location, site_of_bite,
                                    biting_animal, action_taken, clinical_impression, category,
                                    created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) RETURNING *",
        )
        .bind(incident.id)
        .bind(incident.user_id)
        .bind(incident.patient_id)
        .bind(&incident.nature_of_incident)
        .bind(&incident.date)
        .bind(&incident.location)
        .bind(&incident.site_of_bite)
        .bind(&incident.biting_animal)
        .bind(&incident.action_taken)
        .bind(&incident.clinical_impression)
        .bind(&incident.category)
        .bind(incident.created_at)
        .bind(incident.updated_at)
        .fetch_one(self.pool())
        .await
        .map_err(map_write_error)
    }

    async fn list_incidents_for_user(&self, user_id: Uuid) -> DatabaseResult<Vec<Incident>> {
        Ok(
            sqlx::query_as::<_, Incident>("SELECT * FROM incidents WHERE user_id = $1 ORDER BY created_at")
                .bind(user_id)
                .fetch_all(self.pool())
                .await?,
        )
    }

    async fn create_branch(&self, branch: Branch) -> DatabaseResult<Branch> {
        sqlx::query_as::<_, Branch>(
            "INSERT INTO branches (id, name, contact, address, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(branch.id)
        .bind(&branch.name)
        .bind(&branch.contact)
        .bind(&branch.address)
        .bind(branch.created_at)
        .bind(branch.updated_at)
        .fetch_one(self.pool())
        .await
        .map_err(map_write_error)
    }

    async fn find_branch(&self, id: Uuid) -> DatabaseResult<Option<Branch>> {
        Ok(sqlx::query_as::<_, Branch>("SELECT * FROM branches WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?)
    }

    async fn update_branch(&self, branch: Branch) -> DatabaseResult<Branch> {
        sqlx::query_as::<_, Branch>(
            "UPDATE branches SET name = $2, contact = $3, address = $4, updated_at = $5
             WHERE id = $1 RETURNING *",
        )
        .bind(branch.id)
        .bind(&branch.name)
        .bind(&branch.contact)
        .bind(&branch.address)
        .bind(branch.updated_at)
        .fetch_optional(self.pool())
        .await
        .map_err(map_write_error)?
        .ok_or_else(|| DatabaseError::not_found(Branch::ENTITY, branch.id))
    }

    async fn delete_branch(&self, id: Uuid) -> DatabaseResult<()> {
        self.delete_by_id("branches", Branch::ENTITY, id).await
    }

    async fn list_branches(&self) -> DatabaseResult<Vec<Branch>> {
        Ok(sqlx::query_as::<_, Branch>("SELECT * FROM branches ORDER BY created_at")
            .fetch_all(self.pool())
            .await?)
    }

    async fn create_employee(&self, employee: Employee) -> DatabaseResult<Employee> {
        sqlx::query_as::<_, Employee>(
            "INSERT INTO employees (id, first_name, last_name, email, image_url, role, branch_id,
                                    created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(employee.id)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.email)
        .bind(&employee.image_url)
        .bind(&employee.role)
        .bind(employee.branch_id)
        .bind(employee.created_at)
        .bind(employee.updated_at)
        .fetch_one(self.pool())
        .await
        .map_err(map_write_error)
    }

    async fn find_employee(&self, id: Uuid) -> DatabaseResult<Option<Employee>> {
        Ok(sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?)
    }

    async fn update_employee(&self, employee: Employee) -> DatabaseResult<Employee> {
        sqlx::query_as::<_, Employee>(
            "UPDATE employees SET first_name = $2, last_name = $3, email = $4, image_url = $5,
                                  role = $6, branch_id = $7, updated_at = $8
             WHERE id = $1 RETURNING *",
        )
        .bind(employee.id)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.email)
        .bind(&employee.image_url)
        .bind(&employee.role)
        .bind(employee.branch_id)
        .bind(employee.updated_at)
        .fetch_optional(self.pool())
        .await
        .map_err(map_write_error)?
        .ok_or_else(|| DatabaseError::not_found(Employee::ENTITY, employee.id))
    }

    async fn delete_employee(&self, id: Uuid) -> DatabaseResult<()> {
        self.delete_by_id("employees", Employee::ENTITY, id).await
    }

    async fn list_employees(&self) -> DatabaseResult<Vec<Employee>> {
        Ok(sqlx::query_as::<_, Employee>("SELECT * FROM employees ORDER BY first_name")
            .fetch_all(self.pool())
            .await?)
    }

    async fn create_service(&self, service: Service) -> DatabaseResult<Service> {
        sqlx::query_as::<_, Service>(
            "INSERT INTO services (id, name, description, price, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(service.id)
        .bind(&service.name)
        .bind(&service.description)
        .bind(service.price)
        .bind(service.created_at)
        .bind(service.updated_at)
        .fetch_one(self.pool())
        .await
        .map_err(map_write_error)
    }

    async fn find_service(&self, id: Uuid) -> DatabaseResult<Option<Service>> {
        Ok(sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?)
    }

    async fn update_service(&self, service: Service) -> DatabaseResult<Service> {
        sqlx::query_as::<_, Service>(
            "UPDATE services SET name = $2, description = $3, price = $4, updated_at = $5
             WHERE id = $1 RETURNING *",
        )
        .bind(service.id)
        .bind(&service.name)
        .bind(&service.description)
        .bind(service.price)
        .bind(service.updated_at)
        .fetch_optional(self.pool())
        .await
        .map_err(map_write_error)?
        .ok_or_else(|| DatabaseError::not_found(Service::ENTITY, service.id))
    }

    async fn delete_service(&self, id: Uuid) -> DatabaseResult<()> {
        self.delete_by_id("services", Service::ENTITY, id).await
    }

    async fn list_services(&self) -> DatabaseResult<Vec<Service>> {
        Ok(sqlx::query_as::<_, Service>("SELECT * FROM services ORDER BY name")
            .fetch_all(self.pool())
            .await?)
    }

    async fn create_inventory(&self, inventory: Inventory) -> DatabaseResult<Inventory> {
        sqlx::query_as::<_, Inventory>(
            "INSERT INTO inventory (id, name, stocks, buffer, consumed, branch_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(inventory.id)
        .bind(&inventory.name)
        .bind(inventory.stocks)
        .bind(inventory.buffer)
        .bind(inventory.consumed)
        .bind(inventory.branch_id)
        .bind(inventory.created_at)
        .bind(inventory.updated_at)
        .fetch_one(self.pool())
        .await
        .map_err(map_write_error)
    }

    async fn find_inventory(&self, id: Uuid) -> DatabaseResult<Option<Inventory>> {
        Ok(sqlx::query_as::<_, Inventory>("SELECT * FROM inventory WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?)
    }

    async fn update_inventory(&self, inventory: Inventory) -> DatabaseResult<Inventory> {
        sqlx::query_as::<_, Inventory>(
            "UPDATE inventory SET name = $2, stocks = $3, buffer = $4, consumed = $5,
                                  branch_id = $6, updated_at = $7
             WHERE id = $1 RETURNING *",
        )
        .bind(inventory.id)
        .bind(&inventory.name)
        .bind(inventory.stocks)
        .bind(inventory.buffer)
        .bind(inventory.consumed)
        .bind(inventory.branch_id)
        .bind(inventory.updated_at)
        .fetch_optional(self.pool())
        .await
        .map_err(map_write_error)?
        .ok_or_else(|| DatabaseError::not_found(Inventory::ENTITY, inventory.id))
    }

    async fn delete_inventory(&self, id: Uuid) -> DatabaseResult<()> {
        self.delete_by_id("inventory", Inventory::ENTITY, id).await
    }

    async fn list_inventory(&self, branch_id: Option<Uuid>) -> DatabaseResult<Vec<Inventory>> {
        Ok(sqlx::query_as::<_, Inventory>(
            "SELECT * FROM inventory WHERE ($1::uuid IS NULL OR branch_id = $1) ORDER BY name",
        )
        .bind(branch_id)
        .fetch_all(self.pool())
        .await?)
    }

    async fn compare_and_adjust_inventory(
        &self,
        id: Uuid,
        expected: InventoryCounters,
        adjustment: InventoryAdjustment,
    ) -> DatabaseResult<Option<Inventory>> {
        let next = expected.apply(adjustment);
        let updated = sqlx::query_as::<_, Inventory>(
            "UPDATE inventory SET stocks = $5, buffer = $6, consumed = $7, updated_at = $8
             WHERE id = $1 AND stocks = $2 AND buffer = $3 AND consumed = $4
             RETURNING *",
        )
        .bind(id)
        .bind(expected.stocks)
        .bind(expected.buffer)
        .bind(expected.consumed)
        .bind(next.stocks)
        .bind(next.buffer)
        .bind(next.consumed)
        .bind(Utc::now())
        .fetch_optional(self.pool())
        .await?;

        if updated.is_some() {
            return Ok(updated);
        }

        // zero rows: either the counters moved or the row is gone
        match self.find_inventory(id).await? {
            Some(_) => Ok(None),
            None => Err(DatabaseError::not_found(Inventory::ENTITY, id)),
        }
    }

    async fn create_appointment(&self, appointment: Appointment) -> DatabaseResult<Appointment> {
        sqlx::query_as::<_, Appointment>(
            "INSERT INTO appointments (id, date, time, status, user_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(appointment.id)
        .bind(&appointment.date)
        .bind(&appointment.time)
        .bind(appointment.status.as_str())
        .bind(appointment.user_id)
        .bind(appointment.created_at)
        .bind(appointment.updated_at)
        .fetch_one(self.pool())
        .await
        .map_err(map_write_error)
    }

    async fn find_appointment(&self, id: Uuid) -> DatabaseResult<Option<Appointment>> {
        Ok(sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?)
    }

    async fn update_appointment_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
        user_id: Uuid,
    ) -> DatabaseResult<Appointment> {
        sqlx::query_as::<_, Appointment>(
            "UPDATE appointments SET status = $2, user_id = $3, updated_at = $4
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status.as_str())
        .bind(user_id)
        .bind(Utc::now())
        .fetch_optional(self.pool())
        .await
        .map_err(map_write_error)?
        .ok_or_else(|| DatabaseError::not_found(Appointment::ENTITY, id))
    }

    async fn list_appointments_for_user(&self, user_id: Uuid) -> DatabaseResult<Vec<Appointment>> {
        Ok(sqlx::query_as::<_, Appointment>(
            "SELECT * FROM appointments WHERE user_id = $1 ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await?)
    }

    async fn create_billing(&self, billing: Billing) -> DatabaseResult<Billing> {
        sqlx::query_as::<_, Billing>(
            "INSERT INTO billings (id, date, time, for_insurance, for_aics, user_category, user_id,
                                   created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(billing.id)
        .bind(&billing.date)
        .bind(&billing.time)
        .bind(billing.for_insurance)
        .bind(billing.for_aics)
        .bind(&billing.user_category)
        .bind(billing.user_id)
        .bind(billing.created_at)
        .bind(billing.updated_at)
        .fetch_one(self.pool())
        .await
        .map_err(map_write_error)
    }

    async fn find_billing(&self, id: Uuid) -> DatabaseResult<Option<Billing>> {
        Ok(sqlx::query_as::<_, Billing>("SELECT * FROM billings WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?)
    }

    async fn list_billings_for_user(&self, user_id: Uuid) -> DatabaseResult<Vec<Billing>> {
        Ok(sqlx::query_as::<_, Billing>(
            "SELECT * FROM billings WHERE user_id = $1 ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await?)
    }

    async fn create_billing_item(&self, item: BillingItem) -> DatabaseResult<BillingItem> {
        sqlx::query_as::<_, BillingItem>(
            "INSERT INTO billing_items (id, billing_id, service_id, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(item.id)
        .bind(item.billing_id)
        .bind(item.service_id)
        .bind(&item.status)
        .bind(item.created_at)
        .bind(item.updated_at)
        .fetch_one(self.pool())
        .await
        .map_err(map_write_error)
    }

    async fn list_billing_items(&self, billing_id: Uuid) -> DatabaseResult<Vec<BillingItem>> {
        Ok(sqlx::query_as::<_, BillingItem>(
            "SELECT * FROM billing_items WHERE billing_id = $1 ORDER BY created_at",
        )
        .bind(billing_id)
        .fetch_all(self.pool())
        .await?)
    }

    async fn create_vaccination(&self, vaccination: Vaccination) -> DatabaseResult<Vaccination> {
        sqlx::query_as::<_, Vaccination>(
            "INSERT INTO vaccinations (id, inventory_id, quantity, user_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(vaccination.id)
        .bind(vaccination.inventory_id)
        .bind(vaccination.quantity)
        .bind(vaccination.user_id)
        .bind(vaccination.created_at)
        .bind(vaccination.updated_at)
        .fetch_one(self.pool())
        .await
        .map_err(map_write_error)
    }

    async fn list_vaccinations_for_user(&self, user_id: Uuid) -> DatabaseResult<Vec<Vaccination>> {
        Ok(sqlx::query_as::<_, Vaccination>(
            "SELECT * FROM vaccinations WHERE user_id = $1 ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await?)
    }
}
