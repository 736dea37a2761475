use std::sync::Arc;

use chrono::Utc;
use database_layer::{ClinicStore, Incident, MedicalHistory, Patient, Treatment, User, VitalSign};
use error_common::{join_validation_errors, validation_messages, FormFields, VALIDATION_PREFIX};
use logger_redacted::redacted_info;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::error::{PatientError, PatientResult};
use crate::models::{
    IncidentForm, MedicalHistoryForm, PatientChart, PatientForm, TreatmentForm, UserForm, VitalSignForm,
};

/// Registration fails with this single message whatever is missing
pub const ALL_FIELDS_REQUIRED: &str = "All fields are required.";

fn validate_form<F: Validate + FormFields>(form: &F) -> PatientResult<()> {
    form.validate()
        .map_err(|errors| PatientError::Validation(join_validation_errors(&errors, F::FIELDS)))
}

/// Registration, patient profiles and intake records
#[derive(Clone)]
pub struct PatientService {
    store: Arc<dyn ClinicStore>,
}

impl PatientService {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }

    /// Create the account appointments, billings and patient records hang off
    pub async fn register_user(&self, form: UserForm) -> PatientResult<User> {
        if form.validate().is_err() {
            return Err(PatientError::Validation(ALL_FIELDS_REQUIRED.to_string()));
        }
        let user = self
            .store
            .create_user(form.into_record())
            .await
            .map_err(PatientError::persistence("create user"))?;
        redacted_info!("User {} registered with email {}", user.id, user.email);
        Ok(user)
    }

    /// Profile an existing user as a patient
    pub async fn create_patient(&self, form: PatientForm) -> PatientResult<Patient> {
        validate_form(&form)?;
        self.store
            .find_user(form.user_id)
            .await
            .map_err(PatientError::persistence("create patient"))?
            .ok_or(PatientError::UserNotFound(form.user_id))?;

        let patient = self
            .store
            .create_patient(form.into_record())
            .await
            .map_err(PatientError::persistence("create patient"))?;
        info!(patient_id = %patient.id, user_id = %patient.user_id, "Patient created");
        Ok(patient)
    }

    /// Newest patients first
    pub async fn list_patients(&self) -> PatientResult<Vec<Patient>> {
        self.store
            .list_patients()
            .await
            .map_err(PatientError::persistence("load patients"))
    }

    async fn resolve_patient(&self, id: Uuid, action: &'static str) -> PatientResult<Patient> {
        self.store
            .find_patient(id)
            .await
            .map_err(PatientError::persistence(action))?
            .ok_or(PatientError::PatientNotFound(id))
    }

    /// The patient's profile, account and clinical records
    pub async fn patient_chart(&self, id: Uuid) -> PatientResult<PatientChart> {
        const ACTION: &str = "load patient";
        let patient = self.resolve_patient(id, ACTION).await?;
        let user = self
            .store
            .find_user(patient.user_id)
            .await
            .map_err(PatientError::persistence(ACTION))?
            .ok_or(PatientError::UserNotFound(patient.user_id))?;

        let medical_histories = self
            .store
            .list_medical_histories_for_user(patient.user_id)
            .await
            .map_err(PatientError::persistence(ACTION))?;
        let vital_signs = self
            .store
            .list_vital_signs_for_user(patient.user_id)
            .await
            .map_err(PatientError::persistence(ACTION))?;
        let incidents = self
            .store
            .list_incidents_for_user(patient.user_id)
            .await
            .map_err(PatientError::persistence(ACTION))?;
        let treatments = self
            .store
            .list_treatments_for_user(patient.user_id)
            .await
            .map_err(PatientError::persistence(ACTION))?;

        Ok(PatientChart {
            patient,
            user,
            medical_histories,
            vital_signs,
            incidents,
            treatments,
        })
    }

    /// Save a list of medical history entries.
    ///
    /// Every entry is validated before anything is written. An entry the
    /// user already has on file is refreshed instead of duplicated.
    #[instrument(skip(self, entries), fields(entries = entries.len()))]
    pub async fn record_medical_history(
        &self,
        patient_id: Uuid,
        entries: Vec<MedicalHistoryForm>,
    ) -> PatientResult<Vec<MedicalHistory>> {
        const ACTION: &str = "create or update medical histories";

        let messages: Vec<String> = entries
            .iter()
            .filter_map(|entry| entry.validate().err())
            .flat_map(|errors| validation_messages(&errors, MedicalHistoryForm::FIELDS))
            .collect();
        if !messages.is_empty() {
            return Err(PatientError::Validation(format!("{VALIDATION_PREFIX}{}", messages.join(", "))));
        }

        let patient = self.resolve_patient(patient_id, ACTION).await?;
        let mut on_file = self
            .store
            .list_medical_histories_for_user(patient.user_id)
            .await
            .map_err(PatientError::persistence(ACTION))?;

        let mut saved = Vec::with_capacity(entries.len());
        for entry in entries {
            let existing = on_file.iter().find(|history| entry.matches(history)).cloned();
            let record = match existing {
                Some(existing) => self
                    .store
                    .update_medical_history(MedicalHistory {
                        updated_at: Utc::now(),
                        ..existing
                    })
                    .await
                    .map_err(PatientError::persistence(ACTION))?,
                None => {
                    let created = self
                        .store
                        .create_medical_history(entry.into_record(&patient))
                        .await
                        .map_err(PatientError::persistence(ACTION))?;
                    on_file.push(created.clone());
                    created
                }
            };
            saved.push(record);
        }

        info!(patient_id = %patient_id, saved = saved.len(), "Medical history saved");
        Ok(saved)
    }

    pub async fn record_treatment(&self, patient_id: Uuid, form: TreatmentForm) -> PatientResult<Treatment> {
        validate_form(&form)?;
        let patient = self.resolve_patient(patient_id, "create treatment history").await?;
        let treatment = self
            .store
            .create_treatment(form.into_record(&patient))
            .await
            .map_err(PatientError::persistence("create treatment history"))?;
        info!(patient_id = %patient_id, treatment_id = %treatment.id, "Treatment recorded");
        Ok(treatment)
    }

    pub async fn record_vital_sign(&self, patient_id: Uuid, form: VitalSignForm) -> PatientResult<VitalSign> {
        validate_form(&form)?;
        let patient = self.resolve_patient(patient_id, "create vital sign").await?;
        let vital_sign = self
            .store
            .create_vital_sign(form.into_record(&patient))
            .await
            .map_err(PatientError::persistence("create vital sign"))?;
        info!(patient_id = %patient_id, vital_sign_id = %vital_sign.id, "Vital signs recorded");
        Ok(vital_sign)
    }

    pub async fn record_incident(&self, patient_id: Uuid, form: IncidentForm) -> PatientResult<Incident> {
        validate_form(&form)?;
        let patient = self.resolve_patient(patient_id, "create incident").await?;
        let incident = self
            .store
            .create_incident(form.into_record(&patient))
            .await
            .map_err(PatientError::persistence("create incident"))?;
        info!(patient_id = %patient_id, incident_id = %incident.id, "Incident recorded");
        Ok(incident)
    }

    /// Delete a patient with its user and everything that user owns.
    ///
    /// Inventory counters are left as they are.
    pub async fn delete_patient(&self, id: Uuid) -> PatientResult<Patient> {
        let patient = self
            .store
            .delete_patient_cascade(id)
            .await
            .map_err(PatientError::persistence("delete patient"))?;
        info!(patient_id = %id, user_id = %patient.user_id, "Patient deleted");
        Ok(patient)
    }
}
