use chrono::Utc;
use database_layer::{Incident, MedicalHistory, Patient, Treatment, User, VitalSign};
use error_common::FormFields;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Account registration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UserForm {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub family_name: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub given_name: String,
}

impl UserForm {
    pub(crate) fn into_record(self) -> User {
        User::new(self.given_name, self.family_name, self.email)
    }
}

/// General information captured when a patient is profiled
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct PatientForm {
    /// Account the profile belongs to
    pub user_id: Uuid,
    #[serde(default)]
    #[validate(length(min = 1, message = "Age is required."))]
    pub age: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Sex is required."))]
    pub sex: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Civil status is required."))]
    pub civil_status: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Next of Kin is required."))]
    pub next_kin: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Contact number is required."))]
    pub contact_number: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Home address is required."))]
    pub home_address: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Region is required."))]
    pub region: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Province is required."))]
    pub province: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Municipality is required."))]
    pub municipality: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Barangay is required."))]
    pub barangay: String,
    #[serde(default)]
    pub branch_id: Option<Uuid>,
}

impl FormFields for PatientForm {
    const FIELDS: &'static [&'static str] = &[
        "age",
        "sex",
        "civil_status",
        "next_kin",
        "contact_number",
        "home_address",
        "region",
        "province",
        "municipality",
        "barangay",
    ];
}

impl PatientForm {
    /// Street address followed by barangay, municipality, province and region
    pub fn full_address(&self) -> String {
        [
            self.home_address.as_str(),
            &self.barangay,
            &self.municipality,
            &self.province,
            &self.region,
        ]
        .join(", ")
    }

    pub(crate) fn into_record(self) -> Patient {
        let now = Utc::now();
        Patient {
            id: Uuid::new_v4(),
            address: self.full_address(),
            user_id: self.user_id,
            branch_id: self.branch_id,
            age: self.age,
            sex: self.sex,
            civil_status: self.civil_status,
            next_kin: self.next_kin,
            contact_number: self.contact_number,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One entry of the medical history list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct MedicalHistoryForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Illness is required."))]
    pub illness: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Post surgeries is required."))]
    pub post_surgeries: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Prescribed medication is required."))]
    pub medication: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Dosage is required."))]
    pub dosage: String,
}

impl FormFields for MedicalHistoryForm {
    const FIELDS: &'static [&'static str] = &["illness", "post_surgeries", "medication", "dosage"];
}

impl MedicalHistoryForm {
    /// Whether `history` already records exactly this entry
    pub(crate) fn matches(&self, history: &MedicalHistory) -> bool {
        history.illness == self.illness
            && history.post_surgeries == self.post_surgeries
            && history.medication == self.medication
            && history.dosage == self.dosage
    }

    pub(crate) fn into_record(self, patient: &Patient) -> MedicalHistory {
        let now = Utc::now();
        MedicalHistory {
            id: Uuid::new_v4(),
            user_id: patient.user_id,
            patient_id: patient.id,
            illness: self.illness,
            post_surgeries: self.post_surgeries,
            medication: self.medication,
            dosage: self.dosage,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Biologics administered for one exposure
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct TreatmentForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Treatment date is required."))]
    pub treatment_date: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Bite center is required."))]
    pub bite_center: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Tetanus toxoid is required."))]
    pub tetanus_toxoid: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Tetanus immunoglobulin is required."))]
    pub tetanus_immunoglobulin: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Tetanus serum is required."))]
    pub tetanus_serum: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Anti rabies serum is required."))]
    pub anti_rabies_serum: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Chick embryo cell vaccine is required."))]
    pub chick_embryo_cell_vaccine: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Verocell rabies vaccine is required."))]
    pub verocell_rabies_vaccine: String,
}

impl FormFields for TreatmentForm {
    const FIELDS: &'static [&'static str] = &[
        "treatment_date",
        "bite_center",
        "tetanus_toxoid",
        "tetanus_immunoglobulin",
        "tetanus_serum",
        "anti_rabies_serum",
        "chick_embryo_cell_vaccine",
        "verocell_rabies_vaccine",
    ];
}

impl TreatmentForm {
    pub(crate) fn into_record(self, patient: &Patient) -> Treatment {
        let now = Utc::now();
        Treatment {
            id: Uuid::new_v4(),
            user_id: patient.user_id,
            patient_id: patient.id,
            treatment_date: self.treatment_date,
            bite_center: self.bite_center,
            tetanus_toxoid: self.tetanus_toxoid,
            tetanus_immunoglobulin: self.tetanus_immunoglobulin,
            tetanus_serum: self.tetanus_serum,
            anti_rabies_serum: self.anti_rabies_serum,
            chick_embryo_cell_vaccine: self.chick_embryo_cell_vaccine,
            verocell_rabies_vaccine: self.verocell_rabies_vaccine,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Vital signs; a missing or zero reading counts as not taken
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct VitalSignForm {
    #[serde(default)]
    #[validate(range(min = 1.0, message = "Temperature is required."))]
    pub temperature: f64,
    #[serde(default)]
    #[validate(range(min = 1.0, message = "Weight is required."))]
    pub weight: f64,
    #[serde(default)]
    #[validate(range(min = 1, message = "Pulse is required."))]
    pub pulse: i32,
    #[serde(default)]
    #[validate(range(min = 1, message = "Respiration is required."))]
    pub respiration: i32,
    #[serde(default)]
    #[validate(range(min = 1, message = "Blood pressure is required."))]
    pub blood_pressure: i32,
    #[serde(default)]
    #[validate(length(min = 1, message = "Last intake is required."))]
    pub last_intake: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Last output is required."))]
    pub last_output: String,
}

impl FormFields for VitalSignForm {
    const FIELDS: &'static [&'static str] = &[
        "temperature",
        "weight",
        "pulse",
        "respiration",
        "blood_pressure",
        "last_intake",
        "last_output",
    ];
}

impl VitalSignForm {
    pub(crate) fn into_record(self, patient: &Patient) -> VitalSign {
        let now = Utc::now();
        VitalSign {
            id: Uuid::new_v4(),
            user_id: patient.user_id,
            patient_id: patient.id,
            temperature: self.temperature,
            weight: self.weight,
            pulse: self.pulse,
            respiration: self.respiration,
            blood_pressure: self.blood_pressure,
            last_intake: self.last_intake,
            last_output: self.last_output,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Bite or exposure report
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct IncidentForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Nature of incident is required."))]
    pub nature_of_incident: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Date of incident is required."))]
    pub date: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Place of incident is required."))]
    pub location: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Site of bite is required."))]
    pub site_of_bite: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Biting animal is required."))]
    pub biting_animal: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Action taken is required."))]
    pub action_taken: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Clinical impression is required."))]
    pub clinical_impression: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Category is required."))]
    pub category: String,
}

impl FormFields for IncidentForm {
    const FIELDS: &'static [&'static str] = &[
        "nature_of_incident",
        "date",
        "location",
        "site_of_bite",
        "biting_animal",
        "action_taken",
        "clinical_impression",
        "category",
    ];
}

impl IncidentForm {
    pub(crate) fn into_record(self, patient: &Patient) -> Incident {
        let now = Utc::now();
        Incident {
            id: Uuid::new_v4(),
            user_id: patient.user_id,
            patient_id: patient.id,
            nature_of_incident: self.nature_of_incident,
            date: self.date,
            location: self.location,
            site_of_bite: self.site_of_bite,
            biting_animal: self.biting_animal,
            action_taken: self.action_taken,
            clinical_impression: self.clinical_impression,
            category: self.category,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A patient profile with every clinical record its user owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatientChart {
    pub patient: Patient,
    pub user: User,
    pub medical_histories: Vec<MedicalHistory>,
    pub vital_signs: Vec<VitalSign>,
    pub incidents: Vec<Incident>,
    pub treatments: Vec<Treatment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_runs_from_street_to_region() {
        let form = PatientForm {
            home_address: "12 Mabini St.".to_string(),
            barangay: "Concepcion Uno".to_string(),
            municipality: "Marikina".to_string(),
            province: "Metro Manila".to_string(),
            region: "NCR".to_string(),
            ..Default::default()
        };
        assert_eq!(form.full_address(), "12 Mabini St., Concepcion Uno, Marikina, Metro Manila, NCR");
    }

    #[test]
    fn test_vital_signs_default_to_missing() {
        let form: VitalSignForm = serde_json::from_str(r#"{ "temperature": 36.5 }"#).unwrap();
        let errors = form.validate().unwrap_err();
        assert!(!errors.field_errors().contains_key("temperature"));
        assert!(errors.field_errors().contains_key("pulse"));
    }
}
