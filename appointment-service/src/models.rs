use billing_service::{ComposedBilling, PayerCategory, SelectedService};
use database_layer::{Appointment, AppointmentStatus, Vaccination};
use error_common::{field_error, finish_validation, join_validation_errors, FormFields};
use inventory_service::DeductionReceipt;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{SettlementError, SettlementResult};

/// Billing fields of the settlement form, as submitted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct BillingForm {
    /// Patient display name
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,
    /// `"true"` in any case means yes, anything else means no
    #[serde(default)]
    pub for_insurance: Option<String>,
    #[serde(default)]
    pub for_aics: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "User category is required."))]
    pub user_category: String,
}

/// Billing fields after validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedBilling {
    pub for_insurance: bool,
    pub for_aics: bool,
    pub user_category: PayerCategory,
}

fn coerce_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

/// One administered vaccine on the settlement form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SelectedVaccination {
    pub inventory_id: Uuid,
    pub quantity: i32,
}

/// Everything needed to settle one appointment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SettlementRequest {
    /// Patient user the appointment, billing and vaccinations belong to
    pub user_id: Uuid,
    /// `On Going` for a checkpoint, `Completed` for final settlement
    pub status: AppointmentStatus,
    pub form: BillingForm,
    #[serde(default)]
    pub services: Vec<SelectedService>,
    #[serde(default)]
    pub vaccinations: Vec<SelectedVaccination>,
}

/// Billing form fields first, then the checks on the request itself
impl FormFields for SettlementRequest {
    const FIELDS: &'static [&'static str] = &[
        "name",
        "for_insurance",
        "for_aics",
        "user_category",
        "status",
        "services",
        "vaccinations",
    ];
}

impl SettlementRequest {
    /// Check every submitted field, reporting all failures in one message
    pub fn validate_fields(&self) -> SettlementResult<ValidatedBilling> {
        let mut extra = Vec::new();

        let category = self.form.user_category.parse::<PayerCategory>();
        if category.is_err() && !self.form.user_category.is_empty() {
            extra.push(("user_category", field_error("invalid", "User category is invalid.")));
        }
        if !matches!(self.status, AppointmentStatus::OnGoing | AppointmentStatus::Completed) {
            extra.push(("status", field_error("invalid", "Status must be On Going or Completed.")));
        }
        if self.vaccinations.iter().any(|v| v.quantity < 1) {
            extra.push(("vaccinations", field_error("range", "Vaccination quantity must be at least 1.")));
        }

        finish_validation(self.form.validate(), extra)
            .map_err(|errors| SettlementError::Validation(join_validation_errors(&errors, Self::FIELDS)))?;

        let user_category = category.map_err(SettlementError::Validation)?;
        Ok(ValidatedBilling {
            for_insurance: coerce_flag(self.form.for_insurance.as_deref()),
            for_aics: coerce_flag(self.form.for_aics.as_deref()),
            user_category,
        })
    }
}

/// Result of a successful settlement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SettlementOutcome {
    pub success: String,
    pub appointment: Appointment,
    pub billing: ComposedBilling,
    pub vaccinations: Vec<Vaccination>,
    pub deductions: Vec<DeductionReceipt>,
}

/// New appointment request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AppointmentRequest {
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(form: BillingForm) -> SettlementRequest {
        SettlementRequest {
            user_id: Uuid::new_v4(),
            status: AppointmentStatus::Completed,
            form,
            services: Vec::new(),
            vaccinations: Vec::new(),
        }
    }

    #[test]
    fn test_flags_coerce_from_strings() {
        let validated = request(BillingForm {
            name: "Ana Reyes".to_string(),
            for_insurance: Some("TRUE".to_string()),
            for_aics: Some("yes".to_string()),
            user_category: "4PS".to_string(),
        })
        .validate_fields()
        .unwrap();

        assert!(validated.for_insurance);
        assert!(!validated.for_aics);
        assert_eq!(validated.user_category, PayerCategory::FourPs);
    }

    #[test]
    fn test_missing_fields_join_into_one_message() {
        let err = request(BillingForm::default()).validate_fields().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation Error: Name is required., User category is required."
        );
    }

    #[test]
    fn test_pending_target_and_zero_quantity_rejected() {
        let mut req = request(BillingForm {
            name: "Ana Reyes".to_string(),
            user_category: "LISTAHANAN".to_string(),
            ..Default::default()
        });
        req.status = AppointmentStatus::Pending;
        req.vaccinations.push(SelectedVaccination { inventory_id: Uuid::new_v4(), quantity: 0 });

        let err = req.validate_fields().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation Error: Status must be On Going or Completed., \
             Vaccination quantity must be at least 1."
        );
    }

    #[test]
    fn test_unknown_category_is_invalid() {
        let err = request(BillingForm {
            name: "Ana Reyes".to_string(),
            user_category: "VIP".to_string(),
            ..Default::default()
        })
        .validate_fields()
        .unwrap_err();
        assert_eq!(err.to_string(), "Validation Error: User category is invalid.");
    }
}
