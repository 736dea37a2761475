use axum::Json;
use utoipa::OpenApi;

/// OpenAPI document for the clinic API
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::appointments::create_appointment,
        crate::handlers::appointments::get_appointment,
        crate::handlers::appointments::settle_appointment,
        crate::handlers::inventory::list_inventory,
        crate::handlers::inventory::create_inventory,
        crate::handlers::inventory::update_inventory,
        crate::handlers::inventory::delete_inventory,
        crate::handlers::inventory::deduct_inventory,
        crate::handlers::services::list_services,
        crate::handlers::services::create_service,
        crate::handlers::services::update_service,
        crate::handlers::services::delete_service,
        crate::handlers::branches::list_branches,
        crate::handlers::branches::create_branch,
        crate::handlers::branches::update_branch,
        crate::handlers::branches::delete_branch,
        crate::handlers::employees::list_employees,
        crate::handlers::employees::create_employee,
        crate::handlers::employees::update_employee,
        crate::handlers::employees::delete_employee,
        crate::handlers::patients::register_user,
        crate::handlers::patients::list_patients,
        crate::handlers::patients::create_patient,
        crate::handlers::patients::get_patient_chart,
        crate::handlers::patients::record_medical_history,
        crate::handlers::patients::record_vital_sign,
        crate::handlers::patients::record_incident,
        crate::handlers::patients::record_treatment,
        crate::handlers::patients::delete_patient,
    ),
    components(
        schemas(
            crate::error::ApiErrorResponse,
            crate::handlers::health::HealthResponse,
            crate::handlers::inventory::DeductRequest,
            crate::handlers::branches::BranchForm,
            crate::handlers::employees::EmployeeForm,
            appointment_service::AppointmentRequest,
            appointment_service::BillingForm,
            appointment_service::SelectedVaccination,
            appointment_service::SettlementRequest,
            appointment_service::SettlementOutcome,
            billing_service::SelectedService,
            billing_service::ComposedBilling,
            billing_service::ServiceForm,
            inventory_service::InventoryForm,
            inventory_service::DeductionReceipt,
            patient_service::UserForm,
            patient_service::PatientForm,
            patient_service::MedicalHistoryForm,
            patient_service::VitalSignForm,
            patient_service::IncidentForm,
            patient_service::TreatmentForm,
            patient_service::PatientChart,
            database_layer::Appointment,
            database_layer::AppointmentStatus,
            database_layer::Billing,
            database_layer::BillingItem,
            database_layer::Branch,
            database_layer::Employee,
            database_layer::Inventory,
            database_layer::InventoryCounters,
            database_layer::Patient,
            database_layer::MedicalHistory,
            database_layer::VitalSign,
            database_layer::Incident,
            database_layer::Treatment,
            database_layer::User,
            database_layer::Service,
            database_layer::Vaccination,
        )
    ),
    tags(
        (name = "health", description = "Liveness and store health"),
        (name = "appointments", description = "Appointment booking and settlement"),
        (name = "inventory", description = "Vaccine inventory and dose deduction"),
        (name = "services", description = "Billable service catalogue"),
        (name = "patients", description = "Registration, patient intake and clinical records"),
        (name = "administration", description = "Branches and employees"),
    ),
    info(
        title = "BiteCare Clinic API",
        version = "0.1.0",
        description = "Appointment settlement, billing and vaccine inventory for animal bite treatment centers.",
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_settlement_route() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/appointments/{id}/settle"));
        assert!(doc.paths.paths.contains_key("/api/v1/inventory/{id}/deduct"));
        assert!(doc.paths.paths.contains_key("/api/v1/patients/{id}/vital-signs"));
    }
}
