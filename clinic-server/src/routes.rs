use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{
    handlers::{appointments, branches, employees, health, inventory, patients, services},
    openapi,
    server::ClinicServer,
};

pub mod paths;

/// Create health check routes
pub fn health_routes() -> Router<ClinicServer> {
    Router::new().route(paths::health::HEALTH, get(health::health_check))
}

/// Appointment booking and settlement
pub fn appointment_routes() -> Router<ClinicServer> {
    Router::new()
        .route(paths::appointments::APPOINTMENTS, post(appointments::create_appointment))
        .route(paths::appointments::APPOINTMENT_BY_ID, get(appointments::get_appointment))
        .route(paths::appointments::SETTLE, post(appointments::settle_appointment))
}

/// Vaccine inventory administration and deduction
pub fn inventory_routes() -> Router<ClinicServer> {
    Router::new()
        .route(
            paths::inventory::INVENTORY,
            get(inventory::list_inventory).post(inventory::create_inventory),
        )
        .route(
            paths::inventory::INVENTORY_BY_ID,
            put(inventory::update_inventory).delete(inventory::delete_inventory),
        )
        .route(paths::inventory::DEDUCT, post(inventory::deduct_inventory))
}

/// Billable service catalogue
pub fn service_routes() -> Router<ClinicServer> {
    Router::new()
        .route(
            paths::services::SERVICES,
            get(services::list_services).post(services::create_service),
        )
        .route(
            paths::services::SERVICE_BY_ID,
            put(services::update_service).delete(services::delete_service),
        )
}

/// Registration and patient intake
pub fn patient_routes() -> Router<ClinicServer> {
    Router::new()
        .route(paths::users::USERS, post(patients::register_user))
        .route(
            paths::patients::PATIENTS,
            get(patients::list_patients).post(patients::create_patient),
        )
        .route(
            paths::patients::PATIENT_BY_ID,
            get(patients::get_patient_chart).delete(patients::delete_patient),
        )
        .route(paths::patients::MEDICAL_HISTORY, post(patients::record_medical_history))
        .route(paths::patients::VITAL_SIGNS, post(patients::record_vital_sign))
        .route(paths::patients::INCIDENTS, post(patients::record_incident))
        .route(paths::patients::TREATMENTS, post(patients::record_treatment))
}

/// Branches and staff
pub fn administration_routes() -> Router<ClinicServer> {
    Router::new()
        .route(
            paths::branches::BRANCHES,
            get(branches::list_branches).post(branches::create_branch),
        )
        .route(
            paths::branches::BRANCH_BY_ID,
            put(branches::update_branch).delete(branches::delete_branch),
        )
        .route(
            paths::employees::EMPLOYEES,
            get(employees::list_employees).post(employees::create_employee),
        )
        .route(
            paths::employees::EMPLOYEE_BY_ID,
            put(employees::update_employee).delete(employees::delete_employee),
        )
}

/// Create API v1 routes
pub fn api_v1_routes() -> Router<ClinicServer> {
    Router::new()
        .merge(health_routes())
        .merge(appointment_routes())
        .merge(inventory_routes())
        .merge(service_routes())
        .merge(patient_routes())
        .merge(administration_routes())
}

/// Create all application routes
pub fn create_routes() -> Router<ClinicServer> {
    Router::new()
        .route(paths::docs::OPENAPI_JSON, get(openapi::openapi_json))
        .nest(paths::API_V1, api_v1_routes())
}
