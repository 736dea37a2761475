use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use database_layer::{Incident, MedicalHistory, Patient, Treatment, User, VitalSign};
use patient_service::{
    IncidentForm, MedicalHistoryForm, PatientChart, PatientForm, TreatmentForm, UserForm, VitalSignForm,
};
use uuid::Uuid;

use crate::error::{api_list, api_success, ApiResponse, ApiResult};
use crate::server::ClinicServer;

#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = UserForm,
    responses(
        (status = 201, description = "User registered", body = User),
        (status = 400, description = "A field is missing"),
        (status = 409, description = "Email already registered")
    ),
    tag = "patients"
)]
pub async fn register_user(
    State(server): State<ClinicServer>,
    Json(form): Json<UserForm>,
) -> ApiResult<(StatusCode, Json<ApiResponse<User>>)> {
    let user = server.patients.register_user(form).await?;
    Ok((StatusCode::CREATED, Json(api_success(user))))
}

#[utoipa::path(
    get,
    path = "/api/v1/patients",
    responses((status = 200, description = "Patients, newest first", body = Vec<Patient>)),
    tag = "patients"
)]
pub async fn list_patients(State(server): State<ClinicServer>) -> ApiResult<Json<ApiResponse<Vec<Patient>>>> {
    let patients = server.patients.list_patients().await?;
    Ok(Json(api_list(patients)))
}

/// Profile a registered user as a patient
#[utoipa::path(
    post,
    path = "/api/v1/patients",
    request_body = PatientForm,
    responses(
        (status = 201, description = "Patient created", body = Patient),
        (status = 400, description = "Invalid form"),
        (status = 404, description = "User not found")
    ),
    tag = "patients"
)]
pub async fn create_patient(
    State(server): State<ClinicServer>,
    Json(form): Json<PatientForm>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Patient>>)> {
    let patient = server.patients.create_patient(form).await?;
    Ok((StatusCode::CREATED, Json(api_success(patient))))
}

#[utoipa::path(
    get,
    path = "/api/v1/patients/{id}",
    params(("id" = Uuid, Path, description = "Patient ID")),
    responses(
        (status = 200, description = "Profile with clinical records", body = PatientChart),
        (status = 404, description = "Patient not found")
    ),
    tag = "patients"
)]
pub async fn get_patient_chart(
    State(server): State<ClinicServer>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<PatientChart>>> {
    let chart = server.patients.patient_chart(id).await?;
    Ok(Json(api_success(chart)))
}

/// Save medical history entries, refreshing ones already on file
#[utoipa::path(
    post,
    path = "/api/v1/patients/{id}/medical-history",
    params(("id" = Uuid, Path, description = "Patient ID")),
    request_body = Vec<MedicalHistoryForm>,
    responses(
        (status = 200, description = "Saved entries", body = Vec<MedicalHistory>),
        (status = 400, description = "Invalid entry"),
        (status = 404, description = "Patient not found")
    ),
    tag = "patients"
)]
pub async fn record_medical_history(
    State(server): State<ClinicServer>,
    Path(id): Path<Uuid>,
    Json(entries): Json<Vec<MedicalHistoryForm>>,
) -> ApiResult<Json<ApiResponse<Vec<MedicalHistory>>>> {
    let saved = server.patients.record_medical_history(id, entries).await?;
    Ok(Json(api_list(saved)))
}

#[utoipa::path(
    post,
    path = "/api/v1/patients/{id}/vital-signs",
    params(("id" = Uuid, Path, description = "Patient ID")),
    request_body = VitalSignForm,
    responses(
        (status = 201, description = "Vital signs recorded", body = VitalSign),
        (status = 400, description = "Invalid form"),
        (status = 404, description = "Patient not found")
    ),
    tag = "patients"
)]
pub async fn record_vital_sign(
    State(server): State<ClinicServer>,
    Path(id): Path<Uuid>,
    Json(form): Json<VitalSignForm>,
) -> ApiResult<(StatusCode, Json<ApiResponse<VitalSign>>)> {
    let vital_sign = server.patients.record_vital_sign(id, form).await?;
    Ok((StatusCode::CREATED, Json(api_success(vital_sign))))
}

#[utoipa::path(
    post,
    path = "/api/v1/patients/{id}/incidents",
    params(("id" = Uuid, Path, description = "Patient ID")),
    request_body = IncidentForm,
    responses(
        (status = 201, description = "Incident recorded", body = Incident),
        (status = 400, description = "Invalid form"),
        (status = 404, description = "Patient not found")
    ),
    tag = "patients"
)]
pub async fn record_incident(
    State(server): State<ClinicServer>,
    Path(id): Path<Uuid>,
    Json(form): Json<IncidentForm>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Incident>>)> {
    let incident = server.patients.record_incident(id, form).await?;
    Ok((StatusCode::CREATED, Json(api_success(incident))))
}

#[utoipa::path(
    post,
    path = "/api/v1/patients/{id}/treatments",
    params(("id" = Uuid, Path, description = "Patient ID")),
    request_body = TreatmentForm,
    responses(
        (status = 201, description = "Treatment recorded", body = Treatment),
        (status = 400, description = "Invalid form"),
        (status = 404, description = "Patient not found")
    ),
    tag = "patients"
)]
pub async fn record_treatment(
    State(server): State<ClinicServer>,
    Path(id): Path<Uuid>,
    Json(form): Json<TreatmentForm>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Treatment>>)> {
    let treatment = server.patients.record_treatment(id, form).await?;
    Ok((StatusCode::CREATED, Json(api_success(treatment))))
}

/// Delete a patient with everything its user owns
///
/// Removes the user account and every clinical record, appointment, billing,
/// billing item and vaccination linked to it. Inventory counters are left as
/// they are.
#[utoipa::path(
    delete,
    path = "/api/v1/patients/{id}",
    params(("id" = Uuid, Path, description = "Patient ID")),
    responses(
        (status = 200, description = "Patient deleted", body = Patient),
        (status = 404, description = "Patient not found")
    ),
    tag = "patients"
)]
pub async fn delete_patient(
    State(server): State<ClinicServer>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Patient>>> {
    let patient = server.patients.delete_patient(id).await?;
    Ok(Json(api_success(patient)))
}
