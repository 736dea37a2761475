use appointment_service::{AppointmentRequest, SettlementOutcome, SettlementRequest};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use database_layer::Appointment;
use tracing::info;
use uuid::Uuid;

use crate::error::{api_success, ApiResponse, ApiResult};
use crate::server::ClinicServer;

/// Book a new appointment
#[utoipa::path(
    post,
    path = "/api/v1/appointments",
    request_body = AppointmentRequest,
    responses(
        (status = 201, description = "Appointment booked", body = Appointment),
        (status = 400, description = "Missing date or time"),
        (status = 404, description = "User not found")
    ),
    tag = "appointments"
)]
pub async fn create_appointment(
    State(server): State<ClinicServer>,
    Json(req): Json<AppointmentRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Appointment>>)> {
    let appointment = server.scheduler.create_appointment(req).await?;
    info!(appointment_id = %appointment.id, user_id = %appointment.user_id, "Appointment booked");
    Ok((StatusCode::CREATED, Json(api_success(appointment))))
}

#[utoipa::path(
    get,
    path = "/api/v1/appointments/{id}",
    params(("id" = Uuid, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment found", body = Appointment),
        (status = 404, description = "Appointment not found")
    ),
    tag = "appointments"
)]
pub async fn get_appointment(
    State(server): State<ClinicServer>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Appointment>>> {
    let appointment = server.scheduler.get_appointment(id).await?;
    Ok(Json(api_success(appointment)))
}

/// Settle an appointment
///
/// Moves the appointment to the requested status, writes one billing with an
/// item per selected service, records each vaccination and deducts the
/// administered doses from inventory. Steps already applied stay applied
/// when a later step fails.
#[utoipa::path(
    post,
    path = "/api/v1/appointments/{id}/settle",
    params(("id" = Uuid, Path, description = "Appointment ID")),
    request_body = SettlementRequest,
    responses(
        (status = 200, description = "Appointment settled", body = SettlementOutcome),
        (status = 400, description = "Invalid billing form"),
        (status = 404, description = "Appointment, user, service or inventory not found"),
        (status = 409, description = "Status regression or inventory conflict"),
        (status = 500, description = "Persistence failure")
    ),
    tag = "appointments"
)]
pub async fn settle_appointment(
    State(server): State<ClinicServer>,
    Path(id): Path<Uuid>,
    Json(req): Json<SettlementRequest>,
) -> ApiResult<Json<ApiResponse<SettlementOutcome>>> {
    let outcome = server.settlement.settle(id, req).await?;
    Ok(Json(api_success(outcome)))
}
