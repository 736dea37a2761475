use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use billing_service::ServiceForm;
use database_layer::Service;
use uuid::Uuid;

use crate::error::{api_list, api_success, ApiResponse, ApiResult};
use crate::server::ClinicServer;

#[utoipa::path(
    get,
    path = "/api/v1/services",
    responses((status = 200, description = "Services ordered by name", body = Vec<Service>)),
    tag = "services"
)]
pub async fn list_services(State(server): State<ClinicServer>) -> ApiResult<Json<ApiResponse<Vec<Service>>>> {
    let services = server.catalog.list_services().await?;
    Ok(Json(api_list(services)))
}

#[utoipa::path(
    post,
    path = "/api/v1/services",
    request_body = ServiceForm,
    responses(
        (status = 201, description = "Service created", body = Service),
        (status = 400, description = "Invalid form")
    ),
    tag = "services"
)]
pub async fn create_service(
    State(server): State<ClinicServer>,
    Json(form): Json<ServiceForm>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Service>>)> {
    let service = server.catalog.create_service(form).await?;
    Ok((StatusCode::CREATED, Json(api_success(service))))
}

#[utoipa::path(
    put,
    path = "/api/v1/services/{id}",
    params(("id" = Uuid, Path, description = "Service ID")),
    request_body = ServiceForm,
    responses(
        (status = 200, description = "Service updated", body = Service),
        (status = 400, description = "Invalid form"),
        (status = 404, description = "Service not found")
    ),
    tag = "services"
)]
pub async fn update_service(
    State(server): State<ClinicServer>,
    Path(id): Path<Uuid>,
    Json(form): Json<ServiceForm>,
) -> ApiResult<Json<ApiResponse<Service>>> {
    let service = server.catalog.update_service(id, form).await?;
    Ok(Json(api_success(service)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/services/{id}",
    params(("id" = Uuid, Path, description = "Service ID")),
    responses(
        (status = 204, description = "Service deleted"),
        (status = 404, description = "Service not found")
    ),
    tag = "services"
)]
pub async fn delete_service(State(server): State<ClinicServer>, Path(id): Path<Uuid>) -> ApiResult<StatusCode> {
    server.catalog.delete_service(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
