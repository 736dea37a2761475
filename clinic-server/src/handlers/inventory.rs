use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use database_layer::Inventory;
use inventory_service::{DeductionReceipt, InventoryForm};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::{api_list, api_success, ApiResponse, ApiResult};
use crate::server::ClinicServer;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListInventoryParams {
    /// Only vaccines stocked at this branch
    pub branch_id: Option<Uuid>,
}

/// Doses to take out of one inventory item
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeductRequest {
    pub quantity: i32,
}

#[utoipa::path(
    get,
    path = "/api/v1/inventory",
    params(ListInventoryParams),
    responses((status = 200, description = "Vaccines ordered by name", body = Vec<Inventory>)),
    tag = "inventory"
)]
pub async fn list_inventory(
    State(server): State<ClinicServer>,
    Query(params): Query<ListInventoryParams>,
) -> ApiResult<Json<ApiResponse<Vec<Inventory>>>> {
    let items = server.inventory.list_inventory(params.branch_id).await?;
    Ok(Json(api_list(items)))
}

#[utoipa::path(
    post,
    path = "/api/v1/inventory",
    request_body = InventoryForm,
    responses(
        (status = 201, description = "Vaccine added", body = Inventory),
        (status = 400, description = "Invalid form")
    ),
    tag = "inventory"
)]
pub async fn create_inventory(
    State(server): State<ClinicServer>,
    Json(form): Json<InventoryForm>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Inventory>>)> {
    let created = server.inventory.create_inventory(form).await?;
    Ok((StatusCode::CREATED, Json(api_success(created))))
}

#[utoipa::path(
    put,
    path = "/api/v1/inventory/{id}",
    params(("id" = Uuid, Path, description = "Inventory ID")),
    request_body = InventoryForm,
    responses(
        (status = 200, description = "Vaccine updated", body = Inventory),
        (status = 400, description = "Invalid form"),
        (status = 404, description = "Inventory not found")
    ),
    tag = "inventory"
)]
pub async fn update_inventory(
    State(server): State<ClinicServer>,
    Path(id): Path<Uuid>,
    Json(form): Json<InventoryForm>,
) -> ApiResult<Json<ApiResponse<Inventory>>> {
    let updated = server.inventory.update_inventory(id, form).await?;
    Ok(Json(api_success(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/inventory/{id}",
    params(("id" = Uuid, Path, description = "Inventory ID")),
    responses(
        (status = 204, description = "Vaccine deleted"),
        (status = 404, description = "Inventory not found")
    ),
    tag = "inventory"
)]
pub async fn delete_inventory(State(server): State<ClinicServer>, Path(id): Path<Uuid>) -> ApiResult<StatusCode> {
    server.inventory.delete_inventory(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Deduct doses outside a settlement
///
/// Stocks are used first and the buffer covers any shortfall.
#[utoipa::path(
    post,
    path = "/api/v1/inventory/{id}/deduct",
    params(("id" = Uuid, Path, description = "Inventory ID")),
    request_body = DeductRequest,
    responses(
        (status = 200, description = "Doses deducted", body = DeductionReceipt),
        (status = 400, description = "Quantity below 1"),
        (status = 404, description = "Inventory not found"),
        (status = 409, description = "Insufficient stock or concurrent updates kept winning")
    ),
    tag = "inventory"
)]
pub async fn deduct_inventory(
    State(server): State<ClinicServer>,
    Path(id): Path<Uuid>,
    Json(req): Json<DeductRequest>,
) -> ApiResult<Json<ApiResponse<DeductionReceipt>>> {
    let receipt = server.ledger.deduct(id, req.quantity).await?;
    info!(
        inventory_id = %id,
        quantity = req.quantity,
        drew_from_buffer = receipt.drew_from_buffer,
        "Inventory deducted"
    );
    Ok(Json(api_success(receipt)))
}
