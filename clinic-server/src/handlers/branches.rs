use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use database_layer::Branch;
use error_common::FormFields;
use logger_redacted::redacted_info;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{api_list, api_success, ApiError, ApiResponse, ApiResult};
use crate::server::ClinicServer;
use crate::validation::RequestValidation;

/// Branch create/update form
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct BranchForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Branch name is required."))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Branch contact is required."))]
    pub contact: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Branch address is required."))]
    pub address: String,
}

impl FormFields for BranchForm {
    const FIELDS: &'static [&'static str] = &["name", "contact", "address"];
}

#[utoipa::path(
    get,
    path = "/api/v1/branches",
    responses((status = 200, description = "All branches", body = Vec<Branch>)),
    tag = "administration"
)]
pub async fn list_branches(State(server): State<ClinicServer>) -> ApiResult<Json<ApiResponse<Vec<Branch>>>> {
    let branches = server
        .store
        .list_branches()
        .await
        .map_err(ApiError::persistence("load branches"))?;
    Ok(Json(api_list(branches)))
}

#[utoipa::path(
    post,
    path = "/api/v1/branches",
    request_body = BranchForm,
    responses(
        (status = 201, description = "Branch created", body = Branch),
        (status = 400, description = "Invalid form")
    ),
    tag = "administration"
)]
pub async fn create_branch(
    State(server): State<ClinicServer>,
    Json(form): Json<BranchForm>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Branch>>)> {
    form.validate_request()?;

    let now = Utc::now();
    let branch = server
        .store
        .create_branch(Branch {
            id: Uuid::new_v4(),
            name: form.name,
            contact: form.contact,
            address: form.address,
            created_at: now,
            updated_at: now,
        })
        .await
        .map_err(ApiError::persistence("create branch"))?;

    redacted_info!("Branch {} created, contact {}", branch.id, branch.contact);
    Ok((StatusCode::CREATED, Json(api_success(branch))))
}

#[utoipa::path(
    put,
    path = "/api/v1/branches/{id}",
    params(("id" = Uuid, Path, description = "Branch ID")),
    request_body = BranchForm,
    responses(
        (status = 200, description = "Branch updated", body = Branch),
        (status = 400, description = "Invalid form"),
        (status = 404, description = "Branch not found")
    ),
    tag = "administration"
)]
pub async fn update_branch(
    State(server): State<ClinicServer>,
    Path(id): Path<Uuid>,
    Json(form): Json<BranchForm>,
) -> ApiResult<Json<ApiResponse<Branch>>> {
    form.validate_request()?;

    let existing = server
        .store
        .find_branch(id)
        .await
        .map_err(ApiError::persistence("update branch"))?
        .ok_or_else(|| ApiError::not_found(format!("Branch not found ({id})")))?;

    let branch = server
        .store
        .update_branch(Branch {
            name: form.name,
            contact: form.contact,
            address: form.address,
            updated_at: Utc::now(),
            ..existing
        })
        .await
        .map_err(ApiError::persistence("update branch"))?;
    Ok(Json(api_success(branch)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/branches/{id}",
    params(("id" = Uuid, Path, description = "Branch ID")),
    responses(
        (status = 204, description = "Branch deleted"),
        (status = 404, description = "Branch not found")
    ),
    tag = "administration"
)]
pub async fn delete_branch(State(server): State<ClinicServer>, Path(id): Path<Uuid>) -> ApiResult<StatusCode> {
    server
        .store
        .delete_branch(id)
        .await
        .map_err(ApiError::persistence("delete branch"))?;
    Ok(StatusCode::NO_CONTENT)
}
