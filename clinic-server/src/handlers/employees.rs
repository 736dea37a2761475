use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use database_layer::Employee;
use error_common::FormFields;
use logger_redacted::redacted_info;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{api_list, api_success, ApiError, ApiResponse, ApiResult};
use crate::server::ClinicServer;
use crate::validation::RequestValidation;

/// Employee create/update form
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct EmployeeForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "First name is required."))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Last name is required."))]
    pub last_name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Email address is required."))]
    pub email: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Role is required."))]
    pub role: String,
    #[serde(default)]
    #[validate(required(message = "Branch is required."))]
    pub branch_id: Option<Uuid>,
}

impl FormFields for EmployeeForm {
    const FIELDS: &'static [&'static str] = &["first_name", "last_name", "email", "image_url", "role", "branch_id"];
}

impl EmployeeForm {
    /// Branch id of a validated form
    fn branch(&self) -> ApiResult<Uuid> {
        self.branch_id.ok_or_else(|| ApiError::validation("Validation Error: Branch is required."))
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/employees",
    responses((status = 200, description = "Employees ordered by first name", body = Vec<Employee>)),
    tag = "administration"
)]
pub async fn list_employees(State(server): State<ClinicServer>) -> ApiResult<Json<ApiResponse<Vec<Employee>>>> {
    let employees = server
        .store
        .list_employees()
        .await
        .map_err(ApiError::persistence("load employees"))?;
    Ok(Json(api_list(employees)))
}

#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = EmployeeForm,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Invalid form")
    ),
    tag = "administration"
)]
pub async fn create_employee(
    State(server): State<ClinicServer>,
    Json(form): Json<EmployeeForm>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Employee>>)> {
    form.validate_request()?;
    let branch_id = form.branch()?;

    let now = Utc::now();
    let employee = server
        .store
        .create_employee(Employee {
            id: Uuid::new_v4(),
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            image_url: form.image_url.filter(|url| !url.is_empty()),
            role: form.role,
            branch_id,
            created_at: now,
            updated_at: now,
        })
        .await
        .map_err(ApiError::persistence("create employee"))?;

    redacted_info!("Employee {} created with email {}", employee.id, employee.email);
    Ok((StatusCode::CREATED, Json(api_success(employee))))
}

#[utoipa::path(
    put,
    path = "/api/v1/employees/{id}",
    params(("id" = Uuid, Path, description = "Employee ID")),
    request_body = EmployeeForm,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 400, description = "Invalid form"),
        (status = 404, description = "Employee not found")
    ),
    tag = "administration"
)]
pub async fn update_employee(
    State(server): State<ClinicServer>,
    Path(id): Path<Uuid>,
    Json(form): Json<EmployeeForm>,
) -> ApiResult<Json<ApiResponse<Employee>>> {
    form.validate_request()?;
    let branch_id = form.branch()?;

    let existing = server
        .store
        .find_employee(id)
        .await
        .map_err(ApiError::persistence("update employee"))?
        .ok_or_else(|| ApiError::not_found(format!("Employee not found ({id})")))?;

    let employee = server
        .store
        .update_employee(Employee {
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            // keep the stored picture when none is uploaded
            image_url: form.image_url.filter(|url| !url.is_empty()).or(existing.image_url.clone()),
            role: form.role,
            branch_id,
            updated_at: Utc::now(),
            ..existing
        })
        .await
        .map_err(ApiError::persistence("update employee"))?;
    Ok(Json(api_success(employee)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/employees/{id}",
    params(("id" = Uuid, Path, description = "Employee ID")),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 404, description = "Employee not found")
    ),
    tag = "administration"
)]
pub async fn delete_employee(State(server): State<ClinicServer>, Path(id): Path<Uuid>) -> ApiResult<StatusCode> {
    server
        .store
        .delete_employee(id)
        .await
        .map_err(ApiError::persistence("delete employee"))?;
    Ok(StatusCode::NO_CONTENT)
}
