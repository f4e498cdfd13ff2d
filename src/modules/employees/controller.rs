use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use ridebook_core::AppError;
use ridebook_models::{
    CreateEmployeeDto, Employee, EmployeeFilterParams, EmployeePermissionsResponse,
    PaginatedEmployeesResponse, TogglePermissionDto, UpdatePermissionsDto,
};
use tracing::instrument;
use uuid::Uuid;

use crate::docs::ErrorResponse;
use crate::middleware::auth::{RequireEmployeesView, RequireSuperAdmin};
use crate::modules::employees::service::EmployeeService;
use crate::state::AppState;
use crate::validator::{JsonBody, ValidatedJson};

/// List employees
#[utoipa::path(
    get,
    path = "/api/employees",
    params(EmployeeFilterParams),
    responses(
        (status = 200, description = "Page of employees", body = PaginatedEmployeesResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires employeeManagement.view", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Employees"
)]
#[instrument(skip_all)]
pub async fn list_employees(
    RequireEmployeesView(_auth_user): RequireEmployeesView,
    State(state): State<AppState>,
    Query(filters): Query<EmployeeFilterParams>,
) -> Result<Json<PaginatedEmployeesResponse>, AppError> {
    let employees = EmployeeService::list_employees(&state.db, filters).await?;
    Ok(Json(employees))
}

/// Create an employee account with no permissions
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployeeDto,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Forbidden - super admin only", body = ErrorResponse),
        (status = 409, description = "Email already exists", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Employees"
)]
#[instrument(skip_all)]
pub async fn create_employee(
    RequireSuperAdmin(_auth_user): RequireSuperAdmin,
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateEmployeeDto>,
) -> Result<(StatusCode, Json<Employee>), AppError> {
    let employee = EmployeeService::create_employee(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Get an employee's stored permissions and what they resolve to
#[utoipa::path(
    get,
    path = "/api/employees/{id}/permissions",
    params(
        ("id" = Uuid, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee permissions", body = EmployeePermissionsResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Forbidden - requires employeeManagement.view", body = ErrorResponse),
        (status = 404, description = "Employee not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Employees"
)]
#[instrument(skip_all, fields(employee.id = %id))]
pub async fn get_employee_permissions(
    RequireEmployeesView(_auth_user): RequireEmployeesView,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EmployeePermissionsResponse>, AppError> {
    let employee = EmployeeService::get_employee(&state.db, id).await?;
    Ok(Json(EmployeePermissionsResponse::from_employee(&employee)))
}

/// Replace an employee's whole permission document
#[utoipa::path(
    put,
    path = "/api/employees/{id}/permissions",
    params(
        ("id" = Uuid, Path, description = "Employee ID")
    ),
    request_body = UpdatePermissionsDto,
    responses(
        (status = 200, description = "Permissions replaced", body = EmployeePermissionsResponse),
        (status = 400, description = "Bad request or super admin target", body = ErrorResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Forbidden - super admin only", body = ErrorResponse),
        (status = 404, description = "Employee not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Employees"
)]
#[instrument(skip_all, fields(employee.id = %id))]
pub async fn replace_employee_permissions(
    RequireSuperAdmin(_auth_user): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(dto): JsonBody<UpdatePermissionsDto>,
) -> Result<Json<EmployeePermissionsResponse>, AppError> {
    let employee = EmployeeService::replace_permissions(&state.db, id, dto.permissions).await?;
    Ok(Json(EmployeePermissionsResponse::from_employee(&employee)))
}

/// Toggle one cell of an employee's permission matrix
#[utoipa::path(
    patch,
    path = "/api/employees/{id}/permissions",
    params(
        ("id" = Uuid, Path, description = "Employee ID")
    ),
    request_body = TogglePermissionDto,
    responses(
        (status = 200, description = "Permission toggled", body = EmployeePermissionsResponse),
        (status = 400, description = "Bad request or super admin target", body = ErrorResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Forbidden - super admin only", body = ErrorResponse),
        (status = 404, description = "Employee not found", body = ErrorResponse),
        (status = 422, description = "Cell is hidden for this section", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Employees"
)]
#[instrument(skip_all, fields(employee.id = %id))]
pub async fn toggle_employee_permission(
    RequireSuperAdmin(_auth_user): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(dto): JsonBody<TogglePermissionDto>,
) -> Result<Json<EmployeePermissionsResponse>, AppError> {
    let employee = EmployeeService::toggle_permission(&state.db, id, dto).await?;
    Ok(Json(EmployeePermissionsResponse::from_employee(&employee)))
}
