//! Employee accounts.
//!
//! Employees are rows of the `users` table with a role and a JSONB
//! permission document. The document is read through the lenient loader of
//! [`UserPermissions`], so a row never fails to load because of its grants.

use chrono::{DateTime, Utc};
use ridebook_core::permissions::{
    MatrixRow, PermissionHolder, PermissionMatrix, UserPermissions, UserRole,
};
use ridebook_core::{PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{FromRow, Row};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// A console user: employee, super admin, or a customer/vendor account
/// surfaced in management screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Employee {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
    pub permissions: UserPermissions,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl<'r> FromRow<'r, PgRow> for Employee {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let role: String = row.try_get("role")?;
        let role = UserRole::parse(&role).ok_or_else(|| sqlx::Error::ColumnDecode {
            index: "role".to_string(),
            source: format!("unknown role `{role}`").into(),
        })?;
        let Json(permissions): Json<Value> = row.try_get("permissions")?;

        Ok(Self {
            id: row.try_get("id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            role,
            permissions: UserPermissions::from_value(permissions),
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl PermissionHolder for Employee {
    fn role(&self) -> UserRole {
        self.role
    }

    fn permissions(&self) -> &UserPermissions {
        &self.permissions
    }
}

/// DTO for creating an employee account.
///
/// New employees always start with no grants.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEmployeeDto {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
}

/// Query parameters for listing employees.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmployeeFilterParams {
    /// Case-insensitive substring match on email
    pub email: Option<String>,
    /// Exact role match (`superadmin`, `employee`, `customer`, `vendor`)
    pub role: Option<UserRole>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Paginated response containing employees.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedEmployeesResponse {
    pub data: Vec<Employee>,
    pub meta: PaginationMeta,
}

/// Body of a whole-document permission replacement.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdatePermissionsDto {
    pub permissions: UserPermissions,
}

/// Stored grants of one employee alongside what they resolve to.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmployeePermissionsResponse {
    pub employee_id: Uuid,
    pub role: UserRole,
    /// Document as stored (after lenient load)
    pub permissions: UserPermissions,
    /// Effective access per section
    pub effective: PermissionMatrix,
    /// Editor rows in registry order
    #[schema(value_type = Vec<Object>)]
    pub matrix: Vec<MatrixRow>,
}

impl EmployeePermissionsResponse {
    #[must_use]
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            employee_id: employee.id,
            role: employee.role,
            permissions: employee.permissions.clone(),
            effective: ridebook_core::resolve_effective_permissions(employee),
            matrix: ridebook_core::permissions::matrix_rows(&employee.permissions),
        }
    }
}
