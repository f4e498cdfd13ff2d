use anyhow::{Context, anyhow};
use ridebook_core::permissions::{UserPermissions, apply_toggle};
use ridebook_core::{AppError, PaginationMeta};
use ridebook_models::{
    CreateEmployeeDto, Employee, EmployeeFilterParams, PaginatedEmployeesResponse,
    TogglePermissionDto,
};
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

const EMPLOYEE_COLUMNS: &str =
    "id, first_name, last_name, email, role, permissions, created_at, updated_at";

pub struct EmployeeService;

impl EmployeeService {
    #[instrument(skip(db, dto), fields(db.operation = "INSERT", db.table = "users"))]
    pub async fn create_employee(db: &PgPool, dto: CreateEmployeeDto) -> Result<Employee, AppError> {
        debug!(employee.email = %dto.email, "Creating employee");

        let sql = format!(
            "INSERT INTO users (first_name, last_name, email, role, permissions)
             VALUES ($1, $2, $3, 'employee', $4)
             RETURNING {EMPLOYEE_COLUMNS}"
        );
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(&dto.first_name)
            .bind(&dto.last_name)
            .bind(dto.email.to_lowercase())
            .bind(Json(UserPermissions::empty().to_value()))
            .fetch_one(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e
                    && db_err.is_unique_violation()
                {
                    warn!(employee.email = %dto.email, "Attempted to create employee with existing email");
                    return AppError::conflict(anyhow!("Email already exists"));
                }
                error!(error = %e, "Database error creating employee");
                AppError::from(e)
            })?;

        ridebook_observability::track_employee_created();
        info!(employee.id = %employee.id, "Employee created");

        Ok(employee)
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn list_employees(
        db: &PgPool,
        filters: EmployeeFilterParams,
    ) -> Result<PaginatedEmployeesResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        debug!(
            limit,
            offset,
            filter.email = ?filters.email,
            filter.role = ?filters.role,
            "Fetching employees with pagination"
        );

        let mut where_clause = String::from(" WHERE 1=1");
        let mut params = Vec::new();

        if let Some(email) = &filters.email {
            params.push(format!("%{email}%"));
            where_clause.push_str(&format!(" AND email ILIKE ${}", params.len()));
        }

        if let Some(role) = filters.role {
            params.push(role.as_str().to_string());
            where_clause.push_str(&format!(" AND role = ${}", params.len()));
        }

        let count_query = format!("SELECT COUNT(*) FROM users{where_clause}");
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_sql = count_sql.bind(param);
        }
        let total = count_sql
            .fetch_one(db)
            .await
            .context("Failed to count employees")
            .map_err(AppError::database)?;

        let data_query = format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM users{where_clause}
             ORDER BY created_at DESC, id
             LIMIT {limit} OFFSET {offset}"
        );
        let mut data_sql = sqlx::query_as::<_, Employee>(&data_query);
        for param in params {
            data_sql = data_sql.bind(param);
        }
        let employees = data_sql
            .fetch_all(db)
            .await
            .context("Failed to fetch employees")
            .map_err(AppError::database)?;

        debug!(total, returned = employees.len(), "Employees fetched");

        Ok(PaginatedEmployeesResponse {
            data: employees,
            meta: PaginationMeta::new(&filters.pagination, total),
        })
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn get_employee(db: &PgPool, employee_id: Uuid) -> Result<Employee, AppError> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, Employee>(&sql)
            .bind(employee_id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch employee")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("Employee not found")))
    }

    /// Replaces the whole permission document. Concurrent replacements are
    /// last-writer-wins.
    #[instrument(skip(db, permissions), fields(db.operation = "UPDATE", db.table = "users"))]
    pub async fn replace_permissions(
        db: &PgPool,
        employee_id: Uuid,
        permissions: UserPermissions,
    ) -> Result<Employee, AppError> {
        let target = Self::get_employee(db, employee_id).await?;
        ensure_editable(&target)?;

        let employee = write_permissions(db, employee_id, &permissions).await?;

        ridebook_observability::track_permissions_updated("replace");
        info!(
            employee.id = %employee_id,
            sections = permissions.len(),
            "Employee permissions replaced"
        );

        Ok(employee)
    }

    /// Applies one matrix toggle. The row is locked for the read-modify-write
    /// so toggles on different sections never overwrite each other.
    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "users", section = %dto.section))]
    pub async fn toggle_permission(
        db: &PgPool,
        employee_id: Uuid,
        dto: TogglePermissionDto,
    ) -> Result<Employee, AppError> {
        let mut tx = db
            .begin()
            .await
            .context("Failed to start transaction")
            .map_err(AppError::database)?;

        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM users WHERE id = $1 FOR UPDATE");
        let target = sqlx::query_as::<_, Employee>(&sql)
            .bind(employee_id)
            .fetch_optional(&mut *tx)
            .await
            .context("Failed to lock employee")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("Employee not found")))?;
        ensure_editable(&target)?;

        let next = apply_toggle(&target.permissions, dto.section, dto.column, dto.value)?;

        let employee = write_permissions(&mut *tx, employee_id, &next).await?;

        tx.commit()
            .await
            .context("Failed to commit permission toggle")
            .map_err(AppError::database)?;

        ridebook_observability::track_permissions_updated("toggle");
        info!(
            employee.id = %employee_id,
            column = dto.column.label(),
            value = dto.value,
            "Employee permission toggled"
        );

        Ok(employee)
    }
}

/// Super admins are never expressed through permission records.
fn ensure_editable(target: &Employee) -> Result<(), AppError> {
    if target.role.is_superadmin() {
        warn!(employee.id = %target.id, "Rejected permission edit on super admin");
        return Err(AppError::bad_request(anyhow!(
            "Super admin permissions cannot be edited"
        )));
    }
    Ok(())
}

async fn write_permissions<'e, E>(
    executor: E,
    employee_id: Uuid,
    permissions: &UserPermissions,
) -> Result<Employee, AppError>
where
    E: sqlx::PgExecutor<'e>,
{
    let sql = format!(
        "UPDATE users SET permissions = $2, updated_at = NOW() WHERE id = $1
         RETURNING {EMPLOYEE_COLUMNS}"
    );
    sqlx::query_as::<_, Employee>(&sql)
        .bind(employee_id)
        .bind(Json(permissions.to_value()))
        .fetch_optional(executor)
        .await
        .context("Failed to update employee permissions")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow!("Employee not found")))
}
