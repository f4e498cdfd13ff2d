//! Super admin bootstrap and development tokens.

use anyhow::{Context, anyhow, bail};
use ridebook_auth::create_access_token;
use ridebook_config::JwtConfig;
use ridebook_core::UserRole;
use ridebook_models::Employee;
use sqlx::PgPool;

const EMPLOYEE_COLUMNS: &str =
    "id, first_name, last_name, email, role, permissions, created_at, updated_at";

/// Emails are stored lowercased, matching the API's employee creation.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Creates a super admin account. Super admins carry no permission records.
pub async fn create_superadmin(
    db: &PgPool,
    first_name: &str,
    last_name: &str,
    email: &str,
) -> anyhow::Result<Employee> {
    let email = normalize_email(email);
    let existing: Option<i32> = sqlx::query_scalar("SELECT 1 FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(db)
        .await
        .context("Failed to check for existing user")?;
    if existing.is_some() {
        bail!("a user with email {email} already exists");
    }

    let sql = format!(
        "INSERT INTO users (first_name, last_name, email, role, permissions) \
         VALUES ($1, $2, $3, $4, '{{}}'::jsonb) RETURNING {EMPLOYEE_COLUMNS}"
    );
    sqlx::query_as::<_, Employee>(&sql)
        .bind(first_name)
        .bind(last_name)
        .bind(&email)
        .bind(UserRole::SuperAdmin.as_str())
        .fetch_one(db)
        .await
        .context("Failed to insert super admin")
}

/// Signs an access token for an existing user, as the auth service would.
pub async fn issue_token(db: &PgPool, email: &str, jwt_config: &JwtConfig) -> anyhow::Result<String> {
    let email = normalize_email(email);
    let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM users WHERE email = $1");
    let employee = sqlx::query_as::<_, Employee>(&sql)
        .bind(&email)
        .fetch_optional(db)
        .await
        .context("Failed to look up user")?
        .ok_or_else(|| anyhow!("no user with email {email}"))?;

    create_access_token(
        employee.id,
        &employee.email,
        employee.role,
        employee.permissions,
        jwt_config,
    )
    .map_err(|e| e.error)
}
