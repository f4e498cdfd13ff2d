use anyhow::anyhow;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use ridebook_auth::{Claims, verify_token};
use ridebook_core::AppError;
use ridebook_core::permissions::{
    Capability, PermissionHolder, Section, UserPermissions, UserRole, has_permission,
};
use uuid::Uuid;

use crate::state::AppState;

/// Extractor that validates the JWT and provides the session user's claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized(anyhow!("Invalid user ID in token")))
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn is_superadmin(&self) -> bool {
        self.0.role.is_superadmin()
    }

    /// Succeeds when the user may exercise `capability` on `section`.
    ///
    /// Denials are logged and counted, then surface as `403`.
    pub fn authorize(
        &self,
        section: Section,
        capability: Option<Capability>,
    ) -> Result<(), AppError> {
        if has_permission(self, section, capability) {
            return Ok(());
        }

        let capability_name = capability.map_or("flag", Capability::as_str);
        tracing::warn!(
            user.id = %self.0.sub,
            user.role = %self.0.role,
            section = %section,
            capability = capability_name,
            "permission denied"
        );
        ridebook_observability::track_permission_denied(section.key(), capability_name);

        Err(AppError::forbidden(match capability {
            Some(capability) => anyhow!(
                "Access denied. Missing required permission: {}.{}",
                section.key(),
                capability
            ),
            None => anyhow!("Access denied. Missing required permission: {}", section.key()),
        }))
    }
}

impl PermissionHolder for AuthUser {
    fn role(&self) -> UserRole {
        self.0.role
    }

    fn permissions(&self) -> &UserPermissions {
        &self.0.permissions
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized(anyhow!("Missing authorization header")))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized(anyhow!("Invalid authorization header format")))?;

        let claims = verify_token(token, &state.jwt_config).inspect_err(|_| {
            ridebook_observability::track_token_rejected();
        })?;

        Ok(AuthUser(claims))
    }
}

/// Super admins only. Used for routes that write permission documents.
#[derive(Debug, Clone)]
pub struct RequireSuperAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireSuperAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;

        if !auth_user.is_superadmin() {
            tracing::warn!(
                user.id = %auth_user.0.sub,
                user.role = %auth_user.0.role,
                "super admin required"
            );
            ridebook_observability::track_permission_denied("superadmin", "role");
            return Err(AppError::forbidden(anyhow!(
                "Access denied. Super admin required"
            )));
        }

        Ok(RequireSuperAdmin(auth_user))
    }
}

/// Generates an extractor that requires one section permission.
///
/// `require_section_permission!(Name, Section::X, Capability::Y)` for CRUD
/// sections, `require_section_permission!(Name, Section::X)` for action flags.
#[macro_export]
macro_rules! require_section_permission {
    (@impl $name:ident, $section:expr, $capability:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = ridebook_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = <$crate::middleware::auth::AuthUser as axum::extract::FromRequestParts<
                    $crate::state::AppState,
                >>::from_request_parts(parts, state)
                .await?;
                auth_user.authorize($section, $capability)?;
                Ok($name(auth_user))
            }
        }
    };
    ($name:ident, $section:expr, $capability:expr) => {
        $crate::require_section_permission!(@impl $name, $section, Some($capability));
    };
    ($name:ident, $section:expr) => {
        $crate::require_section_permission!(@impl $name, $section, None);
    };
}

require_section_permission!(RequireEmployeesView, Section::EmployeeManagement, Capability::View);
