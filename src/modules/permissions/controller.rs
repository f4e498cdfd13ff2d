use anyhow::anyhow;
use axum::{Json, extract::Query};
use ridebook_core::AppError;
use ridebook_core::permissions::{
    Capability, REGISTRY, Section, has_permission, resolve_effective_permissions,
};
use ridebook_models::{
    MyPermissionsResponse, PermissionCheckQuery, PermissionCheckResponse, SectionInfo,
};
use tracing::{debug, instrument};

use crate::docs::ErrorResponse;
use crate::middleware::auth::AuthUser;

/// List every registered permission section
#[utoipa::path(
    get,
    path = "/api/permissions/sections",
    responses(
        (status = 200, description = "Section registry in display order", body = Vec<SectionInfo>),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Permissions"
)]
#[instrument(skip_all)]
pub async fn list_sections(_auth_user: AuthUser) -> Json<Vec<SectionInfo>> {
    Json(REGISTRY.iter().map(SectionInfo::from).collect())
}

/// Effective permissions of the current user
#[utoipa::path(
    get,
    path = "/api/permissions/me",
    responses(
        (status = 200, description = "Resolved permissions", body = MyPermissionsResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Permissions"
)]
#[instrument(skip_all, fields(user.id = %auth_user.0.sub))]
pub async fn my_permissions(auth_user: AuthUser) -> Json<MyPermissionsResponse> {
    let permissions = resolve_effective_permissions(&auth_user);
    let visible_sections = permissions.visible_sections().collect();
    let AuthUser(claims) = auth_user;

    Json(MyPermissionsResponse {
        user_id: claims.sub,
        email: claims.email,
        role: claims.role,
        permissions,
        visible_sections,
    })
}

/// Check a single permission for the current user
#[utoipa::path(
    get,
    path = "/api/permissions/me/check",
    params(PermissionCheckQuery),
    responses(
        (status = 200, description = "Check result", body = PermissionCheckResponse),
        (status = 400, description = "Unknown section or capability", body = ErrorResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Permissions"
)]
#[instrument(skip_all, fields(user.id = %auth_user.0.sub))]
pub async fn check_my_permission(
    auth_user: AuthUser,
    Query(query): Query<PermissionCheckQuery>,
) -> Result<Json<PermissionCheckResponse>, AppError> {
    let section = Section::from_key(&query.section).ok_or_else(|| {
        AppError::bad_request(anyhow!("Unknown permission section: {}", query.section))
    })?;

    let capability = query
        .capability
        .as_deref()
        .map(|name| {
            Capability::parse(name)
                .ok_or_else(|| AppError::bad_request(anyhow!("Unknown capability: {name}")))
        })
        .transpose()?;

    if capability.is_none() && !section.is_flag() {
        return Err(AppError::bad_request(anyhow!(
            "Section {} requires a capability",
            section.key()
        )));
    }

    let allowed = has_permission(&auth_user, section, capability);
    debug!(section = %section, capability = ?capability, allowed, "permission check");

    Ok(Json(PermissionCheckResponse {
        section,
        capability,
        allowed,
    }))
}
