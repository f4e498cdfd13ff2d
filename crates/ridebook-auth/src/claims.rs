//! JWT claims for session access tokens.

use ridebook_core::permissions::{PermissionHolder, UserPermissions, UserRole};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims carried by an access token.
///
/// The session user is fully described by these claims: permission checks
/// run against `role` and `permissions` without a database lookup.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub email: String,
    pub role: UserRole,
    /// Per-section grants; absent means none
    #[serde(default)]
    pub permissions: UserPermissions,
    /// Expiration (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

impl PermissionHolder for Claims {
    fn role(&self) -> UserRole {
        self.role
    }

    fn permissions(&self) -> &UserPermissions {
        &self.permissions
    }
}
