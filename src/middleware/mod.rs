//! Session extractor and permission guards.
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. [`auth::AuthUser`] verifies the JWT and exposes its claims
//! 3. Guard extractors run [`has_permission`](ridebook_core::has_permission)
//!    against those claims
//! 4. The handler executes if the check passes, otherwise `403`
//!
//! ```ignore
//! use crate::middleware::auth::{AuthUser, RequireEmployeesView, RequireSuperAdmin};
//!
//! // Any valid token
//! async fn my_permissions(auth_user: AuthUser) -> impl IntoResponse { /* ... */ }
//!
//! // employeeManagement.view
//! async fn list(RequireEmployeesView(auth_user): RequireEmployeesView) -> impl IntoResponse { /* ... */ }
//!
//! // Super admin only
//! async fn replace(RequireSuperAdmin(auth_user): RequireSuperAdmin) -> impl IntoResponse { /* ... */ }
//! ```

pub mod auth;
