//! # Ridebook Core
//!
//! Core types, errors, and the section permission model for the Ridebook
//! admin API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Pagination parameters and metadata for list endpoints
//! - [`permissions`]: Section registry, stored grants, permission checks and
//!   the permission matrix editor
//!
//! # Example
//!
//! ```
//! use ridebook_core::permissions::{
//!     Capability, PermissionSubject, Section, UserPermissions, UserRole, has_permission,
//! };
//!
//! let employee = PermissionSubject::new(UserRole::Employee, UserPermissions::empty());
//! assert!(!has_permission(&employee, Section::RentalBookings, Some(Capability::View)));
//! ```

pub mod errors;
pub mod pagination;
pub mod permissions;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{PaginationMeta, PaginationParams};
pub use permissions::{
    Capability, PermissionHolder, PermissionMatrix, Section, UserPermissions, UserRole,
    has_permission, resolve_effective_permissions,
};
