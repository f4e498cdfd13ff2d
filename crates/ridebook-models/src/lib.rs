//! # Ridebook Models
//!
//! Domain models and DTOs for the Ridebook admin API.
//!
//! - [`employees`]: Employee accounts and their management DTOs
//! - [`permissions`]: Registry listing, permission checks and matrix edits
//!
//! # Example
//!
//! ```ignore
//! use ridebook_models::employees::{CreateEmployeeDto, Employee};
//! use ridebook_models::permissions::TogglePermissionDto;
//! ```

pub mod employees;
pub mod permissions;

// Re-export commonly used types at crate root for convenience
pub use employees::{
    CreateEmployeeDto, Employee, EmployeeFilterParams, EmployeePermissionsResponse,
    PaginatedEmployeesResponse, UpdatePermissionsDto,
};

pub use permissions::{
    MyPermissionsResponse, PermissionCheckQuery, PermissionCheckResponse, SectionInfo,
    SectionKindName, TogglePermissionDto,
};
