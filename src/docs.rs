use ridebook_core::permissions::{Capability, MatrixColumn, PermissionLevel, Section, UserRole};
use ridebook_core::{PaginationMeta, PaginationParams};
use ridebook_models::{
    CreateEmployeeDto, Employee, EmployeeFilterParams, EmployeePermissionsResponse,
    MyPermissionsResponse, PaginatedEmployeesResponse, PermissionCheckResponse, SectionInfo,
    SectionKindName, TogglePermissionDto, UpdatePermissionsDto,
};
use serde::Serialize;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

/// Body of every error response.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::permissions::controller::list_sections,
        crate::modules::permissions::controller::my_permissions,
        crate::modules::permissions::controller::check_my_permission,
        crate::modules::employees::controller::list_employees,
        crate::modules::employees::controller::create_employee,
        crate::modules::employees::controller::get_employee_permissions,
        crate::modules::employees::controller::replace_employee_permissions,
        crate::modules::employees::controller::toggle_employee_permission,
    ),
    components(
        schemas(
            ErrorResponse,
            Section,
            Capability,
            UserRole,
            MatrixColumn,
            PermissionLevel,
            SectionInfo,
            SectionKindName,
            MyPermissionsResponse,
            PermissionCheckResponse,
            Employee,
            CreateEmployeeDto,
            EmployeeFilterParams,
            PaginatedEmployeesResponse,
            EmployeePermissionsResponse,
            UpdatePermissionsDto,
            TogglePermissionDto,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Permissions", description = "Section registry and the caller's permissions"),
        (name = "Employees", description = "Employee accounts and permission editing")
    ),
    info(
        title = "Ridebook Admin API",
        version = "0.1.0",
        description = "Admin console API for Ridebook with section-level permissions for staff.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/permissions/sections",
            "/api/permissions/me",
            "/api/permissions/me/check",
            "/api/employees",
            "/api/employees/{id}/permissions",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "{expected}");
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
