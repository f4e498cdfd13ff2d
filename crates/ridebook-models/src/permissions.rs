//! DTOs for the permission endpoints.

use ridebook_core::permissions::{
    Capability, MatrixColumn, PermissionMatrix, Section, SectionDescriptor, SectionKind, UserRole,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SectionKindName {
    Crud,
    Flag,
}

/// Registry entry as exposed to clients building navigation and the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SectionInfo {
    pub key: Section,
    pub label: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub kind: SectionKindName,
    /// Declared capabilities; empty for flag sections
    pub capabilities: Vec<Capability>,
}

impl From<&SectionDescriptor> for SectionInfo {
    fn from(descriptor: &SectionDescriptor) -> Self {
        let (kind, capabilities) = match descriptor.kind {
            SectionKind::Crud(declared) => (SectionKindName::Crud, declared.capabilities()),
            SectionKind::Flag => (SectionKindName::Flag, Vec::new()),
        };
        Self {
            key: descriptor.section,
            label: descriptor.label,
            description: descriptor.description,
            icon: descriptor.icon,
            kind,
            capabilities,
        }
    }
}

/// Effective permissions of the authenticated caller.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MyPermissionsResponse {
    pub user_id: String,
    pub email: String,
    pub role: UserRole,
    pub permissions: PermissionMatrix,
    /// Sections to show in navigation
    pub visible_sections: Vec<Section>,
}

/// Query for a single permission check.
///
/// Both values arrive as raw strings so unknown names can be reported as
/// `400` rather than a generic query rejection.
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PermissionCheckQuery {
    /// Section key, e.g. `rentalBookings`
    pub section: String,
    /// `view`, `edit` or `downloadCsv`; omitted for flag sections
    pub capability: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PermissionCheckResponse {
    pub section: Section,
    pub capability: Option<Capability>,
    pub allowed: bool,
}

/// One matrix editor toggle.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TogglePermissionDto {
    pub section: Section,
    pub column: MatrixColumn,
    pub value: bool,
}
