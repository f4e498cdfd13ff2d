use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::capability::Capability;
use super::section::{Section, SectionKind};
use super::{PermissionHolder, has_permission};

/// Effective access to a CRUD section. Undeclared capabilities are `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveLevel {
    pub view: bool,
    pub edit: bool,
    pub download_csv: bool,
}

impl EffectiveLevel {
    #[must_use]
    pub fn get(&self, capability: Capability) -> bool {
        match capability {
            Capability::View => self.view,
            Capability::Edit => self.edit,
            Capability::DownloadCsv => self.download_csv,
        }
    }
}

/// Effective access to one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EffectiveGrant {
    Crud(EffectiveLevel),
    Flag(bool),
}

/// Effective access for every registered section.
///
/// Serializes as an object keyed by section, e.g.
/// `{ "blogPosts": { "view": true, "edit": false, "downloadCsv": false }, "refundIssuance": true }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[schema(value_type = Object)]
pub struct PermissionMatrix(BTreeMap<Section, EffectiveGrant>);

impl PermissionMatrix {
    #[must_use]
    pub fn get(&self, section: Section) -> Option<EffectiveGrant> {
        self.0.get(&section).copied()
    }

    /// Same answer as [`has_permission`] for the user this matrix was resolved for.
    #[must_use]
    pub fn allows(&self, section: Section, capability: Option<Capability>) -> bool {
        match (self.0.get(&section), capability) {
            (Some(EffectiveGrant::Flag(enabled)), _) => *enabled,
            (Some(EffectiveGrant::Crud(level)), Some(capability)) => level.get(capability),
            _ => false,
        }
    }

    /// Sections the user can open at all: CRUD sections with `view`, enabled flags.
    pub fn visible_sections(&self) -> impl Iterator<Item = Section> + '_ {
        self.0.iter().filter_map(|(section, grant)| {
            let visible = match grant {
                EffectiveGrant::Crud(level) => level.view,
                EffectiveGrant::Flag(enabled) => *enabled,
            };
            visible.then_some(*section)
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (Section, EffectiveGrant)> + '_ {
        self.0.iter().map(|(section, grant)| (*section, *grant))
    }
}

/// Resolves the concrete access in effect for `user` across the whole registry.
///
/// Applies the super-admin bypass and default-deny rules of [`has_permission`];
/// the output depends only on the user's role and stored permissions.
///
/// ```
/// use ridebook_core::permissions::{
///     Capability, PermissionSubject, Section, UserPermissions, UserRole,
///     resolve_effective_permissions,
/// };
///
/// let admin = PermissionSubject::new(UserRole::SuperAdmin, UserPermissions::empty());
/// let matrix = resolve_effective_permissions(&admin);
/// assert!(matrix.allows(Section::EmployeeManagement, Some(Capability::Edit)));
/// ```
#[must_use]
pub fn resolve_effective_permissions<U>(user: &U) -> PermissionMatrix
where
    U: PermissionHolder + ?Sized,
{
    Section::ALL
        .into_iter()
        .map(|section| {
            let grant = match section.kind() {
                SectionKind::Flag => EffectiveGrant::Flag(has_permission(user, section, None)),
                SectionKind::Crud(_) => EffectiveGrant::Crud(EffectiveLevel {
                    view: has_permission(user, section, Some(Capability::View)),
                    edit: has_permission(user, section, Some(Capability::Edit)),
                    download_csv: has_permission(user, section, Some(Capability::DownloadCsv)),
                }),
            };
            (section, grant)
        })
        .collect::<BTreeMap<_, _>>()
        .into()
}

impl From<BTreeMap<Section, EffectiveGrant>> for PermissionMatrix {
    fn from(grants: BTreeMap<Section, EffectiveGrant>) -> Self {
        Self(grants)
    }
}
