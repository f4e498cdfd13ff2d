//! Section permission model for the admin console.
//!
//! Every admin screen (bookings, vendors, CMS pages, employees, ...) is a
//! registered [`Section`]. A user's stored [`UserPermissions`] grants, per
//! section, either a `{ view, edit, downloadCsv }` record or a single action
//! flag. [`has_permission`] answers "can this user do C on S" for route guards,
//! row action buttons and CSV export buttons alike.
//!
//! # Resolution
//!
//! ```text
//! superadmin role           -> allowed
//! flag section              -> stored boolean (missing -> denied)
//! CRUD section, capability  -> denied if the section does not declare it,
//!                              else stored leaf (missing -> denied)
//! ```
//!
//! Nothing here returns an error. Incomplete or malformed input resolves to
//! a deterministic `false`.
//!
//! # Example
//!
//! ```
//! use ridebook_core::permissions::{
//!     Capability, PermissionSubject, Section, UserPermissions, UserRole, has_permission,
//! };
//! use serde_json::json;
//!
//! let user = PermissionSubject::new(
//!     UserRole::Employee,
//!     UserPermissions::from_value(json!({
//!         "rentalBookings": { "view": true, "edit": false },
//!         "driverAssignment": true,
//!     })),
//! );
//!
//! assert!(has_permission(&user, Section::RentalBookings, Some(Capability::View)));
//! assert!(!has_permission(&user, Section::RentalBookings, Some(Capability::DownloadCsv)));
//! assert!(has_permission(&user, Section::DriverAssignment, None));
//! ```

pub mod capability;
pub mod editor;
pub mod grant;
pub mod resolve;
pub mod role;
pub mod section;

pub use capability::{Capability, CapabilitySet};
pub use editor::{MatrixCell, MatrixColumn, MatrixEditor, MatrixRow, apply_toggle, matrix_rows};
pub use grant::{PermissionLevel, SectionGrant, UserPermissions};
pub use resolve::{EffectiveGrant, EffectiveLevel, PermissionMatrix, resolve_effective_permissions};
pub use role::UserRole;
pub use section::{REGISTRY, Section, SectionDescriptor, SectionKind};

/// Anything carrying a role and stored permissions: session users, DB rows.
pub trait PermissionHolder {
    fn role(&self) -> UserRole;

    fn permissions(&self) -> &UserPermissions;

    /// Shorthand for [`has_permission`] on a CRUD section.
    fn can(&self, section: Section, capability: Capability) -> bool {
        has_permission(self, section, Some(capability))
    }

    /// Shorthand for [`has_permission`] on a flag section.
    fn can_act(&self, section: Section) -> bool {
        has_permission(self, section, None)
    }
}

/// Plain role + permissions pair.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PermissionSubject {
    pub role: UserRole,
    pub permissions: UserPermissions,
}

impl PermissionSubject {
    #[must_use]
    pub fn new(role: UserRole, permissions: UserPermissions) -> Self {
        Self { role, permissions }
    }
}

impl PermissionHolder for PermissionSubject {
    fn role(&self) -> UserRole {
        self.role
    }

    fn permissions(&self) -> &UserPermissions {
        &self.permissions
    }
}

/// Whether `user` may exercise `capability` on `section`.
///
/// `capability` is ignored for flag sections. For CRUD sections it is
/// required; omitting it is a caller bug (debug assertion, denied in release).
pub fn has_permission<U>(user: &U, section: Section, capability: Option<Capability>) -> bool
where
    U: PermissionHolder + ?Sized,
{
    if user.role().is_superadmin() {
        return true;
    }

    let stored = user.permissions().get(section);
    match section.kind() {
        SectionKind::Flag => matches!(stored, Some(SectionGrant::Flag(true))),
        SectionKind::Crud(declared) => {
            debug_assert!(
                capability.is_some(),
                "section `{section}` needs a capability to be checked"
            );
            let Some(capability) = capability else {
                tracing::error!(section = %section, "capability omitted for CRUD section, denying");
                return false;
            };
            if !declared.supports(capability) {
                return false;
            }
            match stored {
                Some(SectionGrant::Crud(level)) => level.get(capability),
                _ => false,
            }
        }
    }
}

/// [`has_permission`] for call sites that carry the section as its record key.
///
/// An unregistered key is a programming error: it trips a debug assertion in
/// development and test builds and is denied in release builds.
pub fn has_permission_by_key<U>(user: &U, key: &str, capability: Option<Capability>) -> bool
where
    U: PermissionHolder + ?Sized,
{
    let section = Section::from_key(key);
    debug_assert!(section.is_some(), "unregistered permission section `{key}`");
    match section {
        Some(section) => has_permission(user, section, capability),
        None => {
            tracing::error!(key = %key, "unregistered permission section, denying");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(role: UserRole, permissions: serde_json::Value) -> PermissionSubject {
        PermissionSubject::new(role, UserPermissions::from_value(permissions))
    }

    fn all_checks() -> impl Iterator<Item = (Section, Option<Capability>)> {
        Section::ALL.into_iter().flat_map(|section| {
            let capabilities: Vec<Option<Capability>> = if section.is_flag() {
                vec![None, Some(Capability::View), Some(Capability::Edit)]
            } else {
                Capability::ALL.into_iter().map(Some).collect()
            };
            capabilities.into_iter().map(move |c| (section, c))
        })
    }

    #[test]
    fn empty_permissions_deny_everything() {
        for role in [UserRole::Employee, UserRole::Customer, UserRole::Vendor] {
            let subject = PermissionSubject::new(role, UserPermissions::empty());
            for (section, capability) in all_checks() {
                assert!(!has_permission(&subject, section, capability), "{section}");
            }
        }
    }

    #[test]
    fn superadmin_is_allowed_everything() {
        let blobs = [
            json!({}),
            json!({ "rentalBookings": { "view": false, "edit": false } }),
            json!({ "driverAssignment": false, "websiteSettings": true }),
        ];
        for blob in blobs {
            let subject = user(UserRole::SuperAdmin, blob);
            for (section, capability) in all_checks() {
                assert!(has_permission(&subject, section, capability), "{section}");
            }
        }
    }

    #[test]
    fn record_without_edit_denies_edit() {
        let subject = user(
            UserRole::Employee,
            json!({ "vendorRegistrations": { "view": true, "downloadCsv": true } }),
        );
        assert!(subject.can(Section::VendorRegistrations, Capability::View));
        assert!(!subject.can(Section::VendorRegistrations, Capability::Edit));
    }

    #[test]
    fn undeclared_capability_is_inert() {
        let subject = user(
            UserRole::Employee,
            json!({ "websiteSettings": { "view": true, "edit": true, "downloadCsv": true } }),
        );
        assert!(subject.can(Section::WebsiteSettings, Capability::Edit));
        assert!(!subject.can(Section::WebsiteSettings, Capability::DownloadCsv));
    }

    #[test]
    fn record_shaped_flag_grants_nothing() {
        let subject = user(
            UserRole::Employee,
            json!({ "refundIssuance": { "view": true, "edit": true } }),
        );
        assert!(!subject.can_act(Section::RefundIssuance));
        assert!(!has_permission(
            &subject,
            Section::RefundIssuance,
            Some(Capability::Edit)
        ));
    }

    #[test]
    fn boolean_under_crud_key_grants_nothing() {
        let subject = user(UserRole::Employee, json!({ "walletManagement": true }));
        for capability in Capability::ALL {
            assert!(!subject.can(Section::WalletManagement, capability));
        }
    }

    #[test]
    fn scenario_empty_employee_cannot_view_rentals() {
        let subject = user(UserRole::Employee, json!({}));
        assert!(!has_permission(
            &subject,
            Section::RentalBookings,
            Some(Capability::View)
        ));
    }

    #[test]
    fn scenario_absent_csv_key_is_denied() {
        let subject = user(
            UserRole::Employee,
            json!({ "rentalBookings": { "view": true, "edit": false } }),
        );
        assert!(!has_permission(
            &subject,
            Section::RentalBookings,
            Some(Capability::DownloadCsv)
        ));
    }

    #[test]
    fn scenario_superadmin_edits_employees() {
        let subject = user(UserRole::SuperAdmin, json!({}));
        assert!(has_permission(
            &subject,
            Section::EmployeeManagement,
            Some(Capability::Edit)
        ));
    }

    #[test]
    fn scenario_flag_ignores_capability_argument() {
        let subject = user(UserRole::Employee, json!({ "driverAssignment": true }));
        assert!(has_permission(&subject, Section::DriverAssignment, None));
        assert!(has_permission(
            &subject,
            Section::DriverAssignment,
            Some(Capability::Edit)
        ));
        assert!(has_permission(
            &subject,
            Section::DriverAssignment,
            Some(Capability::DownloadCsv)
        ));
    }

    #[test]
    fn by_key_resolves_registered_sections() {
        let subject = user(UserRole::Employee, json!({ "legalPages": { "view": true } }));
        assert!(has_permission_by_key(
            &subject,
            "legalPages",
            Some(Capability::View)
        ));
        assert!(!has_permission_by_key(
            &subject,
            "legalPages",
            Some(Capability::Edit)
        ));
    }

    #[test]
    #[should_panic(expected = "unregistered permission section")]
    fn by_key_asserts_on_unregistered_section() {
        let subject = user(UserRole::Employee, json!({}));
        has_permission_by_key(&subject, "aiTripPlanner", Some(Capability::View));
    }

    #[test]
    #[should_panic(expected = "needs a capability")]
    fn crud_section_without_capability_asserts() {
        let subject = user(UserRole::Employee, json!({ "blogPosts": { "view": true } }));
        has_permission(&subject, Section::BlogPosts, None);
    }

    #[test]
    fn works_through_trait_objects() {
        let subject = user(UserRole::Employee, json!({ "userBanning": true }));
        let holder: &dyn PermissionHolder = &subject;
        assert!(has_permission(holder, Section::UserBanning, None));
        assert!(holder.can_act(Section::UserBanning));
    }
}
