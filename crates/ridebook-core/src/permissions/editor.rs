//! Permission matrix editor.
//!
//! Backs the employee-management screen: one row per registered section and
//! three toggle columns (View / Edit / Download CSV). Cells a section does not
//! declare are [`MatrixCell::Hidden`]. For flag sections only the Edit column
//! is shown, bound to the flag itself.
//!
//! The editor works on its own copy of the permissions it is given; the
//! caller's value is never touched. Every toggle produces a *new*
//! [`UserPermissions`] with exactly one section replaced, hands it to the
//! `on_change` callback and becomes the editor's current value, so successive
//! toggles accumulate. Saving is the caller's job.
//!
//! ```
//! use ridebook_core::permissions::{MatrixColumn, MatrixEditor, Section, UserPermissions};
//! use serde_json::json;
//!
//! let current = UserPermissions::from_value(json!({ "blogPosts": { "view": true, "edit": true } }));
//! let mut emitted = None;
//! let mut editor = MatrixEditor::new(&current, |next| emitted = Some(next));
//!
//! editor.toggle(Section::PortfolioClients, MatrixColumn::View, true).unwrap();
//!
//! assert_eq!(
//!     emitted.unwrap().to_value(),
//!     json!({
//!         "blogPosts": { "view": true, "edit": true },
//!         "portfolioClients": { "view": true, "edit": false },
//!     })
//! );
//! ```

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::capability::Capability;
use super::grant::{PermissionLevel, SectionGrant, UserPermissions};
use super::section::{Section, SectionKind};
use crate::errors::AppError;

/// Matrix column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum MatrixColumn {
    View,
    Edit,
    DownloadCsv,
}

impl MatrixColumn {
    pub const ALL: [MatrixColumn; 3] = [MatrixColumn::View, MatrixColumn::Edit, MatrixColumn::DownloadCsv];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MatrixColumn::View => "View",
            MatrixColumn::Edit => "Edit",
            MatrixColumn::DownloadCsv => "Download CSV",
        }
    }

    #[must_use]
    pub fn capability(self) -> Capability {
        match self {
            MatrixColumn::View => Capability::View,
            MatrixColumn::Edit => Capability::Edit,
            MatrixColumn::DownloadCsv => Capability::DownloadCsv,
        }
    }
}

/// State of one matrix cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "camelCase")]
pub enum MatrixCell {
    Hidden,
    Toggle(bool),
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixRow {
    pub section: Section,
    pub label: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub is_flag: bool,
    pub view: MatrixCell,
    pub edit: MatrixCell,
    pub download_csv: MatrixCell,
}

impl MatrixRow {
    #[must_use]
    pub fn cell(&self, column: MatrixColumn) -> MatrixCell {
        match column {
            MatrixColumn::View => self.view,
            MatrixColumn::Edit => self.edit,
            MatrixColumn::DownloadCsv => self.download_csv,
        }
    }
}

fn cell(permissions: &UserPermissions, section: Section, column: MatrixColumn) -> MatrixCell {
    match section.kind() {
        SectionKind::Flag => match column {
            MatrixColumn::Edit => MatrixCell::Toggle(permissions.flag(section).unwrap_or(false)),
            _ => MatrixCell::Hidden,
        },
        SectionKind::Crud(declared) => {
            let capability = column.capability();
            if !declared.supports(capability) {
                return MatrixCell::Hidden;
            }
            let stored = permissions
                .level(section)
                .is_some_and(|level| level.get(capability));
            MatrixCell::Toggle(stored)
        }
    }
}

/// Rows for every registered section, in registry order.
#[must_use]
pub fn matrix_rows(permissions: &UserPermissions) -> Vec<MatrixRow> {
    Section::ALL
        .into_iter()
        .map(|section| {
            let descriptor = section.descriptor();
            MatrixRow {
                section,
                label: descriptor.label,
                description: descriptor.description,
                icon: descriptor.icon,
                is_flag: section.is_flag(),
                view: cell(permissions, section, MatrixColumn::View),
                edit: cell(permissions, section, MatrixColumn::Edit),
                download_csv: cell(permissions, section, MatrixColumn::DownloadCsv),
            }
        })
        .collect()
}

/// Next permissions after setting one cell; `current` is not modified.
///
/// Fails with `422` when the cell is hidden for that section.
pub fn apply_toggle(
    current: &UserPermissions,
    section: Section,
    column: MatrixColumn,
    value: bool,
) -> Result<UserPermissions, AppError> {
    let grant = match section.kind() {
        SectionKind::Flag => {
            if column != MatrixColumn::Edit {
                return Err(AppError::unprocessable(anyhow!(
                    "{} is an action flag; only the Edit column can be toggled",
                    section.label()
                )));
            }
            SectionGrant::Flag(value)
        }
        SectionKind::Crud(declared) => {
            let capability = column.capability();
            if !declared.supports(capability) {
                return Err(AppError::unprocessable(anyhow!(
                    "{} does not support {}",
                    section.label(),
                    column.label()
                )));
            }
            let base = current
                .level(section)
                .copied()
                .unwrap_or(PermissionLevel::DENIED);
            SectionGrant::Crud(base.with(capability, value))
        }
    };

    Ok(current.with_grant(section, grant))
}

/// Editor over a working copy of a permission value.
pub struct MatrixEditor<F>
where
    F: FnMut(UserPermissions),
{
    current: UserPermissions,
    on_change: F,
}

impl<F> MatrixEditor<F>
where
    F: FnMut(UserPermissions),
{
    pub fn new(permissions: &UserPermissions, on_change: F) -> Self {
        Self {
            current: permissions.clone(),
            on_change,
        }
    }

    /// The value after every accepted toggle so far.
    #[must_use]
    pub fn current(&self) -> &UserPermissions {
        &self.current
    }

    #[must_use]
    pub fn rows(&self) -> Vec<MatrixRow> {
        matrix_rows(&self.current)
    }

    /// Applies one toggle on top of the current value and emits the result
    /// through `on_change`.
    ///
    /// Hidden cells are rejected; nothing is emitted and the current value
    /// stays as it was.
    pub fn toggle(
        &mut self,
        section: Section,
        column: MatrixColumn,
        value: bool,
    ) -> Result<UserPermissions, AppError> {
        let next = apply_toggle(&self.current, section, column, value)?;
        self.current = next.clone();
        (self.on_change)(next.clone());
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[test]
    fn one_row_per_section() {
        let rows = matrix_rows(&UserPermissions::empty());
        assert_eq!(rows.len(), Section::ALL.len());
        assert_eq!(rows[0].section, Section::CorporateBookings);
    }

    #[test]
    fn undeclared_cells_are_hidden() {
        let rows = matrix_rows(&UserPermissions::empty());
        let settings = rows
            .iter()
            .find(|row| row.section == Section::WebsiteSettings)
            .unwrap();
        assert_eq!(settings.view, MatrixCell::Toggle(false));
        assert_eq!(settings.edit, MatrixCell::Toggle(false));
        assert_eq!(settings.download_csv, MatrixCell::Hidden);
    }

    #[test]
    fn flag_rows_bind_edit_to_flag() {
        let permissions = UserPermissions::from_value(json!({ "refundIssuance": true }));
        let rows = matrix_rows(&permissions);
        let refund = rows
            .iter()
            .find(|row| row.section == Section::RefundIssuance)
            .unwrap();
        assert!(refund.is_flag);
        assert_eq!(refund.view, MatrixCell::Hidden);
        assert_eq!(refund.edit, MatrixCell::Toggle(true));
        assert_eq!(refund.download_csv, MatrixCell::Hidden);
    }

    #[test]
    fn stored_values_show_in_cells() {
        let permissions = UserPermissions::from_value(json!({
            "rentalBookings": { "view": true, "downloadCsv": true }
        }));
        let row = matrix_rows(&permissions)
            .into_iter()
            .find(|row| row.section == Section::RentalBookings)
            .unwrap();
        assert_eq!(row.cell(MatrixColumn::View), MatrixCell::Toggle(true));
        assert_eq!(row.cell(MatrixColumn::Edit), MatrixCell::Toggle(false));
        assert_eq!(row.cell(MatrixColumn::DownloadCsv), MatrixCell::Toggle(true));
    }

    #[test]
    fn toggle_adds_new_section_without_touching_others() {
        let current =
            UserPermissions::from_value(json!({ "blogPosts": { "view": true, "edit": true } }));
        let next = apply_toggle(&current, Section::PortfolioClients, MatrixColumn::View, true)
            .unwrap();
        assert_eq!(
            next.to_value(),
            json!({
                "blogPosts": { "view": true, "edit": true },
                "portfolioClients": { "view": true, "edit": false },
            })
        );
        assert_eq!(
            serde_json::to_string(&next.get(Section::BlogPosts)).unwrap(),
            serde_json::to_string(&current.get(Section::BlogPosts)).unwrap()
        );
        assert_eq!(current.len(), 1);
    }

    #[test]
    fn toggle_keeps_other_leaves_of_same_section() {
        let current = UserPermissions::from_value(json!({
            "walletManagement": { "view": true, "edit": true, "downloadCsv": false }
        }));
        let next =
            apply_toggle(&current, Section::WalletManagement, MatrixColumn::DownloadCsv, true)
                .unwrap();
        assert_eq!(
            next.to_value(),
            json!({ "walletManagement": { "view": true, "edit": true, "downloadCsv": true } })
        );
    }

    #[test]
    fn toggle_flag_through_edit_column() {
        let next = apply_toggle(
            &UserPermissions::empty(),
            Section::UserBanning,
            MatrixColumn::Edit,
            true,
        )
        .unwrap();
        assert_eq!(next.flag(Section::UserBanning), Some(true));

        let cleared = apply_toggle(&next, Section::UserBanning, MatrixColumn::Edit, false).unwrap();
        assert_eq!(cleared.to_value(), json!({ "userBanning": false }));
    }

    #[test]
    fn hidden_cells_are_rejected() {
        let err = apply_toggle(
            &UserPermissions::empty(),
            Section::LegalPages,
            MatrixColumn::DownloadCsv,
            true,
        )
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);

        let err = apply_toggle(
            &UserPermissions::empty(),
            Section::DriverAssignment,
            MatrixColumn::View,
            true,
        )
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn toggle_replaces_wrong_shape_with_fresh_record() {
        let current = UserPermissions::empty().with_grant(Section::LegalPages, SectionGrant::Flag(true));
        let next = apply_toggle(&current, Section::LegalPages, MatrixColumn::Edit, true).unwrap();
        assert_eq!(
            next.level(Section::LegalPages),
            Some(&PermissionLevel::DENIED.with(Capability::Edit, true))
        );
    }

    #[test]
    fn editor_emits_through_callback() {
        let original = UserPermissions::empty();
        let mut emitted = Vec::new();
        {
            let mut editor = MatrixEditor::new(&original, |next| emitted.push(next));
            editor
                .toggle(Section::ContactMessages, MatrixColumn::Edit, true)
                .unwrap();
            assert!(
                editor
                    .toggle(Section::BlogPosts, MatrixColumn::DownloadCsv, true)
                    .is_err()
            );
            editor
                .toggle(Section::ContactMessages, MatrixColumn::View, true)
                .unwrap();
        }
        assert_eq!(emitted.len(), 2);
        assert!(original.is_empty());
        assert_eq!(
            emitted[1].to_value(),
            json!({ "contactMessages": { "view": true, "edit": true } })
        );
    }

    #[test]
    fn editor_accumulates_across_sections() {
        let original =
            UserPermissions::from_value(json!({ "blogPosts": { "view": true, "edit": true } }));
        let mut editor = MatrixEditor::new(&original, |_| {});
        editor
            .toggle(Section::PortfolioClients, MatrixColumn::View, true)
            .unwrap();
        editor.toggle(Section::UserBanning, MatrixColumn::Edit, true).unwrap();

        assert_eq!(
            editor.current().to_value(),
            json!({
                "blogPosts": { "view": true, "edit": true },
                "portfolioClients": { "view": true, "edit": false },
                "userBanning": true,
            })
        );
        let banning = editor
            .rows()
            .into_iter()
            .find(|row| row.section == Section::UserBanning)
            .unwrap();
        assert_eq!(banning.edit, MatrixCell::Toggle(true));
        assert_eq!(original.len(), 1);
    }
}
