//! Offline permission inspection.
//!
//! Answers the same questions as the API without a database: which sections
//! exist, what a permission document resolves to, and whether one check passes.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, bail};
use ridebook_core::permissions::{
    Capability, EffectiveGrant, PermissionMatrix, PermissionSubject, Section, SectionKind,
    UserPermissions, UserRole, has_permission, resolve_effective_permissions,
};

/// Clap value parser for `--role`.
pub fn parse_role(value: &str) -> Result<UserRole, String> {
    UserRole::parse(value).ok_or_else(|| {
        format!("unknown role `{value}` (expected superadmin, employee, customer or vendor)")
    })
}

/// Registry as a plain-text table.
pub fn render_sections() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<26} {:<5} {:<28} LABEL", "KEY", "KIND", "CAPABILITIES");
    for section in Section::ALL {
        let (kind, capabilities) = match section.kind() {
            SectionKind::Crud(declared) => (
                "crud",
                declared
                    .capabilities()
                    .iter()
                    .map(|c| c.as_str())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            SectionKind::Flag => ("flag", "-".to_string()),
        };
        let _ = writeln!(
            out,
            "{:<26} {:<5} {:<28} {}",
            section.key(),
            kind,
            capabilities,
            section.label()
        );
    }
    out
}

/// Reads a stored permission document from disk; `-` reads stdin.
pub fn load_permissions(path: &Path) -> anyhow::Result<UserPermissions> {
    let raw = if path == Path::new("-") {
        std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };
    let value: serde_json::Value =
        serde_json::from_str(&raw).with_context(|| format!("{} is not JSON", path.display()))?;
    Ok(UserPermissions::from_value(value))
}

pub fn resolve(role: UserRole, permissions: UserPermissions) -> PermissionMatrix {
    resolve_effective_permissions(&PermissionSubject::new(role, permissions))
}

/// Resolved matrix as a plain-text table, one section per line.
pub fn render_matrix(matrix: &PermissionMatrix) -> String {
    let mark = |allowed: bool| if allowed { "yes" } else { "no" };
    let mut out = String::new();
    for (section, grant) in matrix.iter() {
        let line = match grant {
            EffectiveGrant::Crud(level) => format!(
                "{:<26} view={:<3} edit={:<3} csv={}",
                section.key(),
                mark(level.view),
                mark(level.edit),
                mark(level.download_csv)
            ),
            EffectiveGrant::Flag(enabled) => {
                format!("{:<26} enabled={}", section.key(), mark(enabled))
            }
        };
        let _ = writeln!(out, "{line}");
    }
    out
}

/// One permission check by key.
///
/// Unlike the library call, unknown names are reported as errors here since
/// they come from a person typing.
pub fn check(
    role: UserRole,
    permissions: UserPermissions,
    section_key: &str,
    capability: Option<&str>,
) -> anyhow::Result<bool> {
    let Some(section) = Section::from_key(section_key) else {
        bail!("unknown section `{section_key}`; run `ridebook-cli sections` for the list");
    };
    let capability = match capability {
        Some(name) => match Capability::parse(name) {
            Some(capability) => Some(capability),
            None => bail!("unknown capability `{name}` (expected view, edit or downloadCsv)"),
        },
        None => None,
    };
    if capability.is_none() && !section.is_flag() {
        bail!("section `{section_key}` needs --capability");
    }

    let subject = PermissionSubject::new(role, permissions);
    Ok(has_permission(&subject, section, capability))
}
