//! Capabilities a CRUD section can grant.
//!
//! A [`Capability`] names one grant dimension (`view`, `edit`, `downloadCsv`).
//! A [`CapabilitySet`] is the set of dimensions a section declares in the
//! registry; anything outside that set is inert for the section.
//!
//! # Example
//!
//! ```
//! use ridebook_core::permissions::{Capability, CapabilitySet};
//!
//! let declared = CapabilitySet::VIEW_EDIT;
//! assert!(declared.supports(Capability::Edit));
//! assert!(!declared.supports(Capability::DownloadCsv));
//! ```

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One grant dimension of a CRUD section.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    View,
    Edit,
    DownloadCsv,
}

impl Capability {
    /// Every capability, in matrix column order.
    pub const ALL: [Capability; 3] = [Capability::View, Capability::Edit, Capability::DownloadCsv];

    /// Wire name, as stored in permission records.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Capability::View => "view",
            Capability::Edit => "edit",
            Capability::DownloadCsv => "downloadCsv",
        }
    }

    /// Parses a capability name (case-insensitive).
    ///
    /// Accepts the wire name plus `download_csv` and `csv` aliases.
    ///
    /// ```
    /// use ridebook_core::permissions::Capability;
    ///
    /// assert_eq!(Capability::parse("VIEW"), Some(Capability::View));
    /// assert_eq!(Capability::parse("downloadCsv"), Some(Capability::DownloadCsv));
    /// assert_eq!(Capability::parse("csv"), Some(Capability::DownloadCsv));
    /// assert_eq!(Capability::parse("delete"), None);
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "view" => Some(Capability::View),
            "edit" => Some(Capability::Edit),
            "downloadcsv" | "download_csv" | "csv" => Some(Capability::DownloadCsv),
            _ => None,
        }
    }

    /// The single-bit set for this capability.
    #[must_use]
    pub fn as_set(self) -> CapabilitySet {
        match self {
            Capability::View => CapabilitySet::VIEW,
            Capability::Edit => CapabilitySet::EDIT,
            Capability::DownloadCsv => CapabilitySet::DOWNLOAD_CSV,
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Capabilities a section declares in the registry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CapabilitySet: u8 {
        const VIEW         = 0b001;
        const EDIT         = 0b010;
        const DOWNLOAD_CSV = 0b100;
    }
}

impl CapabilitySet {
    /// Sections editable in place but without an export.
    pub const VIEW_EDIT: Self = Self::VIEW.union(Self::EDIT);

    /// Sections with a list view, row actions and a CSV export button.
    pub const VIEW_EDIT_CSV: Self = Self::VIEW_EDIT.union(Self::DOWNLOAD_CSV);

    #[must_use]
    pub fn supports(self, capability: Capability) -> bool {
        self.contains(capability.as_set())
    }

    /// Declared capabilities in column order.
    #[must_use]
    pub fn capabilities(self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|c| self.supports(*c))
            .collect()
    }
}
