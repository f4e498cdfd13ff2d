//! Stored permission grants.
//!
//! A user's [`UserPermissions`] is persisted as a JSON object keyed by section:
//!
//! ```json
//! {
//!   "rentalBookings": { "view": true, "edit": false, "downloadCsv": true },
//!   "blogPosts": { "view": true },
//!   "driverAssignment": true
//! }
//! ```
//!
//! Loading is lenient. Unregistered keys are dropped, as are values whose
//! shape does not match the section's kind (a boolean under a CRUD section, a
//! record under an action flag). Leaves that are missing or not booleans read
//! as `false`. A stored blob therefore never fails to load; at worst it grants
//! nothing, and whatever is written back holds only well-shaped grants.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::capability::Capability;
use super::section::{Section, SectionKind};

/// Grant record for one CRUD section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionLevel {
    #[serde(default)]
    pub view: bool,
    #[serde(default)]
    pub edit: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_csv: Option<bool>,
}

impl PermissionLevel {
    /// Every leaf off; the starting point for a section's first grant.
    pub const DENIED: PermissionLevel = PermissionLevel {
        view: false,
        edit: false,
        download_csv: None,
    };

    /// Stored value for `capability`; a missing leaf reads as `false`.
    #[must_use]
    pub fn get(&self, capability: Capability) -> bool {
        match capability {
            Capability::View => self.view,
            Capability::Edit => self.edit,
            Capability::DownloadCsv => self.download_csv.unwrap_or(false),
        }
    }

    /// Copy with one leaf replaced.
    #[must_use]
    pub fn with(mut self, capability: Capability, value: bool) -> Self {
        match capability {
            Capability::View => self.view = value,
            Capability::Edit => self.edit = value,
            Capability::DownloadCsv => self.download_csv = Some(value),
        }
        self
    }

    fn from_object(object: &Map<String, Value>) -> Self {
        let leaf = |name: &str| object.get(name).and_then(Value::as_bool);
        Self {
            view: leaf("view").unwrap_or(false),
            edit: leaf("edit").unwrap_or(false),
            download_csv: object
                .get("downloadCsv")
                .map(|value| value.as_bool().unwrap_or(false)),
        }
    }
}

/// Value stored under one section key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SectionGrant {
    Crud(PermissionLevel),
    Flag(bool),
}

impl SectionGrant {
    /// Reads a stored value for `section`; `None` when its shape does not
    /// match the section's kind.
    fn from_value(section: Section, value: Value) -> Option<Self> {
        match (section.kind(), value) {
            (SectionKind::Flag, Value::Bool(enabled)) => Some(SectionGrant::Flag(enabled)),
            (SectionKind::Crud(_), Value::Object(object)) => {
                Some(SectionGrant::Crud(PermissionLevel::from_object(&object)))
            }
            _ => None,
        }
    }

    fn to_value(self) -> Value {
        match self {
            SectionGrant::Flag(enabled) => Value::Bool(enabled),
            SectionGrant::Crud(level) => {
                let mut object = Map::new();
                object.insert("view".to_string(), Value::Bool(level.view));
                object.insert("edit".to_string(), Value::Bool(level.edit));
                if let Some(download_csv) = level.download_csv {
                    object.insert("downloadCsv".to_string(), Value::Bool(download_csv));
                }
                Value::Object(object)
            }
        }
    }
}

/// Per-section grants held by one user.
///
/// Missing sections are denied. Construct with [`UserPermissions::empty`] for
/// a freshly created account.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, ToSchema)]
#[schema(value_type = Object)]
pub struct UserPermissions(BTreeMap<Section, SectionGrant>);

impl UserPermissions {
    /// No grants at all: every check on this value is denied.
    #[must_use]
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Builds permissions from a stored JSON document, leniently.
    ///
    /// ```
    /// use ridebook_core::permissions::{Capability, Section, UserPermissions};
    /// use serde_json::json;
    ///
    /// let permissions = UserPermissions::from_value(json!({
    ///     "rentalBookings": { "view": true, "edit": "yes" },
    ///     "legacySection": { "view": true },
    /// }));
    ///
    /// let level = permissions.level(Section::RentalBookings).unwrap();
    /// assert!(level.get(Capability::View));
    /// assert!(!level.get(Capability::Edit));
    /// assert_eq!(permissions.len(), 1);
    /// ```
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        let object = match value {
            Value::Object(object) => object,
            Value::Null => return Self::empty(),
            other => {
                tracing::warn!(kind = %json_kind(&other), "permission blob is not an object, treating as empty");
                return Self::empty();
            }
        };

        let mut grants = BTreeMap::new();
        for (key, value) in object {
            let Some(section) = Section::from_key(&key) else {
                tracing::warn!(key = %key, "dropping unregistered permission section");
                continue;
            };
            match SectionGrant::from_value(section, value) {
                Some(grant) => {
                    grants.insert(section, grant);
                }
                None => {
                    tracing::debug!(section = %section, "dropping unreadable permission grant");
                }
            }
        }

        Self(grants)
    }

    /// JSON document as persisted in the user record.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(section, grant)| (section.key().to_string(), grant.to_value()))
                .collect(),
        )
    }

    #[must_use]
    pub fn get(&self, section: Section) -> Option<&SectionGrant> {
        self.0.get(&section)
    }

    /// The stored CRUD record, if one is stored in that shape.
    #[must_use]
    pub fn level(&self, section: Section) -> Option<&PermissionLevel> {
        match self.0.get(&section) {
            Some(SectionGrant::Crud(level)) => Some(level),
            _ => None,
        }
    }

    /// The stored flag, if one is stored in that shape.
    #[must_use]
    pub fn flag(&self, section: Section) -> Option<bool> {
        match self.0.get(&section) {
            Some(SectionGrant::Flag(enabled)) => Some(*enabled),
            _ => None,
        }
    }

    /// Copy with exactly one section replaced; `self` is left untouched.
    #[must_use]
    pub fn with_grant(&self, section: Section, grant: SectionGrant) -> Self {
        let mut next = self.clone();
        next.0.insert(section, grant);
        next
    }

    pub fn insert(&mut self, section: Section, grant: SectionGrant) -> Option<SectionGrant> {
        self.0.insert(section, grant)
    }

    pub fn remove(&mut self, section: Section) -> Option<SectionGrant> {
        self.0.remove(&section)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Section, &SectionGrant)> {
        self.0.iter().map(|(section, grant)| (*section, grant))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Section, SectionGrant)> for UserPermissions {
    fn from_iter<I: IntoIterator<Item = (Section, SectionGrant)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for UserPermissions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(value))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
