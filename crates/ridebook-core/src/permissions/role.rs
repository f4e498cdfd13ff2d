use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Account role stored on every user row.
///
/// Only [`UserRole::SuperAdmin`] changes permission evaluation: it satisfies
/// every check and is never expressed through permission records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    SuperAdmin,
    #[default]
    Employee,
    Customer,
    Vendor,
}

impl UserRole {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "superadmin",
            UserRole::Employee => "employee",
            UserRole::Customer => "customer",
            UserRole::Vendor => "vendor",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "superadmin" => Some(UserRole::SuperAdmin),
            "employee" => Some(UserRole::Employee),
            "customer" => Some(UserRole::Customer),
            "vendor" => Some(UserRole::Vendor),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_superadmin(self) -> bool {
        self == UserRole::SuperAdmin
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_matches_serde() {
        for role in [
            UserRole::SuperAdmin,
            UserRole::Employee,
            UserRole::Customer,
            UserRole::Vendor,
        ] {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!(UserRole::parse("system_admin"), None);
        assert_eq!(UserRole::parse("SuperAdmin"), None);
    }

    #[test]
    fn default_is_employee() {
        assert_eq!(UserRole::default(), UserRole::Employee);
        assert!(!UserRole::default().is_superadmin());
    }
}
