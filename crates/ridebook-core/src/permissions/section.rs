//! Static registry of administrable sections.
//!
//! Every admin screen maps to exactly one [`Section`]. The registry declares,
//! once, what each section supports:
//!
//! - CRUD sections declare a [`CapabilitySet`] (a subset of view / edit /
//!   download CSV) and store a permission record per user.
//! - Flag sections are single actions (assign a driver, issue a refund, ...)
//!   and store one boolean per user.
//!
//! The registry order is the order rows appear in the permission matrix.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::capability::{Capability, CapabilitySet};

/// An administrable resource area with its own permission grant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    CorporateBookings,
    RentalBookings,
    CarpoolBookings,
    VendorRegistrations,
    ContactMessages,
    CustomerManagement,
    DriverManagement,
    SubscriptionManagement,
    WalletManagement,
    CarpoolBlackoutDates,
    BlogPosts,
    PortfolioClients,
    MarketingSettings,
    WebsiteSettings,
    LegalPages,
    EmployeeManagement,
    DriverAssignment,
    SubscriptionCancellation,
    RefundIssuance,
    UserBanning,
}

/// How a section is granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// View / edit / CSV triad restricted to the declared set.
    Crud(CapabilitySet),
    /// Standalone action flag.
    Flag,
}

/// Registry entry for a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionDescriptor {
    pub section: Section,
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub kind: SectionKind,
}

const fn crud(
    section: Section,
    key: &'static str,
    label: &'static str,
    description: &'static str,
    icon: &'static str,
    capabilities: CapabilitySet,
) -> SectionDescriptor {
    SectionDescriptor {
        section,
        key,
        label,
        description,
        icon,
        kind: SectionKind::Crud(capabilities),
    }
}

const fn flag(
    section: Section,
    key: &'static str,
    label: &'static str,
    description: &'static str,
    icon: &'static str,
) -> SectionDescriptor {
    SectionDescriptor {
        section,
        key,
        label,
        description,
        icon,
        kind: SectionKind::Flag,
    }
}

/// Indexed by `Section as usize`; entries must stay in enum order.
pub static REGISTRY: [SectionDescriptor; 20] = [
    crud(
        Section::CorporateBookings,
        "corporateBookings",
        "Corporate Bookings",
        "Corporate ride requests and their trip details",
        "briefcase",
        CapabilitySet::VIEW_EDIT_CSV,
    ),
    crud(
        Section::RentalBookings,
        "rentalBookings",
        "Rental Bookings",
        "Hourly and daily vehicle rental bookings",
        "car",
        CapabilitySet::VIEW_EDIT_CSV,
    ),
    crud(
        Section::CarpoolBookings,
        "carpoolBookings",
        "Carpool Bookings",
        "Carpool seat bookings and grouped trips",
        "users",
        CapabilitySet::VIEW_EDIT_CSV,
    ),
    crud(
        Section::VendorRegistrations,
        "vendorRegistrations",
        "Vendor Registrations",
        "Fleet vendor onboarding applications",
        "truck",
        CapabilitySet::VIEW_EDIT_CSV,
    ),
    crud(
        Section::ContactMessages,
        "contactMessages",
        "Contact Messages",
        "Messages submitted through the website contact form",
        "mail",
        CapabilitySet::VIEW_EDIT_CSV,
    ),
    crud(
        Section::CustomerManagement,
        "customerManagement",
        "Customer Management",
        "Customer accounts and their dashboards",
        "user",
        CapabilitySet::VIEW_EDIT_CSV,
    ),
    crud(
        Section::DriverManagement,
        "driverManagement",
        "Driver Management",
        "Driver profiles, documents and availability",
        "steering-wheel",
        CapabilitySet::VIEW_EDIT_CSV,
    ),
    crud(
        Section::SubscriptionManagement,
        "subscriptionManagement",
        "Subscription Management",
        "Carpool subscription plans and subscribers",
        "repeat",
        CapabilitySet::VIEW_EDIT_CSV,
    ),
    crud(
        Section::WalletManagement,
        "walletManagement",
        "Wallet Management",
        "Customer wallet balances and transactions",
        "wallet",
        CapabilitySet::VIEW_EDIT_CSV,
    ),
    crud(
        Section::CarpoolBlackoutDates,
        "carpoolBlackoutDates",
        "Carpool Blackout Dates",
        "Dates on which carpool service does not run",
        "calendar-off",
        CapabilitySet::VIEW_EDIT,
    ),
    crud(
        Section::BlogPosts,
        "blogPosts",
        "Blog Posts",
        "Blog articles published on the marketing site",
        "file-text",
        CapabilitySet::VIEW_EDIT,
    ),
    crud(
        Section::PortfolioClients,
        "portfolioClients",
        "Portfolio Clients",
        "Client logos and case studies on the marketing site",
        "award",
        CapabilitySet::VIEW_EDIT,
    ),
    crud(
        Section::MarketingSettings,
        "marketingSettings",
        "Marketing Settings",
        "Tracking pixels and campaign configuration",
        "megaphone",
        CapabilitySet::VIEW_EDIT,
    ),
    crud(
        Section::WebsiteSettings,
        "websiteSettings",
        "Website Settings",
        "Site-wide content, contact details and banners",
        "settings",
        CapabilitySet::VIEW_EDIT,
    ),
    crud(
        Section::LegalPages,
        "legalPages",
        "Legal Pages",
        "Terms of service, privacy policy and refund policy",
        "scale",
        CapabilitySet::VIEW_EDIT,
    ),
    crud(
        Section::EmployeeManagement,
        "employeeManagement",
        "Employee Management",
        "Employee accounts and their permission grants",
        "shield",
        CapabilitySet::VIEW_EDIT,
    ),
    flag(
        Section::DriverAssignment,
        "driverAssignment",
        "Assign Driver",
        "Assign or reassign a driver to a booking",
        "user-check",
    ),
    flag(
        Section::SubscriptionCancellation,
        "subscriptionCancellation",
        "Cancel Subscription",
        "Cancel a customer's carpool subscription",
        "x-circle",
    ),
    flag(
        Section::RefundIssuance,
        "refundIssuance",
        "Issue Refund",
        "Refund a payment to the customer's wallet or card",
        "rotate-ccw",
    ),
    flag(
        Section::UserBanning,
        "userBanning",
        "Ban / Unban User",
        "Block or restore a customer account",
        "slash",
    ),
];

impl Section {
    /// Every registered section in registry order.
    pub const ALL: [Section; 20] = [
        Section::CorporateBookings,
        Section::RentalBookings,
        Section::CarpoolBookings,
        Section::VendorRegistrations,
        Section::ContactMessages,
        Section::CustomerManagement,
        Section::DriverManagement,
        Section::SubscriptionManagement,
        Section::WalletManagement,
        Section::CarpoolBlackoutDates,
        Section::BlogPosts,
        Section::PortfolioClients,
        Section::MarketingSettings,
        Section::WebsiteSettings,
        Section::LegalPages,
        Section::EmployeeManagement,
        Section::DriverAssignment,
        Section::SubscriptionCancellation,
        Section::RefundIssuance,
        Section::UserBanning,
    ];

    #[must_use]
    pub fn descriptor(self) -> &'static SectionDescriptor {
        &REGISTRY[self as usize]
    }

    /// Key used in stored permission records.
    #[must_use]
    pub fn key(self) -> &'static str {
        self.descriptor().key
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        self.descriptor().label
    }

    #[must_use]
    pub fn kind(self) -> SectionKind {
        self.descriptor().kind
    }

    #[must_use]
    pub fn is_flag(self) -> bool {
        matches!(self.kind(), SectionKind::Flag)
    }

    /// Whether `capability` is declared for this section. Always false for flags.
    #[must_use]
    pub fn supports(self, capability: Capability) -> bool {
        match self.kind() {
            SectionKind::Crud(declared) => declared.supports(capability),
            SectionKind::Flag => false,
        }
    }

    /// Looks up a section by its record key.
    ///
    /// ```
    /// use ridebook_core::permissions::Section;
    ///
    /// assert_eq!(Section::from_key("rentalBookings"), Some(Section::RentalBookings));
    /// assert_eq!(Section::from_key("rental_bookings"), None);
    /// ```
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        REGISTRY
            .iter()
            .find(|descriptor| descriptor.key == key)
            .map(|descriptor| descriptor.section)
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn registry_is_in_enum_order() {
        for (index, section) in Section::ALL.iter().enumerate() {
            assert_eq!(REGISTRY[index].section, *section);
            assert_eq!(*section as usize, index);
        }
    }

    #[test]
    fn keys_match_serde_names() {
        for section in Section::ALL {
            let json = serde_json::to_string(&section).expect("serialize");
            assert_eq!(json, format!("\"{}\"", section.key()));
        }
    }

    #[test]
    fn keys_are_unique() {
        let keys: HashSet<&str> = REGISTRY.iter().map(|d| d.key).collect();
        assert_eq!(keys.len(), REGISTRY.len());
    }

    #[test]
    fn from_key_round_trips_every_section() {
        for section in Section::ALL {
            assert_eq!(Section::from_key(section.key()), Some(section));
        }
        assert_eq!(Section::from_key("aiTripPlanner"), None);
    }

    #[test]
    fn flags_support_no_capability() {
        assert!(Section::DriverAssignment.is_flag());
        for capability in Capability::ALL {
            assert!(!Section::RefundIssuance.supports(capability));
        }
    }

    #[test]
    fn settings_sections_have_no_csv_export() {
        assert!(!Section::WebsiteSettings.supports(Capability::DownloadCsv));
        assert!(!Section::PortfolioClients.supports(Capability::DownloadCsv));
        assert!(Section::RentalBookings.supports(Capability::DownloadCsv));
    }
}
