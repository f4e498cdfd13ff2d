//! # Ridebook Auth
//!
//! Session token claims and JWT utilities.
//!
//! Login and session storage live in the external auth service; it signs
//! access tokens with the shared `JWT_SECRET`. This crate verifies those
//! tokens and can mint equivalent ones for tooling and tests.
//!
//! - [`claims`]: Access token claims (identity, role, permission grants)
//! - [`jwt`]: Token creation and verification
//!
//! # Example
//!
//! ```ignore
//! use ridebook_auth::{create_access_token, verify_token};
//! use ridebook_config::JwtConfig;
//! use ridebook_core::{UserPermissions, UserRole};
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(
//!     user_id,
//!     "ops@ridebook.app",
//!     UserRole::Employee,
//!     UserPermissions::empty(),
//!     &config,
//! )?;
//! let claims = verify_token(&token, &config)?;
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
