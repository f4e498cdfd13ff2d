//! # Ridebook Admin API
//!
//! REST API behind the Ridebook admin console, built with Axum and
//! PostgreSQL. It owns the section permission model that decides which
//! console screens, row actions and CSV exports each staff member can use.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Session extractor and permission guards
//! ├── modules/          # Feature modules
//! │   ├── employees/   # Employee accounts and their permission documents
//! │   └── permissions/ # Section registry and the caller's own permissions
//! ├── docs.rs           # OpenAPI document
//! ├── router.rs         # Main application router
//! ├── state.rs          # Shared application state
//! └── validator.rs      # Validated JSON extractor
//! crates/
//! ├── ridebook-core/    # AppError, pagination, permission model
//! ├── ridebook-config/  # Environment configuration
//! ├── ridebook-db/      # Pool and migrations
//! ├── ridebook-auth/    # Token claims and JWT verification
//! ├── ridebook-models/  # DTOs and database rows
//! ├── ridebook-observability/
//! └── ridebook-cli/
//! ```
//!
//! Each feature module follows the same layout: `controller.rs` (handlers),
//! `service.rs` (database work), `router.rs` (routes).
//!
//! ## Permissions
//!
//! Every console screen is a registered section. A user's stored document
//! grants `{ view, edit, downloadCsv }` per CRUD section, or a boolean per
//! action flag (driver assignment, refunds, ...). Super admins bypass every
//! check and never carry records. See [`ridebook_core::permissions`].
//!
//! ## Authentication
//!
//! Access tokens are issued by the external auth service and signed with
//! the shared `JWT_SECRET`. Claims carry the user's role and permission
//! document, so guards never hit the database.
//!
//! ## API Documentation
//!
//! - Swagger UI: `http://localhost:3000/swagger-ui`
//! - Scalar: `http://localhost:3000/scalar`

pub mod docs;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use ridebook_auth;
pub use ridebook_config;
pub use ridebook_core;
pub use ridebook_db;
pub use ridebook_models;
