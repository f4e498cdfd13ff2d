//! # Ridebook CLI
//!
//! Administration and seeding utilities used by the `ridebook-cli` binary.
//!
//! - [`inspect`]: Offline permission inspection against a JSON document
//! - [`admin`]: Super admin bootstrap and development tokens
//! - [`seeder`]: Fake employee accounts for local environments
//!
//! ```ignore
//! use ridebook_cli::seeder::seed_employees;
//!
//! let inserted = seed_employees(&pool, 25).await?;
//! ```

pub mod admin;
pub mod inspect;
pub mod seeder;
