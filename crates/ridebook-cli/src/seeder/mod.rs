//! Fake data for local environments.
//!
//! Seeded accounts use `@example.com` addresses so they can be cleared
//! without touching real users.

pub mod employees;

pub use employees::{EmployeeSeed, clear_seeded_employees, generate_employees, seed_employees};
