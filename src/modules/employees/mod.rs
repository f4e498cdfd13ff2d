//! Employee accounts and their permission documents.
//!
//! Reading requires `employeeManagement.view`; creating accounts and writing
//! permission documents is reserved to super admins.

pub mod controller;
pub mod router;
pub mod service;
