//! Section registry and the caller's own permissions.
//!
//! These endpoints only need a valid session: they describe what exists and
//! what the caller can do, never anyone else's grants.

pub mod controller;
pub mod router;
