pub mod employees;
pub mod permissions;
