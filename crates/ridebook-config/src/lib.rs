//! # Ridebook Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: JWT verification and signing settings
//! - [`cors`]: CORS allowed origins
//! - [`database`]: PostgreSQL connection settings
//! - [`server`]: Bind address
//!
//! Every `from_env()` falls back to a development default when a variable
//! is missing or unparsable.
//!
//! # Example
//!
//! ```ignore
//! use ridebook_config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
//!
//! dotenvy::dotenv().ok();
//! let jwt_config = JwtConfig::from_env();
//! let server = ServerConfig::from_env();
//! println!("listening on {}", server.address());
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

/// Reads and parses an environment variable, `None` when unset or invalid.
pub(crate) fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(variable = name, value = %raw, "ignoring unparsable environment variable");
            None
        }
    }
}
