//! Ridebook Observability Module
//!
//! - Structured logging (console, rolling error file, JSON file)
//! - Prometheus metrics for HTTP traffic and permission decisions
//! - HTTP request/response logging middleware
//!
//! Compiled in with the `observability` feature (default). At runtime it can
//! be switched off with `OBSERVABILITY_ENABLED=false`, which leaves plain
//! console logging in place.
//!
//! ```no_run
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     ridebook_observability::init_tracing()?;
//!     let handle = ridebook_observability::init_metrics()?;
//!     // ... build and serve the router ...
//!     Ok(())
//! }
//! ```

pub mod basic_logging;
#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

pub use basic_logging::init_basic_console_logging;

#[cfg(feature = "observability")]
pub use metrics_exporter_prometheus::PrometheusHandle;

#[cfg(feature = "observability")]
pub use logging::{init_tracing, logging_middleware};
#[cfg(feature = "observability")]
pub use metrics::{
    init_metrics, metrics_app, metrics_middleware, track_employee_created,
    track_permission_denied, track_permissions_updated, track_token_rejected,
};

#[cfg(feature = "observability")]
static OBSERVABILITY_ENABLED: std::sync::OnceLock<bool> = std::sync::OnceLock::new();

/// Whether observability is switched on at runtime (`OBSERVABILITY_ENABLED`, default on).
#[cfg(feature = "observability")]
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| parse_enabled(&v))
            .unwrap_or(true)
    })
}

#[cfg(feature = "observability")]
fn parse_enabled(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    value != "false" && value != "0" && value != "off"
}

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{extract::Request, middleware::Next, response::Response};

    pub fn is_observability_enabled() -> bool {
        false
    }

    /// Console logging only.
    pub fn init_tracing() -> anyhow::Result<()> {
        crate::basic_logging::init_basic_console_logging();
        Ok(())
    }

    pub async fn logging_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub fn track_permission_denied(_section: &str, _capability: &str) {}
    pub fn track_permissions_updated(_kind: &str) {}
    pub fn track_employee_created() {}
    pub fn track_token_rejected() {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
