use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Console-only logging, used when observability is off.
///
/// `LOG_LEVEL` (default `info`) sets the level for Ridebook crates; noisy
/// dependencies are held at `warn`. `RUST_LOG` overrides everything.
pub fn init_basic_console_logging() {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&log_level)));

    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(env_filter);

    // A subscriber may already be installed (tests, CLI reuse).
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}

pub(crate) fn default_directives(log_level: &str) -> String {
    format!(
        "ridebook={log_level},ridebook_core={log_level},ridebook_auth={log_level},\
         ridebook_observability={log_level},tower_http=warn,hyper=warn,sqlx=warn"
    )
}
