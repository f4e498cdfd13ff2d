use anyhow::Context;
use dotenvy::dotenv;
use ridebook::router::init_router;
use ridebook::state::AppState;
use ridebook_config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    ridebook_observability::init_tracing()?;

    let state = AppState::from_env()
        .await
        .context("Failed to connect to database")?;
    ridebook_db::run_migrations(&state.db)
        .await
        .context("Failed to run migrations")?;

    let app = init_router(state);

    #[cfg(feature = "observability")]
    let app = match ridebook_observability::init_metrics()? {
        Some(handle) => app.merge(ridebook_observability::metrics_app(handle)),
        None => app,
    };

    let server = ServerConfig::from_env();
    let listener = tokio::net::TcpListener::bind(server.address())
        .await
        .with_context(|| format!("Failed to bind {}", server.address()))?;

    tracing::info!(address = %server.address(), "Server running");
    tracing::info!("Swagger UI available at /swagger-ui, Scalar at /scalar");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
