use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use symptom_core::{CoreConfig, SymptomCheckerService};

/// Main entry point for the symptom checker
///
/// Resolves configuration, loads the condition catalog once (falling back to the built-in
/// conditions when the store is missing, empty or broken) and serves the REST API until
/// Ctrl-C.
///
/// # Environment Variables
/// - `SYMPTOM_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `SYMPTOM_DB_URL`: SQLite URL of the condition store; empty disables the store
/// - `SYMPTOM_DB_TIMEOUT_SECS`: pool acquire timeout in seconds (default: 5)
/// - `SYMPTOM_DB_MIGRATE`: apply schema migrations at startup (default: true)
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration is invalid or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("symptom_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("symptom_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr: SocketAddr = std::env::var("SYMPTOM_REST_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".into())
        .parse()?;

    let cfg = CoreConfig::from_env_values(
        std::env::var("SYMPTOM_DB_URL").ok(),
        std::env::var("SYMPTOM_DB_TIMEOUT_SECS").ok(),
        std::env::var("SYMPTOM_DB_MIGRATE").ok(),
    )?;

    let service = SymptomCheckerService::bootstrap(&cfg).await;
    tracing::info!(
        conditions = service.conditions().len(),
        symptoms = service.all_symptoms().len(),
        "catalog ready from {}",
        service.source()
    );

    let app = router(AppState::new(service));

    tracing::info!("++ Starting symptom checker REST on {}", rest_addr);
    let listener = tokio::net::TcpListener::bind(rest_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- Symptom checker stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
