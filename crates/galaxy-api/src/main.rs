//! Galaxy of Consequence API server entry point.

use std::error::Error;
use std::sync::{Arc, Mutex};

use galaxy_api::config::Config;
use galaxy_api::state::AppState;
use galaxy_api::{build_router, telemetry};
use galaxy_core::clock::{Clock, SystemClock};
use galaxy_core::oracle::OracleClient;
use galaxy_core::repository::SessionStore;
use galaxy_core::rng::{DeterministicRng, SystemRng};
use galaxy_oracle::OpenAiClient;
use galaxy_session_store::{InMemorySessionStore, PgSessionStore};
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env()?;
    let telemetry = telemetry::init(config.otlp_endpoint.as_deref())?;

    tracing::info!("Starting Galaxy of Consequence API server");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store: Arc<dyn SessionStore> = if let Some(database_url) = &config.database_url {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect(database_url)
            .await?;
        let store = PgSessionStore::new(pool, clock);
        store.ensure_schema().await?;
        tracing::info!("Using PostgreSQL session store");
        Arc::new(store)
    } else {
        tracing::warn!("DATABASE_URL not set; sessions are kept in memory");
        Arc::new(InMemorySessionStore::new(clock))
    };

    if config.oracle.api_key.is_none() {
        tracing::warn!("no oracle API key configured; requests are sent unauthenticated");
    }
    tracing::info!(
        base_url = %config.oracle.base_url,
        model = %config.oracle.model,
        "Configured oracle"
    );
    let oracle: Arc<dyn OracleClient> = Arc::new(OpenAiClient::new(config.oracle.clone())?);
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> =
        Arc::new(Mutex::new(SystemRng::from_os_rng()));

    let app = build_router(AppState::new(store, oracle, rng));

    let addr = config.bind_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    telemetry.shutdown();

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
