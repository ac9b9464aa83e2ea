use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use measurement_api::config;
use measurement_api::database::{DatabaseManager, MeasurementRepository, MeasurementStore, MemoryStore};
use measurement_api::{app, is_development, AppState};

#[derive(Parser)]
#[command(name = "measurement-api")]
#[command(about = "CO2 measurement record service")]
#[command(version)]
struct Args {
    #[arg(long, help = "Port to listen on (overrides MEASUREMENT_API_PORT / PORT)")]
    port: Option<u16>,

    #[arg(long, default_value = "0.0.0.0", help = "Address to bind")]
    bind: String,

    #[arg(long, help = "Keep measurements in process memory instead of PostgreSQL")]
    memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, API_KEY, etc.
    let _ = dotenvy::dotenv();

    let default_filter = if is_development!() { "info,tower_http=debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    let args = Args::parse();
    let config = config::config();
    tracing::info!("Starting Measurement API in {:?} mode", config.environment);

    if config.security.api_key.is_empty() {
        tracing::warn!("API_KEY is empty; every /measurements request will be rejected");
    }

    let database = if args.memory {
        tracing::warn!("Using in-memory store; data is lost on exit");
        None
    } else {
        let database = DatabaseManager::connect(&config.database)
            .await
            .context("failed to connect to database")?;
        database.ensure_schema().await.context("failed to prepare measurements table")?;
        Some(database)
    };

    let store: Arc<dyn MeasurementStore> = match &database {
        Some(database) => Arc::new(MeasurementRepository::from_manager(database)),
        None => Arc::new(MemoryStore::new()),
    };

    let app = app(AppState::new(store, config));

    let port = args.port.unwrap_or(config.api.port);
    let bind_addr = format!("{}:{}", args.bind, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Measurement API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(database) = database {
        database.close().await;
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
