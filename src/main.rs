use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use restaurant_api::config::{self, Environment};
use restaurant_api::database::{DatabaseManager, MemoryStore, PgStore, Store};
use restaurant_api::services::seeder;
use restaurant_api::{app, AppState};

#[derive(Debug, Parser)]
#[command(name = "restaurant-api", version, about = "Restaurant listing API server")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on (falls back to RESTAURANT_API_PORT, then PORT, then 3000)
    #[arg(long)]
    port: Option<u16>,

    /// Seed sample restaurants when the store is empty
    #[arg(long)]
    seed: bool,

    /// Use the in-memory store even if DATABASE_URL is set
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, AUTH_JWT_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("restaurant_api=debug,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    // Initialize configuration (this loads the config singleton)
    let config = config::config().clone();
    config.check().context("invalid configuration")?;
    info!("Starting Restaurant API in {:?} mode", config.environment);

    let store: Arc<dyn Store> = match (&config.database.url, args.in_memory) {
        (Some(_), false) => {
            let pool = DatabaseManager::connect(&config.database).await?;
            DatabaseManager::ensure_schema(&pool).await?;
            Arc::new(PgStore::new(pool))
        }
        _ => {
            if config.environment == Environment::Production {
                anyhow::bail!("the in-memory store is not allowed in production");
            }
            warn!("Using in-memory store; data is lost on shutdown");
            Arc::new(MemoryStore::new())
        }
    };

    if args.seed || config.database.seed_on_startup {
        seeder::seed(store.as_ref()).await.context("seeding failed")?;
    }

    // Allow tests or deployments to override port via env
    let port = args
        .port
        .or_else(|| std::env::var("RESTAURANT_API_PORT").ok().and_then(|s| s.parse().ok()))
        .or_else(|| std::env::var("PORT").ok().and_then(|s| s.parse().ok()))
        .unwrap_or(3000);

    let bind_addr: SocketAddr = format!("{}:{}", args.host, port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", args.host, port))?;
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Restaurant API listening on http://{}", bind_addr);

    axum::serve(listener, app(AppState::new(config, store)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
