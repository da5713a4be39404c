//! vocab_server - REST server for word lookups.
//!
//! Startup order: config (fatal on error), logging, lazy pool, one schema
//! inspection, then the HTTP listener. The listener starts even when the
//! database cannot be reached; searches then go straight to the fallback
//! phase and health reports the failure.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vocab_lookup::api::{build_router, AppState};
use vocab_lookup::{inspect, AppConfig, DatabaseManager, SchemaCatalog, SearchEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vocab_lookup=debug,vocab_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            return Err(e).context("invalid configuration");
        }
    };

    tracing::info!("Starting vocabulary lookup server");

    // Unreachable databases are reported by the inspection below
    let db = DatabaseManager::connect_lazy(&config.database);

    let catalog: Arc<dyn SchemaCatalog> = Arc::new(db.catalog());
    let vocabulary = Arc::new(config.vocabulary.clone());

    let summary = Arc::new(
        inspect(
            catalog.as_ref(),
            &vocabulary,
            config.database.database.as_deref(),
        )
        .await,
    );

    let engine = Arc::new(SearchEngine::new(
        Arc::clone(&catalog),
        Arc::clone(&summary),
        vocabulary,
        config.limits,
    ));

    let app = build_router(AppState::new(catalog, engine, summary));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.listen_port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            return Err(e).with_context(|| format!("failed to bind to {}", addr));
        }
    };

    tracing::info!("Listening on http://{}", addr);
    tracing::info!("API Endpoints:");
    tracing::info!("  /api/health             - Database liveness");
    tracing::info!("  /api/search?word=<word> - Word lookup");
    tracing::info!("  /api/schema             - Inspection snapshot");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
