use std::sync::Arc;

use labor_engine::api::{AppState, create_router};
use labor_engine::audit::MemoryActivityLog;
use labor_engine::config::ConfigLoader;
use labor_engine::ledger::Ledger;
use labor_engine::store::MemoryStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "LABOR_ENGINE_CONFIG";
const DEFAULT_CONFIG_DIR: &str = "./config/default";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config_dir = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)?;
    info!(config_dir = %config_dir, "Configuration loaded");

    let ledger = Ledger::new(
        MemoryStore::new(),
        config.policy().clone(),
        Arc::new(MemoryActivityLog::new()),
    );
    let app = create_router(AppState::new(ledger));

    let addr = &config.server().bind_address;
    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
