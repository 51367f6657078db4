mod config;
mod content;
mod errors;
mod fetch;
mod layout;
mod models;
mod prefs;
mod render;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::prefs::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting folio v{}", env!("CARGO_PKG_VERSION"));

    // Preferences persist to a file when configured, otherwise live for the process.
    let preference_store: Arc<dyn PreferenceStore> = match &config.preferences_path {
        Some(path) => {
            info!("Preferences file: {}", path.display());
            Arc::new(FilePreferenceStore::new(path))
        }
        None => {
            info!("No PREFERENCES_PATH set; preferences are kept in memory");
            Arc::new(MemoryPreferenceStore::default())
        }
    };

    let state = AppState::from_config(&config, preference_store)?;
    info!(
        primary = %config.primary_api_url,
        throttle_ms = config.articles_throttle.as_millis() as u64,
        "Resource loader initialized"
    );

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
