mod backend;
mod ballot;
mod config;
mod contracts;
mod errors;
mod navigator;
mod routes;
mod state;
mod views;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::backend::BackendClient;
use crate::config::Config;
use crate::navigator::routes::RouteTable;
use crate::routes::build_router;
use crate::state::AppState;
use crate::views::build_registry;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting wvote web shell v{}", env!("CARGO_PKG_VERSION"));

    let backend = BackendClient::new(config.backend_url.clone());
    info!("Voting backend: {}", backend.base_url());

    // Views are loaded on first navigation, not here
    let routes = RouteTable::new(&config.base_path);
    for def in routes.routes() {
        info!("Route '{}' -> {}", def.name, def.pattern);
    }
    let views = Arc::new(build_registry(routes, &config.assets_dir, backend.clone()));
    info!("View assets directory: {}", config.assets_dir.display());

    let state = AppState {
        views,
        backend,
        config: config.clone(),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
