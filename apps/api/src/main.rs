mod articles;
mod compose;
mod config;
mod errors;
mod models;
mod news_client;
mod routes;
mod sessions;
mod state;
mod templates;

#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::news_client::NewsClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Newsdesk API v{}", env!("CARGO_PKG_VERSION"));

    let news = NewsClient::new(&config.news_service_url, config.news_service_timeout)?;
    info!(
        "News service client initialized ({}, timeout {}s)",
        config.news_service_url,
        config.news_service_timeout.as_secs()
    );

    let state = AppState::new(Arc::new(news), config.clone());
    state.spawn_session_sweepers();
    info!(
        "Idle sessions expire after {}s",
        state.config.session_idle.as_secs()
    );

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the newsroom front-end

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
