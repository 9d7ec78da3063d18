//! Mooners API Server
//!
//! Run with: cargo run --bin mooners-api
//!
//! # Configuration
//!
//! Read from the first of `~/.config/mooners/config.toml`,
//! `/etc/mooners/config.toml` or `./config.toml`, then overridden by:
//! - `MOONERS_API_HOST` / `MOONERS_API_PORT`: bind address (default: 0.0.0.0:8086)
//! - `MOONERS_FEED_INTERVAL_MS`: milliseconds between synthetic posts (default: 15000)
//! - `MOONERS_FEED_SEED`: fixed RNG seed for synthetic posts
//! - `MOONERS_FIXTURES`: JSON fixture file (default: built-in seed data)
//! - `MOONERS_LOG_LEVEL` / `MOONERS_LOG_FORMAT`: logging (`RUST_LOG` wins when set)

use mooners::api::{serve, AppState};
use mooners::config::Config;
use mooners::dashboard::DashboardSession;
use mooners::fixtures::Fixtures;
use mooners::websocket::{spawn_feed_relay, WsEvent};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_default();
    config.logging.init();

    tracing::info!("Starting Mooners API server v{}", env!("CARGO_PKG_VERSION"));

    let fixtures = Fixtures::load_or_default(config.fixtures.path.as_deref())?;
    tracing::info!(
        posts = fixtures.posts.len(),
        events = fixtures.upcoming_events.len(),
        "Fixtures ready"
    );

    let session = Arc::new(DashboardSession::new(fixtures, &config.feed));
    let state = AppState::new(Arc::clone(&session), config.api.clone());

    // New posts → WebSocket subscribers
    let relay = spawn_feed_relay(state.ws_hub.clone(), session.subscribe());

    if config.feed.autostart {
        session.start_feed().await?;
        state.notify(WsEvent::system("Feed started")).await;
    } else {
        tracing::info!("Feed autostart disabled; start it with PUT /api/v1/feed/interval");
    }

    tracing::info!("Starting server on {}", config.api.addr());
    serve(state, &config.api).await?;

    session.stop_feed().await;
    relay.abort();
    tracing::info!("Mooners API server stopped");

    Ok(())
}
