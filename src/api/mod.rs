//! Mooners REST API
//!
//! HTTP API layer for the dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## View
//! - `GET /api/v1/dashboard` - Full view-model
//! - `GET /api/v1/view` - Active view and its content
//! - `PUT /api/v1/view` - Navigate (`{"view": "events"}`)
//!
//! ## Session
//! - `GET /api/v1/session` - Session flag and member card
//! - `POST /api/v1/session/login` - Log in
//! - `POST /api/v1/session/logout` - Log out
//!
//! ## Feed
//! - `GET /api/v1/posts` - Feed snapshot (`?platform=twitter&limit=10`)
//! - `GET /api/v1/feed/status` - Synchronizer status
//! - `PUT /api/v1/feed/interval` - Restart with a new interval (`{"interval_ms": 5000}`)
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! ## WebSocket
//! - `GET /api/v1/ws` - Real-time streaming connection
//!
//! # Example
//!
//! ```rust,ignore
//! use mooners::api::{serve, AppState};
//! use mooners::config::Config;
//! use mooners::dashboard::DashboardSession;
//! use mooners::fixtures::Fixtures;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let session = Arc::new(DashboardSession::new(Fixtures::default(), &config.feed));
//!     session.start_feed().await?;
//!
//!     let state = AppState::new(session, config.api.clone());
//!     serve(state, &config.api).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use crate::config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::websocket::{websocket_handler, WsEvent};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // View routes
        .route("/dashboard", get(routes::view::get_dashboard))
        .route(
            "/view",
            get(routes::view::get_view).put(routes::view::set_view),
        )
        // Session routes
        .route("/session", get(routes::session::get_session))
        .route("/session/login", post(routes::session::login))
        .route("/session/logout", post(routes::session::logout))
        // Feed routes
        .route("/posts", get(routes::feed::list_posts))
        .route("/feed/status", get(routes::feed::feed_status))
        .route("/feed/interval", put(routes::feed::set_interval))
        // WebSocket route
        .route("/ws", get(websocket_handler));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let hub = state.ws_hub.clone();
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Mooners API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    hub.broadcast(&WsEvent::system("Server shutting down")).await;
    tracing::info!("Mooners API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
