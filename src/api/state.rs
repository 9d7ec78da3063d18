//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::config::ApiConfig;
use crate::dashboard::DashboardSession;
use crate::websocket::{ConnectionHub, HubConfig, WsEvent};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// The dashboard being served
    pub session: Arc<DashboardSession>,
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
    /// WebSocket connection hub for real-time streaming
    pub ws_hub: ConnectionHub,
}

impl AppState {
    pub fn new(session: Arc<DashboardSession>, config: ApiConfig) -> Self {
        Self::with_ws_config(session, config, HubConfig::default())
    }

    /// Create AppState with custom WebSocket hub configuration
    pub fn with_ws_config(
        session: Arc<DashboardSession>,
        config: ApiConfig,
        hub_config: HubConfig,
    ) -> Self {
        Self {
            session,
            config: Arc::new(config),
            start_time: Instant::now(),
            ws_hub: ConnectionHub::new(hub_config),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Push an event to WebSocket subscribers
    ///
    /// Delivery is queued before this returns, so events from one caller
    /// reach each connection in the order they were sent.
    pub async fn notify(&self, event: WsEvent) -> usize {
        self.ws_hub.broadcast(&event).await
    }
}
