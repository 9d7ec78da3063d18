//! # Mooners
//!
//! Community dashboard core: a live multi-platform activity feed plus the
//! view state of the dashboard that displays it.
//!
//! ## Features
//!
//! - **Live feed**: a synthetic post is prepended on a fixed interval
//! - **View controller**: five views with a members-only profile gate
//! - **View-model**: one read-only projection of everything a display needs
//! - **Real-time**: WebSocket push of new posts and session/view changes
//!
//! ## Modules
//!
//! - [`feed`]: Post sequence, generators and the feed synchronizer
//! - [`view`]: View selector, session flag and view-model projection
//! - [`fixtures`]: Seed dataset (posts, digest, leaderboard, events, profile)
//! - [`dashboard`]: One running dashboard tying the above together
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mooners::{Config, DashboardSession, Fixtures};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let session = DashboardSession::new(Fixtures::default(), &config.feed);
//!
//!     session.start_feed().await?;
//!     session.set_logged_in(true).await;
//!     session.set_view("profile").await?;
//!
//!     let model = session.view_model().await;
//!     println!("{} posts, view {}", model.posts.len(), model.active_view);
//!
//!     session.stop_feed().await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod feed;
pub mod fixtures;
pub mod view;
pub mod websocket;

// Re-export top-level types for convenience
pub use feed::{
    FeedError, FeedResult, FeedState, FeedSynchronizer, GeneratorError, Platform, Post,
    PostGenerator, Sentiment, SyncHandle, SyncStatus, SyntheticPostGenerator, TickOutcome,
};

pub use view::{
    resolve_view, Content, InvalidViewError, ResolvedView, View, ViewController, ViewModel,
    ViewState,
};

pub use fixtures::{FixtureError, Fixtures};

pub use dashboard::DashboardSession;

pub use api::{build_router, serve, ApiError, AppState};

pub use websocket::{ClientMessage, ConnectionHub, HubConfig, HubError, ServerMessage, WsEvent};

pub use config::{ApiConfig, Config, ConfigError, FeedConfig, FixturesConfig, LoggingConfig};
