//! Live Activity Feed
//!
//! This module owns the post sequence shown on the home view and the
//! timer that keeps it moving:
//!
//! - **types**: `Post`, `Platform`, `Sentiment`
//! - **state**: the shared newest-first sequence
//! - **generator**: where new posts come from
//! - **synchronizer**: the recurring tick that prepends generated posts
//! - **error**: error types
//!
//! # Example
//!
//! ```rust,no_run
//! use mooners::feed::{FeedState, FeedSynchronizer, SyntheticPostGenerator};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let feed = FeedState::initialize(Vec::new());
//!     let sync = FeedSynchronizer::new(feed.clone());
//!
//!     let handle = sync.start(
//!         Duration::from_millis(15_000),
//!         Arc::new(SyntheticPostGenerator::new()),
//!     )?;
//!
//!     tokio::time::sleep(Duration::from_secs(31)).await;
//!     println!("{} posts", feed.len().await);
//!
//!     handle.stop();
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod generator;
pub mod state;
pub mod synchronizer;
pub mod types;

pub use error::{FeedError, FeedResult, GeneratorError};
pub use generator::{PostGenerator, SyntheticPostGenerator};
pub use state::FeedState;
pub use synchronizer::{FeedSynchronizer, SyncHandle, SyncStatus, TickOutcome, DEFAULT_INTERVAL_MS};
pub use types::{Platform, Post, Sentiment};
