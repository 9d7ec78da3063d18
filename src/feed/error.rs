//! Feed error types

use thiserror::Error;

/// Errors surfaced by the feed and its synchronizer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// A synchronizer task is already running against this feed
    #[error("Feed synchronizer is already running")]
    AlreadyRunning,

    /// Tick interval must be a positive number of milliseconds
    #[error("Invalid tick interval: {0} ms (must be positive)")]
    InvalidInterval(u64),
}

/// Errors a post generator can report for a single tick
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    /// The generator could not produce a post
    #[error("Generator failed: {0}")]
    Failed(String),

    /// The generator produced a post with an invalid shape
    #[error("Malformed post {id}: {reason}")]
    Malformed { id: u64, reason: String },

    /// The generator panicked
    #[error("Generator panicked: {0}")]
    Panicked(String),
}

/// Result type alias for feed operations
pub type FeedResult<T> = Result<T, FeedError>;
