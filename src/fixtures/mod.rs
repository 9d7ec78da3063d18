//! Dashboard Fixtures
//!
//! The seed dataset supplied at startup: initial posts plus the read-only
//! digest, leaderboard, events, profile and analytics. Nothing in the
//! crate mutates fixtures after loading.
//!
//! Fixtures come from the built-in seed data (`Fixtures::default()`) or
//! from a JSON file with the same shape (`Fixtures::load`).

mod seed;
pub mod types;

pub use types::{
    Analytics, Digest, EventKind, LeaderboardEntry, PlatformShare, UpcomingEvent, UserProfile,
};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::feed::Post;

/// Complete startup dataset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fixtures {
    /// Initial feed, newest first
    pub posts: Vec<Post>,
    pub digest: Digest,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub upcoming_events: Vec<UpcomingEvent>,
    pub user_profile: UserProfile,
    pub analytics: Analytics,
}

impl Default for Fixtures {
    fn default() -> Self {
        seed::default_fixtures()
    }
}

impl Fixtures {
    /// Load fixtures from a JSON file
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let content = std::fs::read_to_string(path).map_err(|e| FixtureError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let fixtures: Fixtures =
            serde_json::from_str(&content).map_err(|e| FixtureError::Parse {
                path: path.to_path_buf(),
                error: e.to_string(),
            })?;

        tracing::info!(
            path = ?path,
            posts = fixtures.posts.len(),
            events = fixtures.upcoming_events.len(),
            "Loaded fixtures"
        );

        Ok(fixtures)
    }

    /// Load from `path` if given, otherwise use the built-in seed data
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, FixtureError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

/// Fixture loading errors
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixture file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse fixture file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}
