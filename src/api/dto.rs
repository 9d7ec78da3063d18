//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::feed::Post;
use crate::view::{Content, ResolvedView, SessionCard, View};

// ============================================
// VIEW DTOs
// ============================================

/// Navigation request
#[derive(Debug, Deserialize)]
pub struct SetViewRequest {
    /// View name: home, analytics, leaderboard, events, profile
    pub view: String,
}

/// Active view and what it currently shows
#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub active_view: View,
    pub logged_in: bool,
    pub resolved: ResolvedView,
    pub content: Content,
}

// ============================================
// SESSION DTOs
// ============================================

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub logged_in: bool,
    /// Member card, present only while logged in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_card: Option<SessionCard>,
}

// ============================================
// FEED DTOs
// ============================================

/// Query parameters for the post list
#[derive(Debug, Default, Deserialize)]
pub struct PostsParams {
    /// telegram, twitter or whatsapp
    #[serde(default)]
    pub platform: Option<String>,
    /// Maximum number of posts, newest first
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct PostsResponse {
    pub posts: Vec<Post>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct FeedStatusResponse {
    pub running: bool,
    pub interval_ms: u64,
    pub ticks: u64,
    pub skipped_ticks: u64,
    /// Posts currently in the feed
    pub posts: usize,
}

#[derive(Debug, Deserialize)]
pub struct SetIntervalRequest {
    pub interval_ms: u64,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy"
    pub status: String,
    /// "running" or "stopped"
    pub feed: String,
    pub ws_connections: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
