//! Static dataset shapes
//!
//! Read-only reference data shown alongside the live feed.

use serde::{Deserialize, Serialize};

use crate::feed::Platform;

/// Daily AI digest shown at the top of the home view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Digest {
    pub summary: String,
    pub topics: Vec<String>,
    /// Sentiment label (e.g. "Very Positive")
    pub sentiment: String,
    /// Sentiment gauge, 0-100
    pub sentiment_score: u8,
}

/// One row of the contributor leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub username: String,
    pub score: u32,
    pub badge: String,
    pub contributions: u32,
}

/// Kind of community event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Call,
    Workshop,
    Game,
}

/// A scheduled community event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpcomingEvent {
    pub id: u32,
    pub title: String,
    /// Free-text date label
    pub date: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub attendees: u32,
}

/// The signed-in member's profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub username: String,
    pub joined_date: String,
    pub reputation: u32,
    pub achievements: Vec<String>,
    pub saved_posts: u32,
    /// Consecutive active days
    pub streak: u32,
    /// Position on the full leaderboard
    #[serde(default)]
    pub rank: Option<u32>,
}

/// Share of community messages per platform
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlatformShare {
    pub platform: Platform,
    /// Percentage, 0-100
    pub percent: u8,
}

/// Headline numbers for the analytics view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Analytics {
    pub messages_today: u32,
    /// Change versus yesterday, in percent
    pub messages_change_pct: i32,
    pub active_members: u32,
    /// Change versus last week, in percent
    pub active_members_change_pct: i32,
    pub sentiment_score: u8,
    pub sentiment_label: String,
    pub platform_distribution: Vec<PlatformShare>,
}

impl Analytics {
    /// Sum of all platform shares
    pub fn distribution_total(&self) -> u32 {
        self.platform_distribution
            .iter()
            .map(|s| s.percent as u32)
            .sum()
    }
}
