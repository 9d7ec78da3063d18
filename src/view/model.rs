//! Projected View-Model
//!
//! The read-only structure handed to a rendering layer. Built from the
//! view state, the fixtures and a snapshot of the feed; building it never
//! mutates any of them.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::controller::{affordances, navigation, resolve_view, Affordances, NavItem, ResolvedView, ViewState};
use super::types::View;
use crate::feed::Post;
use crate::fixtures::{Analytics, Digest, Fixtures, LeaderboardEntry, UpcomingEvent, UserProfile};

/// Message shown in place of the profile while logged out
pub const PROFILE_LOCKED_MESSAGE: &str = "Please log in to view your profile.";

/// Number of leaderboard rows highlighted as the podium
const PODIUM_SIZE: usize = 3;

/// Everything the display needs for one render
#[derive(Debug, Clone, Serialize)]
pub struct ViewModel {
    pub active_view: View,
    pub logged_in: bool,
    pub navigation: Vec<NavItem>,
    pub affordances: Affordances,
    /// Sidebar member card, absent while logged out
    pub session_card: Option<SessionCard>,
    /// Dataset the active view resolves to
    pub content: Content,
    /// Live feed, newest first
    pub posts: Vec<Post>,
    pub digest: Digest,
    pub leaderboard: Vec<LeaderboardRow>,
    pub events: Vec<UpcomingEvent>,
    pub profile: ProfileSlot,
    pub analytics: Analytics,
    pub generated_at: DateTime<Utc>,
}

/// Dataset projected for the active view
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Content {
    /// Posts are carried once, in [`ViewModel::posts`]
    Feed { digest: Digest },
    Analytics { analytics: Analytics },
    Leaderboard {
        entries: Vec<LeaderboardRow>,
        #[serde(skip_serializing_if = "Option::is_none")]
        own_rank: Option<u32>,
    },
    Events { events: Vec<UpcomingEvent>, can_join: bool },
    Profile { profile: UserProfile },
    ProfileLocked { message: String },
}

/// Profile dataset or its logged-out placeholder
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProfileSlot {
    Available { profile: UserProfile },
    Locked { message: String },
}

/// Leaderboard entry with display hints
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardRow {
    #[serde(flatten)]
    pub entry: LeaderboardEntry,
    /// Top-three row
    pub highlighted: bool,
}

/// Compact member summary for the sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionCard {
    pub username: String,
    pub reputation: u32,
    pub streak: u32,
}

impl ViewModel {
    /// Project fixtures and feed through the current view state
    pub fn build(state: ViewState, fixtures: &Fixtures, posts: Vec<Post>) -> Self {
        let leaderboard = leaderboard_rows(&fixtures.leaderboard);
        let content = project(resolve_view(state.active_view, state.logged_in), state, fixtures);

        Self {
            active_view: state.active_view,
            logged_in: state.logged_in,
            navigation: navigation(state),
            affordances: affordances(state.logged_in),
            session_card: state.logged_in.then(|| SessionCard {
                username: fixtures.user_profile.username.clone(),
                reputation: fixtures.user_profile.reputation,
                streak: fixtures.user_profile.streak,
            }),
            content,
            posts,
            digest: fixtures.digest.clone(),
            leaderboard,
            events: fixtures.upcoming_events.clone(),
            profile: profile_slot(&fixtures.user_profile, state.logged_in),
            analytics: fixtures.analytics.clone(),
            generated_at: Utc::now(),
        }
    }
}

/// Materialize the dataset a resolved view selects
pub fn project(
    resolved: ResolvedView,
    state: ViewState,
    fixtures: &Fixtures,
) -> Content {
    match resolved {
        ResolvedView::Feed => Content::Feed {
            digest: fixtures.digest.clone(),
        },
        ResolvedView::Analytics => Content::Analytics {
            analytics: fixtures.analytics.clone(),
        },
        ResolvedView::Leaderboard => Content::Leaderboard {
            entries: leaderboard_rows(&fixtures.leaderboard),
            own_rank: if state.logged_in {
                fixtures.user_profile.rank
            } else {
                None
            },
        },
        ResolvedView::Events => Content::Events {
            events: fixtures.upcoming_events.clone(),
            can_join: state.logged_in,
        },
        ResolvedView::Profile => Content::Profile {
            profile: fixtures.user_profile.clone(),
        },
        ResolvedView::ProfileLocked => Content::ProfileLocked {
            message: PROFILE_LOCKED_MESSAGE.to_string(),
        },
    }
}

fn profile_slot(profile: &UserProfile, logged_in: bool) -> ProfileSlot {
    if logged_in {
        ProfileSlot::Available {
            profile: profile.clone(),
        }
    } else {
        ProfileSlot::Locked {
            message: PROFILE_LOCKED_MESSAGE.to_string(),
        }
    }
}

fn leaderboard_rows(entries: &[LeaderboardEntry]) -> Vec<LeaderboardRow> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| LeaderboardRow {
            entry: entry.clone(),
            highlighted: i < PODIUM_SIZE,
        })
        .collect()
}
