//! View selector and its parse error

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level display mode of the dashboard
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Home,
    Analytics,
    Leaderboard,
    Events,
    /// Member-only; resolves to a placeholder while logged out
    Profile,
}

impl View {
    /// All views in navigation order
    pub fn all() -> &'static [View] {
        &[
            View::Home,
            View::Analytics,
            View::Leaderboard,
            View::Events,
            View::Profile,
        ]
    }

    /// Lowercase selector name
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Analytics => "analytics",
            View::Leaderboard => "leaderboard",
            View::Events => "events",
            View::Profile => "profile",
        }
    }

    /// Navigation label
    pub fn label(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Analytics => "Analytics",
            View::Leaderboard => "Leaderboard",
            View::Events => "Events",
            View::Profile => "Profile",
        }
    }

    /// Whether the view needs a signed-in session
    pub fn members_only(&self) -> bool {
        matches!(self, View::Profile)
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for View {
    type Err = InvalidViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::all()
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| InvalidViewError {
                name: s.to_string(),
            })
    }
}

/// Navigation to a view name that does not exist
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown view '{name}'. Valid: home, analytics, leaderboard, events, profile")]
pub struct InvalidViewError {
    /// The rejected name
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_views() {
        for view in View::all() {
            assert_eq!(view.as_str().parse::<View>().unwrap(), *view);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "bogus".parse::<View>().unwrap_err();
        assert_eq!(err.name, "bogus");
        assert!(err.to_string().contains("Unknown view 'bogus'"));
    }

    #[test]
    fn test_parse_is_exact() {
        assert!("Home".parse::<View>().is_err());
        assert!(" home".parse::<View>().is_err());
        assert!("".parse::<View>().is_err());
    }

    #[test]
    fn test_default_is_home() {
        assert_eq!(View::default(), View::Home);
        assert!(View::Profile.members_only());
        assert!(!View::Events.members_only());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&View::Leaderboard).unwrap(), "\"leaderboard\"");
        let view: View = serde_json::from_str("\"events\"").unwrap();
        assert_eq!(view, View::Events);
    }
}
