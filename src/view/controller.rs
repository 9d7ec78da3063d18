//! View Controller
//!
//! Holds the active view and the session flag. Mutation goes through
//! `set_view` / `set_logged_in`; everything else here is a pure function
//! of `(view, logged_in)`.

use serde::Serialize;

use super::types::{InvalidViewError, View};

/// Active view plus session flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ViewState {
    pub active_view: View,
    pub logged_in: bool,
}

/// Owner of the view selector and session flag
#[derive(Debug, Default)]
pub struct ViewController {
    state: ViewState,
}

impl ViewController {
    /// Start on `home`, logged out
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigate by name
    ///
    /// Unknown names fail and leave the active view as it was.
    pub fn set_view(&mut self, name: &str) -> Result<View, InvalidViewError> {
        let view: View = name.parse()?;
        self.set_active_view(view);
        Ok(view)
    }

    /// Navigate to a known view
    pub fn set_active_view(&mut self, view: View) {
        if self.state.active_view != view {
            tracing::debug!(from = %self.state.active_view, to = %view, "View changed");
        }
        self.state.active_view = view;
    }

    /// Set the session flag. Touches nothing else.
    pub fn set_logged_in(&mut self, value: bool) {
        if self.state.logged_in != value {
            tracing::info!(logged_in = value, "Session flag changed");
        }
        self.state.logged_in = value;
    }

    pub fn active_view(&self) -> View {
        self.state.active_view
    }

    pub fn logged_in(&self) -> bool {
        self.state.logged_in
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    /// What the active view currently resolves to
    pub fn resolved(&self) -> ResolvedView {
        resolve_view(self.state.active_view, self.state.logged_in)
    }
}

/// Which dataset a `(view, session)` pair projects to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedView {
    /// Digest plus the live feed
    Feed,
    Analytics,
    Leaderboard,
    Events,
    Profile,
    /// Profile requested while logged out
    ProfileLocked,
}

/// Map a view and session flag to the dataset to display
pub fn resolve_view(view: View, logged_in: bool) -> ResolvedView {
    match view {
        View::Home => ResolvedView::Feed,
        View::Analytics => ResolvedView::Analytics,
        View::Leaderboard => ResolvedView::Leaderboard,
        View::Events => ResolvedView::Events,
        View::Profile if logged_in => ResolvedView::Profile,
        View::Profile => ResolvedView::ProfileLocked,
    }
}

/// One sidebar navigation entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub view: View,
    pub label: &'static str,
    pub active: bool,
}

/// Navigation entries reachable for this session
///
/// Members-only views are listed only when logged in.
pub fn navigation(state: ViewState) -> Vec<NavItem> {
    View::all()
        .iter()
        .filter(|v| state.logged_in || !v.members_only())
        .map(|&view| NavItem {
            view,
            label: view.label(),
            active: view == state.active_view,
        })
        .collect()
}

/// Member actions the display may offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Affordances {
    /// "Save" on feed posts
    pub save_posts: bool,
    /// "Join Event" on events
    pub join_events: bool,
    /// Notification bell in the header
    pub notifications: bool,
    /// The member's own rank under the leaderboard
    pub show_own_rank: bool,
    /// Sign-up / login call to action
    pub login_prompt: bool,
}

/// Affordances gated by the session flag
pub fn affordances(logged_in: bool) -> Affordances {
    Affordances {
        save_posts: logged_in,
        join_events: logged_in,
        notifications: logged_in,
        show_own_rank: logged_in,
        login_prompt: !logged_in,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_home_logged_out() {
        let controller = ViewController::new();
        assert_eq!(controller.active_view(), View::Home);
        assert!(!controller.logged_in());
        assert_eq!(controller.resolved(), ResolvedView::Feed);
    }

    #[test]
    fn test_set_view_by_name() {
        let mut controller = ViewController::new();
        assert_eq!(controller.set_view("events").unwrap(), View::Events);
        assert_eq!(controller.active_view(), View::Events);
    }

    #[test]
    fn test_invalid_view_keeps_previous() {
        let mut controller = ViewController::new();
        controller.set_view("leaderboard").unwrap();

        let err = controller.set_view("bogus").unwrap_err();
        assert_eq!(err.name, "bogus");
        assert_eq!(controller.active_view(), View::Leaderboard);
    }

    #[test]
    fn test_profile_gate() {
        assert_eq!(resolve_view(View::Profile, false), ResolvedView::ProfileLocked);
        assert_eq!(resolve_view(View::Profile, true), ResolvedView::Profile);

        // Previously logged in makes no difference
        let mut controller = ViewController::new();
        controller.set_logged_in(true);
        controller.set_view("profile").unwrap();
        assert_eq!(controller.resolved(), ResolvedView::Profile);
        controller.set_logged_in(false);
        assert_eq!(controller.resolved(), ResolvedView::ProfileLocked);
    }

    #[test]
    fn test_non_member_views_ignore_session() {
        for view in [View::Home, View::Analytics, View::Leaderboard, View::Events] {
            assert_eq!(resolve_view(view, true), resolve_view(view, false));
        }
    }

    #[test]
    fn test_login_does_not_change_view() {
        let mut controller = ViewController::new();
        controller.set_view("analytics").unwrap();

        controller.set_logged_in(true);
        controller.set_logged_in(false);
        controller.set_logged_in(true);

        assert_eq!(controller.active_view(), View::Analytics);
        assert!(controller.logged_in());
    }

    #[test]
    fn test_navigation_hides_profile_when_logged_out() {
        let state = ViewState::default();
        let nav = navigation(state);
        let views: Vec<View> = nav.iter().map(|n| n.view).collect();
        assert_eq!(
            views,
            vec![View::Home, View::Analytics, View::Leaderboard, View::Events]
        );
        assert!(nav[0].active);
        assert!(nav[1..].iter().all(|n| !n.active));
    }

    #[test]
    fn test_navigation_shows_profile_when_logged_in() {
        let state = ViewState {
            active_view: View::Profile,
            logged_in: true,
        };
        let nav = navigation(state);
        assert_eq!(nav.len(), 5);
        let profile = nav.last().unwrap();
        assert_eq!(profile.view, View::Profile);
        assert_eq!(profile.label, "Profile");
        assert!(profile.active);
    }

    #[test]
    fn test_affordances() {
        let member = affordances(true);
        assert!(member.save_posts && member.join_events && member.notifications);
        assert!(member.show_own_rank);
        assert!(!member.login_prompt);

        let guest = affordances(false);
        assert!(!guest.save_posts && !guest.join_events && !guest.notifications);
        assert!(guest.login_prompt);
    }
}
