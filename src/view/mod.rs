//! View Controller and View-Model
//!
//! - **types**: the `View` selector and `InvalidViewError`
//! - **controller**: active view + session flag, and the pure
//!   `(view, logged_in)` → dataset mapping
//! - **model**: the read-only view-model handed to a rendering layer

pub mod controller;
pub mod model;
pub mod types;

pub use controller::{
    affordances, navigation, resolve_view, Affordances, NavItem, ResolvedView, ViewController,
    ViewState,
};
pub use model::{
    Content, LeaderboardRow, ProfileSlot, SessionCard, ViewModel, PROFILE_LOCKED_MESSAGE,
};
pub use types::{InvalidViewError, View};
