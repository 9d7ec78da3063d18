//! WebSocket Message Types
//!
//! Defines all message types for WebSocket communication between
//! dashboard clients and the Mooners server.

use serde::{Deserialize, Serialize};

use crate::feed::Post;
use crate::view::View;

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Subscribe to topics for real-time updates
    Subscribe {
        /// Topics to subscribe to (e.g., "feed.twitter", "feed.*")
        topics: Vec<String>,
    },
    /// Unsubscribe from topics
    Unsubscribe { topics: Vec<String> },
    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// A post was prepended to the feed
    NewPost { post: Post },
    /// The session flag flipped
    SessionChanged { logged_in: bool },
    /// The active view changed
    ViewChanged { view: View },
    /// Server notice (startup, shutdown, feed restarts)
    System { message: String },
    /// Subscription confirmed
    Subscribed { topics: Vec<String> },
    /// Unsubscription confirmed
    Unsubscribed { topics: Vec<String> },
    Pong,
    Error { message: String },
    /// Connection established
    Connected { connection_id: String },
}

/// Internal event for broadcasting through the hub
#[derive(Debug, Clone)]
pub struct WsEvent {
    /// Topic this event belongs to (e.g., "feed.telegram")
    pub topic: String,
    pub message: ServerMessage,
}

impl WsEvent {
    /// New feed post, published under `feed.{platform}`
    pub fn new_post(post: Post) -> Self {
        Self {
            topic: format!("feed.{}", post.platform),
            message: ServerMessage::NewPost { post },
        }
    }

    pub fn session(logged_in: bool) -> Self {
        Self {
            topic: "session".to_string(),
            message: ServerMessage::SessionChanged { logged_in },
        }
    }

    pub fn view(view: View) -> Self {
        Self {
            topic: "view".to_string(),
            message: ServerMessage::ViewChanged { view },
        }
    }

    pub fn system(message: &str) -> Self {
        Self {
            topic: "system".to_string(),
            message: ServerMessage::System {
                message: message.to_string(),
            },
        }
    }
}
