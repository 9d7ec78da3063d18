//! WebSocket Connection Hub
//!
//! Tracks connected dashboards and their topic subscriptions, and fans
//! feed/session/view events out to whoever subscribed.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use super::messages::{ServerMessage, WsEvent};
use crate::feed::Platform;

/// Unique identifier for a WebSocket connection
pub type ConnectionId = String;

/// Manages all WebSocket connections and subscriptions
///
/// Cloning yields another handle to the same registry.
#[derive(Clone)]
pub struct ConnectionHub {
    inner: Arc<HubInner>,
}

struct HubInner {
    /// ConnectionId → outbound channel and topics
    connections: RwLock<HashMap<ConnectionId, ConnectionHandle>>,
    /// Topic → subscribed ConnectionIds
    subscriptions: RwLock<HashMap<String, HashSet<ConnectionId>>>,
    config: HubConfig,
}

/// Configuration for the connection hub
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Maximum number of concurrent connections
    pub max_connections: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            max_connections: 1000,
        }
    }
}

/// Outbound side of one connection
struct ConnectionHandle {
    sender: mpsc::UnboundedSender<ServerMessage>,
    subscriptions: HashSet<String>,
}

impl ConnectionHub {
    pub fn new(config: HubConfig) -> Self {
        Self {
            inner: Arc::new(HubInner {
                connections: RwLock::new(HashMap::new()),
                subscriptions: RwLock::new(HashMap::new()),
                config,
            }),
        }
    }

    /// Register a new WebSocket connection
    ///
    /// Fails once the connection limit has been reached.
    pub async fn register(
        &self,
        sender: mpsc::UnboundedSender<ServerMessage>,
    ) -> Result<ConnectionId, HubError> {
        let mut connections = self.inner.connections.write().await;
        let limit = self.inner.config.max_connections;
        if connections.len() >= limit {
            return Err(HubError::TooManyConnections(limit));
        }

        let id = Uuid::new_v4().to_string();
        connections.insert(
            id.clone(),
            ConnectionHandle {
                sender,
                subscriptions: HashSet::new(),
            },
        );

        tracing::info!(connection_id = %id, "WebSocket connected");
        Ok(id)
    }

    /// Unregister a connection and drop its subscriptions
    pub async fn unregister(&self, id: &str) {
        let handle = self.inner.connections.write().await.remove(id);

        if let Some(handle) = handle {
            let mut subs = self.inner.subscriptions.write().await;
            for topic in handle.subscriptions {
                remove_subscriber(&mut subs, &topic, id);
            }
        }

        tracing::info!(connection_id = %id, "WebSocket disconnected");
    }

    /// Subscribe a connection to topics
    ///
    /// Unknown topics are skipped; the accepted ones are returned.
    pub async fn subscribe(&self, id: &str, topics: Vec<String>) -> Result<Vec<String>, HubError> {
        let mut connections = self.inner.connections.write().await;
        let handle = connections.get_mut(id).ok_or(HubError::ConnectionNotFound)?;

        let mut subs = self.inner.subscriptions.write().await;
        let mut subscribed = Vec::new();

        for topic in topics {
            if !is_valid_topic(&topic) {
                tracing::warn!(topic = %topic, "Invalid topic ignored");
                continue;
            }

            handle.subscriptions.insert(topic.clone());
            subs.entry(topic.clone()).or_default().insert(id.to_string());
            subscribed.push(topic);
        }

        tracing::debug!(connection_id = %id, topics = ?subscribed, "Subscribed to topics");
        Ok(subscribed)
    }

    /// Unsubscribe a connection from topics
    pub async fn unsubscribe(
        &self,
        id: &str,
        topics: Vec<String>,
    ) -> Result<Vec<String>, HubError> {
        let mut connections = self.inner.connections.write().await;
        let handle = connections.get_mut(id).ok_or(HubError::ConnectionNotFound)?;

        let mut subs = self.inner.subscriptions.write().await;
        let unsubscribed: Vec<String> = topics
            .into_iter()
            .filter(|topic| handle.subscriptions.remove(topic))
            .collect();

        for topic in &unsubscribed {
            remove_subscriber(&mut subs, topic, id);
        }

        tracing::debug!(connection_id = %id, topics = ?unsubscribed, "Unsubscribed from topics");
        Ok(unsubscribed)
    }

    /// Deliver an event to every subscriber of its topic
    ///
    /// `feed.*` subscribers receive every `feed.{platform}` event.
    /// Returns the number of connections the message was queued for.
    pub async fn broadcast(&self, event: &WsEvent) -> usize {
        let subs = self.inner.subscriptions.read().await;
        let connections = self.inner.connections.read().await;

        let wildcard = event
            .topic
            .split_once('.')
            .map(|(prefix, _)| format!("{}.*", prefix));

        let mut recipients: HashSet<&ConnectionId> = HashSet::new();
        if let Some(ids) = subs.get(&event.topic) {
            recipients.extend(ids);
        }
        if let Some(ids) = wildcard.and_then(|t| subs.get(&t)) {
            recipients.extend(ids);
        }

        let sent = recipients
            .into_iter()
            .filter_map(|id| connections.get(id))
            .filter(|handle| handle.sender.send(event.message.clone()).is_ok())
            .count();

        if sent > 0 {
            tracing::trace!(topic = %event.topic, subscribers = sent, "Broadcast event");
        }
        sent
    }

    /// Send a message directly to a specific connection
    pub async fn send_to(&self, id: &str, message: ServerMessage) -> Result<(), HubError> {
        let connections = self.inner.connections.read().await;
        let handle = connections.get(id).ok_or(HubError::ConnectionNotFound)?;

        handle.sender.send(message).map_err(|_| HubError::SendFailed)
    }

    pub async fn connection_count(&self) -> usize {
        self.inner.connections.read().await.len()
    }

    /// Number of connections subscribed to exactly `topic`
    pub async fn subscription_count(&self, topic: &str) -> usize {
        self.inner
            .subscriptions
            .read()
            .await
            .get(topic)
            .map(|s| s.len())
            .unwrap_or(0)
    }
}

/// Valid topics: `feed.*`, `feed.{platform}`, `session`, `view`, `system`
pub fn is_valid_topic(topic: &str) -> bool {
    match topic.split_once('.') {
        Some(("feed", "*")) => true,
        Some(("feed", platform)) => platform
            .parse::<Platform>()
            .map(|p| p.to_string() == platform)
            .unwrap_or(false),
        Some(_) => false,
        None => matches!(topic, "session" | "view" | "system"),
    }
}

fn remove_subscriber(subs: &mut HashMap<String, HashSet<ConnectionId>>, topic: &str, id: &str) {
    if let Some(subscribers) = subs.get_mut(topic) {
        subscribers.remove(id);
        if subscribers.is_empty() {
            subs.remove(topic);
        }
    }
}

/// Errors that can occur in the connection hub
#[derive(Debug, Error)]
pub enum HubError {
    #[error("Too many connections (limit: {0})")]
    TooManyConnections(usize),

    #[error("Connection not found")]
    ConnectionNotFound,

    #[error("Failed to send message")]
    SendFailed,
}
