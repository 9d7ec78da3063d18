//! Feed → WebSocket relay
//!
//! Background task that republishes every post the feed gains as a
//! `new_post` event on `feed.{platform}`.

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use super::hub::ConnectionHub;
use super::messages::WsEvent;
use crate::feed::Post;

/// Spawn the relay. It ends when the feed's sender is dropped.
pub fn spawn_feed_relay(hub: ConnectionHub, mut updates: broadcast::Receiver<Post>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match updates.recv().await {
                Ok(post) => {
                    hub.broadcast(&WsEvent::new_post(post)).await;
                }
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "Feed relay lagged, posts dropped for WebSocket clients");
                }
                Err(RecvError::Closed) => break,
            }
        }
        tracing::debug!("Feed relay stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{FeedState, Platform};
    use crate::websocket::{HubConfig, ServerMessage};
    use std::time::Duration;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_relays_new_posts() {
        let hub = ConnectionHub::new(HubConfig::default());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = hub.register(tx).await.unwrap();
        hub.subscribe(&id, vec!["feed.telegram".to_string()]).await.unwrap();

        let feed = FeedState::initialize(vec![]);
        let relay = spawn_feed_relay(hub.clone(), feed.subscribe());

        feed.prepend(Post::new(5, Platform::Telegram, "BlockchainBob", "gm")).await;

        let msg = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        match msg {
            ServerMessage::NewPost { post } => assert_eq!(post.id, 5),
            other => panic!("Expected NewPost, got {:?}", other),
        }

        relay.abort();
    }
}
