//! WebSocket Real-Time Streaming
//!
//! Pushes feed, session and view changes to dashboard clients.
//!
//! ## Architecture
//!
//! - **ConnectionHub**: Manages all active connections and subscriptions
//! - **Handler**: Handles WebSocket upgrade and message processing
//! - **Relay**: Republishes new feed posts to subscribers
//! - **Messages**: Defines client and server message formats
//!
//! ## Topics
//!
//! - `feed.*` - Every new post
//! - `feed.{platform}` - New posts from one platform (e.g., `feed.twitter`)
//! - `session` - Login / logout
//! - `view` - Active view changes
//! - `system` - Server notices
//!
//! ## Example
//!
//! ```javascript
//! const ws = new WebSocket('ws://localhost:8086/api/v1/ws');
//!
//! ws.onopen = () => {
//!   ws.send(JSON.stringify({type: 'subscribe', topics: ['feed.*', 'session']}));
//! };
//!
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   if (msg.type === 'new_post') console.log(msg.post);
//! };
//! ```

mod handler;
mod hub;
mod messages;
mod relay;

pub use handler::websocket_handler;
pub use hub::{is_valid_topic, ConnectionHub, ConnectionId, HubConfig, HubError};
pub use messages::{ClientMessage, ServerMessage, WsEvent};
pub use relay::spawn_feed_relay;
