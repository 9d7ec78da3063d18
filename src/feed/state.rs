//! Feed State
//!
//! The canonical, newest-first post sequence shared between the
//! synchronizer (writer) and the API/view layer (readers).

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

use super::types::{Platform, Post};

/// Capacity of the new-post broadcast channel
const UPDATE_CHANNEL_CAPACITY: usize = 256;

/// Ordered post sequence, newest first
///
/// Cloning is cheap and every clone refers to the same sequence.
#[derive(Debug, Clone)]
pub struct FeedState {
    /// Posts, index 0 is the newest
    posts: Arc<RwLock<VecDeque<Post>>>,
    /// Notified with every prepended post
    updates_tx: broadcast::Sender<Post>,
    /// Set while a synchronizer task owns this feed
    claimed: Arc<AtomicBool>,
}

impl FeedState {
    /// Establish the starting sequence exactly as given
    pub fn initialize(seed_posts: Vec<Post>) -> Self {
        let (updates_tx, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);

        tracing::debug!(seed_posts = seed_posts.len(), "Feed initialized");

        Self {
            posts: Arc::new(RwLock::new(seed_posts.into())),
            updates_tx,
            claimed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Insert a post at the head of the sequence
    pub async fn prepend(&self, post: Post) {
        self.prepend_if(post, || true).await;
    }

    /// Insert a post at the head if `keep` still holds once the write lock is taken.
    ///
    /// Returns whether the post was inserted.
    pub(crate) async fn prepend_if(&self, post: Post, keep: impl FnOnce() -> bool) -> bool {
        let mut posts = self.posts.write().await;
        if !keep() {
            return false;
        }
        posts.push_front(post.clone());
        drop(posts);

        // No receivers is fine
        let _ = self.updates_tx.send(post);
        true
    }

    /// Copy of the whole sequence, newest first
    pub async fn snapshot(&self) -> Vec<Post> {
        self.posts.read().await.iter().cloned().collect()
    }

    /// Newest-first posts, optionally restricted to one platform and capped
    pub async fn filtered(&self, platform: Option<Platform>, limit: Option<usize>) -> Vec<Post> {
        let posts = self.posts.read().await;
        posts
            .iter()
            .filter(|p| platform.map(|pl| p.platform == pl).unwrap_or(true))
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    /// Number of posts in the feed
    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    /// Whether the feed has no posts
    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }

    /// Receive every post prepended from now on
    pub fn subscribe(&self) -> broadcast::Receiver<Post> {
        self.updates_tx.subscribe()
    }

    /// Claim the feed for a synchronizer task. Fails if already claimed.
    pub(crate) fn try_claim(&self) -> bool {
        self.claimed
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Release a claim taken with `try_claim`
    pub(crate) fn release(&self) {
        self.claimed.store(false, Ordering::SeqCst);
    }

    /// Whether a synchronizer currently owns the feed
    pub fn is_claimed(&self) -> bool {
        self.claimed.load(Ordering::SeqCst)
    }
}
