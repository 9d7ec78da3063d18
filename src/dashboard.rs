//! Dashboard Session
//!
//! Ties the pieces together for one running dashboard: the fixtures, the
//! live feed with its synchronizer, and the view controller. The API
//! server and the demo binary both drive the dashboard through this type.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex, RwLock};

use crate::config::FeedConfig;
use crate::feed::{
    FeedError, FeedResult, FeedState, FeedSynchronizer, Platform, Post, PostGenerator, SyncHandle,
    SyncStatus, SyntheticPostGenerator, TickOutcome,
};
use crate::fixtures::Fixtures;
use crate::view::{InvalidViewError, View, ViewController, ViewModel, ViewState};

/// One dashboard: fixtures, live feed and view state
pub struct DashboardSession {
    fixtures: Arc<Fixtures>,
    feed: FeedState,
    synchronizer: FeedSynchronizer,
    generator: Arc<dyn PostGenerator>,
    controller: RwLock<ViewController>,
    run: Mutex<FeedRun>,
}

/// Current synchronizer run and the interval the next run will use
struct FeedRun {
    handle: Option<SyncHandle>,
    interval: Duration,
}

impl DashboardSession {
    /// Build a session using the stock synthetic generator
    pub fn new(fixtures: Fixtures, feed_config: &FeedConfig) -> Self {
        let generator: Arc<dyn PostGenerator> = match feed_config.seed {
            Some(seed) => Arc::new(SyntheticPostGenerator::seeded(seed)),
            None => Arc::new(SyntheticPostGenerator::new()),
        };
        Self::with_generator(fixtures, feed_config.interval(), generator)
    }

    /// Build a session with a custom post generator
    pub fn with_generator(
        fixtures: Fixtures,
        interval: Duration,
        generator: Arc<dyn PostGenerator>,
    ) -> Self {
        let feed = FeedState::initialize(fixtures.posts.clone());
        let synchronizer = FeedSynchronizer::new(feed.clone());

        Self {
            fixtures: Arc::new(fixtures),
            feed,
            synchronizer,
            generator,
            controller: RwLock::new(ViewController::new()),
            run: Mutex::new(FeedRun {
                handle: None,
                interval,
            }),
        }
    }

    pub fn fixtures(&self) -> &Fixtures {
        &self.fixtures
    }

    pub fn feed(&self) -> &FeedState {
        &self.feed
    }

    // ==================== Feed ====================

    /// Start the synchronizer with the configured interval
    pub async fn start_feed(&self) -> FeedResult<()> {
        let mut run = self.run.lock().await;
        if run.handle.is_some() {
            return Err(FeedError::AlreadyRunning);
        }
        let handle = self
            .synchronizer
            .start(run.interval, Arc::clone(&self.generator))?;
        run.handle = Some(handle);
        Ok(())
    }

    /// Stop the synchronizer. Returns whether it was running.
    pub async fn stop_feed(&self) -> bool {
        let mut run = self.run.lock().await;
        match run.handle.take() {
            Some(handle) => {
                handle.stop();
                true
            }
            None => false,
        }
    }

    /// Stop the current run (if any) and start again with a new interval
    pub async fn restart_feed(&self, interval: Duration) -> FeedResult<()> {
        if interval.is_zero() {
            return Err(FeedError::InvalidInterval(0));
        }

        let mut run = self.run.lock().await;
        let generator = Arc::clone(&self.generator);
        let handle = match run.handle.take() {
            Some(handle) => self.synchronizer.restart(handle, interval, generator)?,
            None => self.synchronizer.start(interval, generator)?,
        };
        run.handle = Some(handle);
        run.interval = interval;

        tracing::info!(interval_ms = interval.as_millis() as u64, "Feed restarted");
        Ok(())
    }

    /// Prepend one generated post now, outside the timer
    pub async fn tick_feed(&self) -> TickOutcome {
        self.synchronizer.tick(self.generator.as_ref()).await
    }

    pub async fn feed_interval(&self) -> Duration {
        self.run.lock().await.interval
    }

    pub fn feed_status(&self) -> SyncStatus {
        self.synchronizer.status()
    }

    /// Newest-first posts, optionally filtered by platform and capped
    pub async fn posts(&self, platform: Option<Platform>, limit: Option<usize>) -> Vec<Post> {
        self.feed.filtered(platform, limit).await
    }

    /// Receive every post the feed gains from now on
    pub fn subscribe(&self) -> broadcast::Receiver<Post> {
        self.feed.subscribe()
    }

    // ==================== View ====================

    /// Navigate by view name
    pub async fn set_view(&self, name: &str) -> Result<View, InvalidViewError> {
        self.controller.write().await.set_view(name)
    }

    pub async fn set_logged_in(&self, value: bool) {
        self.controller.write().await.set_logged_in(value);
    }

    pub async fn view_state(&self) -> ViewState {
        self.controller.read().await.state()
    }

    /// Project the current state into a view-model
    pub async fn view_model(&self) -> ViewModel {
        let state = self.view_state().await;
        let posts = self.feed.snapshot().await;
        ViewModel::build(state, &self.fixtures, posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::GeneratorError;
    use crate::view::Content;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn counting_generator(start: u64) -> Arc<dyn PostGenerator> {
        let next = Arc::new(AtomicU64::new(start));
        Arc::new(move || -> Result<Post, GeneratorError> {
            Ok(Post::new(
                next.fetch_add(1, Ordering::SeqCst),
                Platform::Twitter,
                "@AlphaMooner",
                "content",
            ))
        })
    }

    fn session(interval_ms: u64) -> DashboardSession {
        DashboardSession::with_generator(
            Fixtures::default(),
            Duration::from_millis(interval_ms),
            counting_generator(100),
        )
    }

    fn ids(posts: &[Post]) -> Vec<u64> {
        posts.iter().map(|p| p.id).collect()
    }

    #[tokio::test]
    async fn test_initial_state() {
        let session = session(1000);
        let state = session.view_state().await;
        assert_eq!(state.active_view, View::Home);
        assert!(!state.logged_in);
        assert_eq!(ids(&session.posts(None, None).await), vec![1, 2, 3, 4]);
        assert!(!session.feed_status().running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_feed_runs_and_stops() {
        let session = session(1000);
        session.start_feed().await.unwrap();
        assert!(session.feed_status().running);

        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(ids(&session.posts(None, None).await), vec![101, 100, 1, 2, 3, 4]);

        assert!(session.stop_feed().await);
        assert!(!session.stop_feed().await);
        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert_eq!(session.posts(None, None).await.len(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_twice_rejected() {
        let session = session(1000);
        session.start_feed().await.unwrap();
        assert_eq!(session.start_feed().await, Err(FeedError::AlreadyRunning));
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_changes_interval() {
        let session = session(10_000);
        session.start_feed().await.unwrap();

        session.restart_feed(Duration::from_millis(500)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(1200)).await;

        assert_eq!(session.posts(None, None).await.len(), 6);
        let status = session.feed_status();
        assert!(status.running);
        assert_eq!(status.interval_ms, 500);
    }

    #[tokio::test]
    async fn test_restart_rejects_zero() {
        let session = session(1000);
        let err = session.restart_feed(Duration::ZERO).await.unwrap_err();
        assert_eq!(err, FeedError::InvalidInterval(0));
        assert_eq!(session.feed_interval().await, Duration::from_millis(1000));
        assert!(!session.feed_status().running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_starts_stopped_feed() {
        let session = session(1000);
        session.restart_feed(Duration::from_millis(200)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(session.posts(None, None).await.len(), 6);
        assert_eq!(session.feed_interval().await, Duration::from_millis(200));
    }

    #[tokio::test]
    async fn test_manual_tick_reaches_subscribers() {
        let session = session(1000);
        let mut rx = session.subscribe();

        assert_eq!(session.tick_feed().await, TickOutcome::Inserted(100));
        assert_eq!(rx.recv().await.unwrap().id, 100);
    }

    #[tokio::test]
    async fn test_posts_filter() {
        let session = session(1000);
        let telegram = session.posts(Some(Platform::Telegram), None).await;
        assert_eq!(ids(&telegram), vec![1, 4]);
        assert_eq!(ids(&session.posts(None, Some(2)).await), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_profile_gate_through_session() {
        let session = session(1000);
        session.set_view("profile").await.unwrap();
        assert!(matches!(
            session.view_model().await.content,
            Content::ProfileLocked { .. }
        ));

        session.set_logged_in(true).await;
        assert!(matches!(
            session.view_model().await.content,
            Content::Profile { .. }
        ));
        assert_eq!(session.view_state().await.active_view, View::Profile);
    }

    #[tokio::test]
    async fn test_invalid_view_keeps_state() {
        let session = session(1000);
        session.set_view("events").await.unwrap();
        assert!(session.set_view("nope").await.is_err());
        assert_eq!(session.view_state().await.active_view, View::Events);
    }

    #[tokio::test(start_paused = true)]
    async fn test_view_model_sees_live_posts() {
        let session = session(1000);
        session.start_feed().await.unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;

        let model = session.view_model().await;
        assert!(matches!(model.content, Content::Feed { .. }));
        assert_eq!(ids(&model.posts), vec![100, 1, 2, 3, 4]);
    }
}
