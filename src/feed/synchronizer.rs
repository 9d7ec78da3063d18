//! Feed Synchronizer
//!
//! Keeps the feed "live" by prepending a generated post on a fixed interval.
//!
//! One synchronizer task may own a feed at a time. The generator is fixed
//! for the lifetime of a run; changing it (or the interval) is an explicit
//! [`FeedSynchronizer::restart`].

use serde::Serialize;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::error::{FeedError, FeedResult, GeneratorError};
use super::generator::PostGenerator;
use super::state::FeedState;
use super::types::Post;

/// Default tick interval in milliseconds
pub const DEFAULT_INTERVAL_MS: u64 = 15_000;

/// Drives periodic post injection into a [`FeedState`]
pub struct FeedSynchronizer {
    feed: FeedState,
    stats: Arc<SyncStats>,
}

/// Counters shared between the synchronizer and its running task
#[derive(Default)]
struct SyncStats {
    ticks: AtomicU64,
    skipped: AtomicU64,
    interval_ms: AtomicU64,
}

/// Point-in-time view of a synchronizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncStatus {
    /// Whether a timer task currently owns the feed
    pub running: bool,
    /// Interval of the current (or last) run
    pub interval_ms: u64,
    /// Posts inserted by ticks
    pub ticks: u64,
    /// Ticks skipped because the generator failed
    pub skipped_ticks: u64,
}

/// What a single tick did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// A post with this id was prepended
    Inserted(u64),
    /// The generator failed; nothing was inserted
    Skipped(GeneratorError),
    /// The run was stopped before the post could be inserted
    Cancelled,
}

/// Cancellation handle for a running synchronizer
///
/// Stopping is idempotent and also happens when the handle is dropped.
#[derive(Debug)]
pub struct SyncHandle {
    stopped: Arc<AtomicBool>,
    task: JoinHandle<()>,
    feed: FeedState,
    interval: Duration,
}

impl SyncHandle {
    /// Cancel all future ticks
    pub fn stop(&self) {
        if self.stopped.swap(true, Ordering::SeqCst) {
            return;
        }
        self.task.abort();
        self.feed.release();
        tracing::info!(interval_ms = self.interval.as_millis() as u64, "Feed synchronizer stopped");
    }

    /// Whether `stop` has been called
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Tick interval of this run
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Drop for SyncHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

impl FeedSynchronizer {
    /// Create a synchronizer for a feed
    pub fn new(feed: FeedState) -> Self {
        let stats = SyncStats {
            interval_ms: AtomicU64::new(DEFAULT_INTERVAL_MS),
            ..Default::default()
        };
        Self {
            feed,
            stats: Arc::new(stats),
        }
    }

    /// The feed this synchronizer writes to
    pub fn feed(&self) -> &FeedState {
        &self.feed
    }

    /// Start the recurring timer task
    ///
    /// The first tick fires one full interval after start. Fails if the
    /// interval is zero or another run already owns the feed.
    pub fn start(
        &self,
        interval: Duration,
        generator: Arc<dyn PostGenerator>,
    ) -> FeedResult<SyncHandle> {
        if interval.is_zero() {
            return Err(FeedError::InvalidInterval(0));
        }
        if !self.feed.try_claim() {
            return Err(FeedError::AlreadyRunning);
        }

        let interval_ms = interval.as_millis() as u64;
        self.stats.interval_ms.store(interval_ms, Ordering::SeqCst);

        let stopped = Arc::new(AtomicBool::new(false));
        let feed = self.feed.clone();
        let stats = Arc::clone(&self.stats);
        let task_stopped = Arc::clone(&stopped);

        tracing::info!(interval_ms, "Starting feed synchronizer");

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            // Skip the first immediate tick
            ticker.tick().await;

            loop {
                ticker.tick().await;

                if task_stopped.load(Ordering::SeqCst) {
                    break;
                }

                if let TickOutcome::Cancelled =
                    run_tick(&feed, &stats, generator.as_ref(), &task_stopped).await
                {
                    break;
                }
            }
        });

        Ok(SyncHandle {
            stopped,
            task,
            feed: self.feed.clone(),
            interval,
        })
    }

    /// Stop `handle` and start a fresh run with a new interval and generator
    pub fn restart(
        &self,
        handle: SyncHandle,
        interval: Duration,
        generator: Arc<dyn PostGenerator>,
    ) -> FeedResult<SyncHandle> {
        if interval.is_zero() {
            return Err(FeedError::InvalidInterval(0));
        }
        handle.stop();
        drop(handle);
        self.start(interval, generator)
    }

    /// Run one tick immediately, outside the timer
    pub async fn tick(&self, generator: &dyn PostGenerator) -> TickOutcome {
        let never_stopped = AtomicBool::new(false);
        run_tick(&self.feed, &self.stats, generator, &never_stopped).await
    }

    /// Current counters
    pub fn status(&self) -> SyncStatus {
        SyncStatus {
            running: self.feed.is_claimed(),
            interval_ms: self.stats.interval_ms.load(Ordering::SeqCst),
            ticks: self.stats.ticks.load(Ordering::SeqCst),
            skipped_ticks: self.stats.skipped.load(Ordering::SeqCst),
        }
    }
}

/// Generate one post and prepend it unless the run has been stopped
async fn run_tick(
    feed: &FeedState,
    stats: &SyncStats,
    generator: &dyn PostGenerator,
    stopped: &AtomicBool,
) -> TickOutcome {
    let post = match generate_checked(generator) {
        Ok(post) => post,
        Err(e) => {
            stats.skipped.fetch_add(1, Ordering::SeqCst);
            tracing::warn!(error = %e, "Post generator failed, skipping tick");
            return TickOutcome::Skipped(e);
        }
    };

    let id = post.id;
    let inserted = feed
        .prepend_if(post, || !stopped.load(Ordering::SeqCst))
        .await;

    if !inserted {
        return TickOutcome::Cancelled;
    }

    stats.ticks.fetch_add(1, Ordering::SeqCst);
    tracing::debug!(post_id = id, "Prepended generated post");
    TickOutcome::Inserted(id)
}

/// Call the generator, turning panics and malformed posts into errors
fn generate_checked(generator: &dyn PostGenerator) -> Result<Post, GeneratorError> {
    let post = catch_unwind(AssertUnwindSafe(|| generator.generate()))
        .map_err(|payload| GeneratorError::Panicked(panic_message(payload.as_ref())))??;

    if let Some(reason) = post.shape_problem() {
        return Err(GeneratorError::Malformed {
            id: post.id,
            reason: reason.to_string(),
        });
    }

    Ok(post)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::types::Platform;
    use std::sync::atomic::AtomicUsize;

    fn post(id: u64) -> Post {
        Post::new(id, Platform::Twitter, "author", "content")
    }

    fn ids(posts: &[Post]) -> Vec<u64> {
        posts.iter().map(|p| p.id).collect()
    }

    /// Generator returning 100, 101, 102, ...
    fn counting_generator(start: u64) -> Arc<dyn PostGenerator> {
        let next = Arc::new(AtomicU64::new(start));
        Arc::new(move || -> Result<Post, GeneratorError> {
            Ok(post(next.fetch_add(1, Ordering::SeqCst)))
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_tick_then_stop() {
        let feed = FeedState::initialize(vec![post(1), post(2)]);
        let sync = FeedSynchronizer::new(feed.clone());

        let handle = sync
            .start(Duration::from_millis(1000), counting_generator(100))
            .unwrap();

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(ids(&feed.snapshot().await), vec![100, 1, 2]);

        handle.stop();
        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(ids(&feed.snapshot().await), vec![100, 1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_prepend_order_over_many_ticks() {
        let seed = vec![post(1), post(2), post(3)];
        let feed = FeedState::initialize(seed);
        let sync = FeedSynchronizer::new(feed.clone());

        let handle = sync
            .start(Duration::from_millis(1000), counting_generator(100))
            .unwrap();

        tokio::time::sleep(Duration::from_millis(5500)).await;
        handle.stop();

        assert_eq!(
            ids(&feed.snapshot().await),
            vec![104, 103, 102, 101, 100, 1, 2, 3]
        );
        assert_eq!(sync.status().ticks, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_tick_before_first_interval() {
        let feed = FeedState::initialize(vec![post(1)]);
        let sync = FeedSynchronizer::new(feed.clone());

        let _handle = sync
            .start(Duration::from_millis(15_000), counting_generator(100))
            .unwrap();

        tokio::time::sleep(Duration::from_millis(14_000)).await;
        assert_eq!(feed.len().await, 1);

        tokio::time::sleep(Duration::from_millis(2_000)).await;
        assert_eq!(feed.len().await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_is_idempotent() {
        let feed = FeedState::initialize(vec![post(1)]);
        let sync = FeedSynchronizer::new(feed.clone());

        let handle = sync
            .start(Duration::from_millis(1000), counting_generator(100))
            .unwrap();

        // Before any tick has fired
        handle.stop();
        handle.stop();
        assert!(handle.is_stopped());
        drop(handle);

        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert_eq!(ids(&feed.snapshot().await), vec![1]);
        assert!(!sync.status().running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_ticks() {
        let feed = FeedState::initialize(vec![]);
        let sync = FeedSynchronizer::new(feed.clone());

        {
            let _handle = sync
                .start(Duration::from_millis(500), counting_generator(1))
                .unwrap();
            tokio::time::sleep(Duration::from_millis(700)).await;
        }

        let len = feed.len().await;
        assert_eq!(len, 1);
        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(feed.len().await, len);
    }

    #[tokio::test(start_paused = true)]
    async fn test_generator_failure_skips_tick() {
        let feed = FeedState::initialize(vec![post(1)]);
        let sync = FeedSynchronizer::new(feed.clone());

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let generator: Arc<dyn PostGenerator> =
            Arc::new(move || -> Result<Post, GeneratorError> {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                if n == 0 {
                    Err(GeneratorError::Failed("upstream hiccup".to_string()))
                } else {
                    Ok(post(100 + n as u64))
                }
            });

        let handle = sync.start(Duration::from_millis(1000), generator).unwrap();
        tokio::time::sleep(Duration::from_millis(2500)).await;
        handle.stop();

        assert_eq!(ids(&feed.snapshot().await), vec![101, 1]);
        let status = sync.status();
        assert_eq!(status.ticks, 1);
        assert_eq!(status.skipped_ticks, 1);
    }

    #[tokio::test]
    async fn test_panicking_generator_is_contained() {
        let feed = FeedState::initialize(vec![post(1)]);
        let sync = FeedSynchronizer::new(feed.clone());

        let generator = || -> Result<Post, GeneratorError> { panic!("boom") };
        let outcome = sync.tick(&generator).await;

        assert_eq!(outcome, TickOutcome::Skipped(GeneratorError::Panicked("boom".to_string())));
        assert_eq!(feed.len().await, 1);
    }

    #[tokio::test]
    async fn test_malformed_post_is_skipped() {
        let feed = FeedState::initialize(vec![]);
        let sync = FeedSynchronizer::new(feed.clone());

        let generator = || -> Result<Post, GeneratorError> {
            Ok(Post::new(9, Platform::Telegram, "", "content"))
        };
        let outcome = sync.tick(&generator).await;

        assert!(matches!(outcome, TickOutcome::Skipped(GeneratorError::Malformed { id: 9, .. })));
        assert!(feed.is_empty().await);
    }

    #[tokio::test]
    async fn test_manual_tick_prepends() {
        let feed = FeedState::initialize(vec![post(1), post(2)]);
        let sync = FeedSynchronizer::new(feed.clone());

        let generator = || -> Result<Post, GeneratorError> { Ok(post(100)) };
        assert_eq!(sync.tick(&generator).await, TickOutcome::Inserted(100));
        assert_eq!(ids(&feed.snapshot().await), vec![100, 1, 2]);
    }

    #[tokio::test]
    async fn test_second_start_rejected() {
        let feed = FeedState::initialize(vec![]);
        let sync = FeedSynchronizer::new(feed.clone());
        let other = FeedSynchronizer::new(feed.clone());

        let handle = sync
            .start(Duration::from_millis(1000), counting_generator(1))
            .unwrap();

        let err = sync
            .start(Duration::from_millis(1000), counting_generator(1))
            .unwrap_err();
        assert_eq!(err, FeedError::AlreadyRunning);

        // A second synchronizer over the same feed is rejected too
        assert!(other
            .start(Duration::from_millis(1000), counting_generator(1))
            .is_err());

        handle.stop();
        assert!(sync
            .start(Duration::from_millis(1000), counting_generator(1))
            .is_ok());
    }

    #[tokio::test]
    async fn test_zero_interval_rejected() {
        let sync = FeedSynchronizer::new(FeedState::initialize(vec![]));
        let err = sync.start(Duration::ZERO, counting_generator(1)).unwrap_err();
        assert_eq!(err, FeedError::InvalidInterval(0));
        assert!(!sync.status().running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_switches_generator() {
        let feed = FeedState::initialize(vec![]);
        let sync = FeedSynchronizer::new(feed.clone());

        let handle = sync
            .start(Duration::from_millis(1000), counting_generator(1))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;

        let handle = sync
            .restart(handle, Duration::from_millis(200), counting_generator(500))
            .unwrap();
        assert_eq!(handle.interval(), Duration::from_millis(200));
        assert_eq!(sync.status().interval_ms, 200);

        tokio::time::sleep(Duration::from_millis(300)).await;
        handle.stop();

        assert_eq!(ids(&feed.snapshot().await), vec![500, 1]);
    }

    #[test]
    fn test_default_status() {
        let sync = FeedSynchronizer::new(FeedState::initialize(vec![]));
        let status = sync.status();
        assert!(!status.running);
        assert_eq!(status.interval_ms, DEFAULT_INTERVAL_MS);
        assert_eq!(status.ticks, 0);
        assert_eq!(status.skipped_ticks, 0);
    }
}
