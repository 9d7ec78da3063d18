//! Post Generators
//!
//! A generator produces the post inserted on each synchronizer tick.
//! `SyntheticPostGenerator` is the stock implementation that keeps the
//! feed looking live; any `Fn() -> Result<Post, GeneratorError>` closure
//! works as a generator too.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use super::error::GeneratorError;
use super::types::{Platform, Post, Sentiment};

/// Source of posts for the feed synchronizer
pub trait PostGenerator: Send + Sync + 'static {
    /// Produce the next post
    fn generate(&self) -> Result<Post, GeneratorError>;
}

impl<F> PostGenerator for F
where
    F: Fn() -> Result<Post, GeneratorError> + Send + Sync + 'static,
{
    fn generate(&self) -> Result<Post, GeneratorError> {
        self()
    }
}

/// Authors a synthetic post is attributed to
pub const SYNTHETIC_AUTHORS: [&str; 2] = ["@AlphaMooner", "BlockchainBob"];

/// Body of every synthetic post
pub const SYNTHETIC_CONTENT: &str =
    "A new message just came in! We're seeing huge engagement right now. LFG! 🚀";

/// Display label of every synthetic post
pub const SYNTHETIC_TIMESTAMP: &str = "Just now";

/// Generates randomized "new activity" posts
///
/// Ids come from the wall clock in milliseconds but never repeat: if the
/// clock has not moved past the previous id, the previous id plus one is used.
pub struct SyntheticPostGenerator {
    rng: Mutex<StdRng>,
    last_id: AtomicU64,
}

impl SyntheticPostGenerator {
    /// Create a generator seeded from OS entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create a deterministic generator (for tests and demos)
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            last_id: AtomicU64::new(0),
        }
    }

    /// Next strictly increasing id derived from the current time
    fn next_id(&self) -> u64 {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let prev = match self
            .last_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            }) {
            Ok(prev) | Err(prev) => prev,
        };
        now.max(prev + 1)
    }
}

impl Default for SyntheticPostGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PostGenerator for SyntheticPostGenerator {
    fn generate(&self) -> Result<Post, GeneratorError> {
        let id = self.next_id();
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());

        let platform = if rng.gen_bool(0.5) {
            Platform::Twitter
        } else {
            Platform::Telegram
        };
        let author = SYNTHETIC_AUTHORS[rng.gen_range(0..SYNTHETIC_AUTHORS.len())];
        let likes = rng.gen_range(1..=50);
        let retweets: u32 = rng.gen_range(1..=10);

        let post = Post::new(id, platform, author, SYNTHETIC_CONTENT)
            .timestamp(SYNTHETIC_TIMESTAMP)
            .sentiment(Sentiment::Positive)
            .likes(likes);

        // Only twitter posts carry retweets
        Ok(match platform {
            Platform::Twitter => post.retweets(retweets),
            _ => post,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_post_fields() {
        let generator = SyntheticPostGenerator::seeded(42);

        for _ in 0..200 {
            let post = generator.generate().unwrap();
            assert!(matches!(post.platform, Platform::Twitter | Platform::Telegram));
            assert!(SYNTHETIC_AUTHORS.contains(&post.author.as_str()));
            assert_eq!(post.content, SYNTHETIC_CONTENT);
            assert_eq!(post.timestamp, "Just now");
            assert_eq!(post.sentiment, Sentiment::Positive);
            assert!((1..=50).contains(&post.likes));
        }
    }

    #[test]
    fn test_retweets_only_on_twitter() {
        let generator = SyntheticPostGenerator::seeded(7);

        let posts: Vec<Post> = (0..200).map(|_| generator.generate().unwrap()).collect();
        assert!(posts.iter().any(|p| p.platform == Platform::Twitter));
        assert!(posts.iter().any(|p| p.platform == Platform::Telegram));

        for post in posts {
            match post.platform {
                Platform::Twitter => {
                    let retweets = post.retweets.expect("twitter post without retweets");
                    assert!((1..=10).contains(&retweets));
                }
                _ => assert_eq!(post.retweets, None),
            }
        }
    }

    #[test]
    fn test_ids_strictly_increase() {
        let generator = SyntheticPostGenerator::seeded(1);
        let ids: Vec<u64> = (0..1000).map(|_| generator.generate().unwrap().id).collect();

        for pair in ids.windows(2) {
            assert!(pair[1] > pair[0], "{} !> {}", pair[1], pair[0]);
        }
    }

    #[test]
    fn test_ids_track_wall_clock() {
        let before = Utc::now().timestamp_millis() as u64;
        let post = SyntheticPostGenerator::new().generate().unwrap();
        assert!(post.id >= before);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let a = SyntheticPostGenerator::seeded(99);
        let b = SyntheticPostGenerator::seeded(99);

        for _ in 0..20 {
            let pa = a.generate().unwrap();
            let pb = b.generate().unwrap();
            assert_eq!(pa.platform, pb.platform);
            assert_eq!(pa.author, pb.author);
            assert_eq!(pa.likes, pb.likes);
            assert_eq!(pa.retweets, pb.retweets);
        }
    }

    #[test]
    fn test_closure_generator() {
        let generator =
            || -> Result<Post, GeneratorError> { Ok(Post::new(100, Platform::Twitter, "bob", "hi")) };
        assert_eq!(generator.generate().unwrap().id, 100);
    }
}
