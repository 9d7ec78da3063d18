//! Core data types for the live activity feed
//!
//! - `Post`: a single feed item from a community platform
//! - `Platform` and `Sentiment`: classification enums

use serde::{Deserialize, Serialize};

/// A single feed item
///
/// Posts are immutable once created; the feed only ever prepends them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    /// Unique identifier
    pub id: u64,
    /// Platform the post originated from
    pub platform: Platform,
    /// Display name of the author
    pub author: String,
    /// Post body
    pub content: String,
    /// Free-text display label (e.g. "2 hours ago")
    pub timestamp: String,
    /// Sentiment classification
    pub sentiment: Sentiment,
    /// Like count
    pub likes: u32,
    /// Retweet count, only present for twitter posts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retweets: Option<u32>,
}

impl Post {
    /// Create a new post with required fields
    pub fn new(
        id: u64,
        platform: Platform,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id,
            platform,
            author: author.into(),
            content: content.into(),
            timestamp: "Just now".to_string(),
            sentiment: Sentiment::Neutral,
            likes: 0,
            retweets: None,
        }
    }

    /// Builder method: set the display timestamp label
    pub fn timestamp(mut self, label: impl Into<String>) -> Self {
        self.timestamp = label.into();
        self
    }

    /// Builder method: set sentiment
    pub fn sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = sentiment;
        self
    }

    /// Builder method: set like count
    pub fn likes(mut self, likes: u32) -> Self {
        self.likes = likes;
        self
    }

    /// Builder method: set retweet count
    pub fn retweets(mut self, retweets: u32) -> Self {
        self.retweets = Some(retweets);
        self
    }

    /// Minimal shape check applied to generated posts.
    ///
    /// Returns a description of the first problem found.
    pub fn shape_problem(&self) -> Option<&'static str> {
        if self.author.trim().is_empty() {
            Some("author is empty")
        } else if self.content.trim().is_empty() {
            Some("content is empty")
        } else {
            None
        }
    }
}

/// Platform a post originated from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Telegram,
    Twitter,
    Whatsapp,
}

impl Platform {
    /// Get all platforms for iteration
    pub fn all() -> &'static [Platform] {
        &[Platform::Telegram, Platform::Twitter, Platform::Whatsapp]
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Telegram => write!(f, "telegram"),
            Platform::Twitter => write!(f, "twitter"),
            Platform::Whatsapp => write!(f, "whatsapp"),
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "telegram" => Ok(Platform::Telegram),
            "twitter" => Ok(Platform::Twitter),
            "whatsapp" => Ok(Platform::Whatsapp),
            other => Err(format!(
                "Unknown platform '{}'. Valid: telegram, twitter, whatsapp",
                other
            )),
        }
    }
}

/// Sentiment classification of a post
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Neutral => write!(f, "neutral"),
            Sentiment::Negative => write!(f, "negative"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_builder() {
        let post = Post::new(7, Platform::Twitter, "@MoonersX", "Call tonight")
            .timestamp("4 hours ago")
            .sentiment(Sentiment::Neutral)
            .likes(156)
            .retweets(43);

        assert_eq!(post.id, 7);
        assert_eq!(post.timestamp, "4 hours ago");
        assert_eq!(post.likes, 156);
        assert_eq!(post.retweets, Some(43));
        assert!(post.shape_problem().is_none());
    }

    #[test]
    fn test_retweets_omitted_when_absent() {
        let post = Post::new(1, Platform::Telegram, "CryptoKing", "gm");
        let json = serde_json::to_string(&post).unwrap();
        assert!(!json.contains("retweets"));
        assert!(json.contains("\"platform\":\"telegram\""));
        assert!(json.contains("\"sentiment\":\"neutral\""));
    }

    #[test]
    fn test_post_deserialize_ignores_extra_fields() {
        let json = r#"{
            "id": 1, "platform": "telegram", "author": "CryptoKing",
            "content": "gm", "timestamp": "2 hours ago",
            "sentiment": "positive", "likes": 24, "media": null
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.platform, Platform::Telegram);
        assert_eq!(post.sentiment, Sentiment::Positive);
        assert_eq!(post.retweets, None);
    }

    #[test]
    fn test_shape_problem() {
        let post = Post::new(1, Platform::Twitter, "  ", "content");
        assert_eq!(post.shape_problem(), Some("author is empty"));

        let post = Post::new(1, Platform::Twitter, "bob", "");
        assert_eq!(post.shape_problem(), Some("content is empty"));
    }

    #[test]
    fn test_platform_parse() {
        assert_eq!("Twitter".parse::<Platform>().unwrap(), Platform::Twitter);
        assert_eq!("whatsapp".parse::<Platform>().unwrap(), Platform::Whatsapp);
        assert!("myspace".parse::<Platform>().is_err());
        assert_eq!(Platform::all().len(), 3);
    }
}
