//! Built-in seed data
//!
//! The dataset the dashboard starts with when no fixture file is configured.

use super::types::*;
use super::Fixtures;
use crate::feed::{Platform, Post, Sentiment};

pub(super) fn default_fixtures() -> Fixtures {
    Fixtures {
        posts: seed_posts(),
        digest: digest(),
        leaderboard: leaderboard(),
        upcoming_events: upcoming_events(),
        user_profile: user_profile(),
        analytics: analytics(),
    }
}

fn seed_posts() -> Vec<Post> {
    vec![
        Post::new(
            1,
            Platform::Telegram,
            "CryptoKing",
            "🚀 Just completed the Week 2 challenge! Learned how to set up a MetaMask wallet and claimed my first airdrop. This community is incredible! 🌕",
        )
        .timestamp("2 hours ago")
        .sentiment(Sentiment::Positive)
        .likes(24),
        Post::new(
            2,
            Platform::Twitter,
            "@MoonersX",
            "📢 REMINDER: Community Call tonight at 8PM EST! We'll be discussing the upcoming NFT project and Q3 roadmap. Don't miss it! 🌕✨",
        )
        .timestamp("4 hours ago")
        .sentiment(Sentiment::Neutral)
        .likes(156)
        .retweets(43),
        Post::new(
            3,
            Platform::Whatsapp,
            "Sarah_Mooner",
            "Found an amazing airdrop opportunity - $500 USDT potential! Sharing the guide in resources channel. LFG Mooners! 💰",
        )
        .timestamp("5 hours ago")
        .sentiment(Sentiment::Positive)
        .likes(31),
        Post::new(
            4,
            Platform::Telegram,
            "Web3Guru",
            "Trivia Night was epic! Congrats to the winners. Next event: NFT Workshop this Saturday 🎨",
        )
        .timestamp("1 day ago")
        .sentiment(Sentiment::Positive)
        .likes(67),
    ]
}

fn digest() -> Digest {
    Digest {
        summary: "Today's Mooners community showed strong bullish sentiment with 234 messages across all platforms. Key highlights: Week 2 challenge completions surged 40%, tonight's community call has 89 RSVPs, and a new airdrop opportunity was shared gaining massive engagement. The community vibe is energetic and collaborative! 🌕".to_string(),
        topics: vec![
            "Challenge Completions".to_string(),
            "Community Call".to_string(),
            "Airdrop Alerts".to_string(),
            "NFT Workshop".to_string(),
        ],
        sentiment: "Very Positive".to_string(),
        sentiment_score: 87,
    }
}

fn leaderboard() -> Vec<LeaderboardEntry> {
    [
        (1, "CryptoKing", 1247, "🥇", 89),
        (2, "Sarah_Mooner", 1103, "🥈", 76),
        (3, "Web3Guru", 987, "🥉", 71),
        (4, "MoonWalker", 845, "🌟", 62),
        (5, "DeFi_Dave", 723, "🌟", 54),
    ]
    .into_iter()
    .map(|(rank, username, score, badge, contributions)| LeaderboardEntry {
        rank,
        username: username.to_string(),
        score,
        badge: badge.to_string(),
        contributions,
    })
    .collect()
}

fn upcoming_events() -> Vec<UpcomingEvent> {
    [
        (1, "Community Call", "Today, 8:00 PM EST", EventKind::Call, 89),
        (2, "NFT Workshop", "Saturday, 3:00 PM EST", EventKind::Workshop, 67),
        (3, "Trivia Night", "Next Wed, 7:00 PM EST", EventKind::Game, 45),
    ]
    .into_iter()
    .map(|(id, title, date, kind, attendees)| UpcomingEvent {
        id,
        title: title.to_string(),
        date: date.to_string(),
        kind,
        attendees,
    })
    .collect()
}

fn user_profile() -> UserProfile {
    UserProfile {
        username: "MoonRider".to_string(),
        joined_date: "Jan 2026".to_string(),
        reputation: 567,
        achievements: vec![
            "Early Adopter".to_string(),
            "Challenge Master".to_string(),
            "Community Helper".to_string(),
        ],
        saved_posts: 12,
        streak: 14,
        rank: Some(23),
    }
}

fn analytics() -> Analytics {
    Analytics {
        messages_today: 234,
        messages_change_pct: 23,
        active_members: 127,
        active_members_change_pct: 12,
        sentiment_score: 87,
        sentiment_label: "Very Positive".to_string(),
        platform_distribution: vec![
            PlatformShare {
                platform: Platform::Telegram,
                percent: 45,
            },
            PlatformShare {
                platform: Platform::Twitter,
                percent: 35,
            },
            PlatformShare {
                platform: Platform::Whatsapp,
                percent: 20,
            },
        ],
    }
}
