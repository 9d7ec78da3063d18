//! Mooners Feed Demo
//!
//! Runs the dashboard without the HTTP layer: starts the feed
//! synchronizer, logs each new post, walks through the views and stops
//! after a few posts or on Ctrl+C.
//!
//! `MOONERS_DEMO_POSTS` sets how many posts to wait for (default: 3).

use mooners::config::Config;
use mooners::dashboard::DashboardSession;
use mooners::fixtures::Fixtures;
use mooners::view::{Content, View};
use tokio::sync::broadcast::error::RecvError;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_default();
    config.logging.init();

    tracing::info!("Mooners dashboard v{}", env!("CARGO_PKG_VERSION"));

    let target: usize = std::env::var("MOONERS_DEMO_POSTS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(3);

    let fixtures = Fixtures::load_or_default(config.fixtures.path.as_deref())?;
    let session = DashboardSession::new(fixtures, &config.feed);

    walk_views(&session).await?;

    let mut updates = session.subscribe();
    session.start_feed().await?;
    tracing::info!(
        interval_ms = config.feed.interval_ms,
        target,
        "Waiting for new posts (Ctrl+C to stop)"
    );

    let mut received = 0;
    while received < target {
        tokio::select! {
            update = updates.recv() => match update {
                Ok(post) => {
                    received += 1;
                    tracing::info!(
                        id = post.id,
                        platform = %post.platform,
                        author = %post.author,
                        likes = post.likes,
                        retweets = ?post.retweets,
                        "New post"
                    );
                }
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "Missed feed updates");
                }
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    session.stop_feed().await;

    let status = session.feed_status();
    tracing::info!(
        ticks = status.ticks,
        skipped = status.skipped_ticks,
        posts = session.feed().len().await,
        "Feed stopped"
    );

    Ok(())
}

/// Visit every view logged out and logged in, logging what each resolves to
async fn walk_views(session: &DashboardSession) -> Result<(), Box<dyn std::error::Error>> {
    for logged_in in [false, true] {
        session.set_logged_in(logged_in).await;

        for view in View::all() {
            session.set_view(view.as_str()).await?;
            let model = session.view_model().await;

            let summary = match &model.content {
                Content::Feed { .. } => format!("{} posts", model.posts.len()),
                Content::Analytics { analytics } => {
                    format!("{} messages today", analytics.messages_today)
                }
                Content::Leaderboard { entries, own_rank } => {
                    format!("{} entries, own rank {:?}", entries.len(), own_rank)
                }
                Content::Events { events, can_join } => {
                    format!("{} events, can join: {}", events.len(), can_join)
                }
                Content::Profile { profile } => format!("profile of {}", profile.username),
                Content::ProfileLocked { message } => message.clone(),
            };

            tracing::info!(view = %view, logged_in, "{}", summary);
        }
    }

    session.set_logged_in(false).await;
    session.set_view(View::Home.as_str()).await?;
    Ok(())
}
