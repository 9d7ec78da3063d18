//! Feed Routes
//!
//! - GET /api/v1/posts - Feed snapshot, newest first
//! - GET /api/v1/feed/status - Synchronizer status
//! - PUT /api/v1/feed/interval - Restart the synchronizer with a new interval

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;
use std::time::Duration;

use crate::api::dto::{FeedStatusResponse, PostsParams, PostsResponse, SetIntervalRequest};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::feed::Platform;
use crate::websocket::WsEvent;

/// GET /api/v1/posts?platform=&limit=
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PostsParams>,
) -> ApiResult<Json<PostsResponse>> {
    let platform = params
        .platform
        .as_deref()
        .filter(|p| !p.is_empty() && *p != "all")
        .map(str::parse::<Platform>)
        .transpose()
        .map_err(ApiError::Validation)?;

    let posts = state.session.posts(platform, params.limit).await;

    Ok(Json(PostsResponse {
        total: posts.len(),
        posts,
    }))
}

/// GET /api/v1/feed/status
pub async fn feed_status(State(state): State<Arc<AppState>>) -> Json<FeedStatusResponse> {
    Json(status_response(&state).await)
}

/// PUT /api/v1/feed/interval
pub async fn set_interval(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetIntervalRequest>,
) -> ApiResult<Json<FeedStatusResponse>> {
    state
        .session
        .restart_feed(Duration::from_millis(req.interval_ms))
        .await?;

    state.notify(WsEvent::system(&format!(
        "Feed restarted with a {} ms interval",
        req.interval_ms
    )))
    .await;

    Ok(Json(status_response(&state).await))
}

async fn status_response(state: &AppState) -> FeedStatusResponse {
    let status = state.session.feed_status();
    FeedStatusResponse {
        running: status.running,
        interval_ms: status.interval_ms,
        ticks: status.ticks,
        skipped_ticks: status.skipped_ticks,
        posts: state.session.feed().len().await,
    }
}
