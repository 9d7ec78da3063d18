//! View Routes
//!
//! - GET /api/v1/dashboard - Full view-model
//! - GET /api/v1/view - Active view and its content
//! - PUT /api/v1/view - Navigate

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{SetViewRequest, ViewResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::view::{resolve_view, ViewModel};
use crate::websocket::WsEvent;

/// GET /api/v1/dashboard
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<ViewModel> {
    Json(state.session.view_model().await)
}

/// GET /api/v1/view
pub async fn get_view(State(state): State<Arc<AppState>>) -> Json<ViewResponse> {
    Json(view_response(state.session.view_model().await))
}

/// PUT /api/v1/view
///
/// Unknown names are rejected with 400 INVALID_VIEW and the active view
/// is left as it was.
pub async fn set_view(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetViewRequest>,
) -> ApiResult<Json<ViewResponse>> {
    let before = state.session.view_state().await.active_view;
    let view = state.session.set_view(&req.view).await?;

    if view != before {
        state.notify(WsEvent::view(view)).await;
    }

    Ok(Json(view_response(state.session.view_model().await)))
}

fn view_response(model: ViewModel) -> ViewResponse {
    ViewResponse {
        active_view: model.active_view,
        logged_in: model.logged_in,
        resolved: resolve_view(model.active_view, model.logged_in),
        content: model.content,
    }
}
