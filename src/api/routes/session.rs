//! Session Routes
//!
//! - GET /api/v1/session - Session flag and member card
//! - POST /api/v1/session/login
//! - POST /api/v1/session/logout
//!
//! There is no authentication; these only flip the session flag.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::SessionResponse;
use crate::api::state::AppState;
use crate::websocket::WsEvent;

/// GET /api/v1/session
pub async fn get_session(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    Json(session_response(&state).await)
}

/// POST /api/v1/session/login
pub async fn login(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    set_logged_in(&state, true).await
}

/// POST /api/v1/session/logout
pub async fn logout(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    set_logged_in(&state, false).await
}

async fn set_logged_in(state: &AppState, value: bool) -> Json<SessionResponse> {
    let was = state.session.view_state().await.logged_in;
    state.session.set_logged_in(value).await;

    if was != value {
        state.notify(WsEvent::session(value)).await;
    }

    Json(session_response(state).await)
}

async fn session_response(state: &AppState) -> SessionResponse {
    let model = state.session.view_model().await;
    SessionResponse {
        logged_in: model.logged_in,
        session_card: model.session_card,
    }
}
