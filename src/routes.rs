//! Change-trigger HTTP surface.
//!
//! The platform's document-write dispatcher posts each schedule-item write
//! here, one route parameter per watched collection. Watcher failures are
//! logged, not surfaced: the dispatcher always sees a completed invocation.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::post,
};
use serde::Deserialize;
use tracing::error;

use groupwatch_core::schedule::ItemKind;
use groupwatch_core::snapshot::ItemSnapshot;
use groupwatch_core::watcher::ChangeEvent;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/changes/{kind}", post(handle_change))
}

/// Body of a document-write trigger.
#[derive(Deserialize)]
struct ChangePayload {
    user_id: String,
    #[serde(default)]
    before: Option<ItemSnapshot>,
    #[serde(default)]
    after: Option<ItemSnapshot>,
}

async fn handle_change(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(payload): Json<ChangePayload>,
) -> StatusCode {
    let Ok(kind) = kind.parse::<ItemKind>() else {
        return StatusCode::NOT_FOUND;
    };

    let event = ChangeEvent {
        user_id: payload.user_id,
        kind,
        before: payload.before,
        after: payload.after,
    };

    if let Err(error) = state.watcher.handle(event).await {
        error!(%error, "change handling failed");
    }
    StatusCode::ACCEPTED
}
