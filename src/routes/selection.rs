//! Selection endpoints.
//!
//! POST /api/v1/selection — a selection-change notice from the viewer;
//! queued into the attribution pipeline, acknowledged with 202 before
//! attribution completes.
//!
//! GET /api/v1/selection/decorations — the decorations most recently
//! rendered by the pipeline (empty list means "draw nothing").

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::error::{AppError, Result};
use crate::models::{RenderedDecorations, SelectionNotice};
use crate::session::DecorationStore;

#[derive(Clone)]
pub struct SelectionState {
    pub notices: mpsc::Sender<SelectionNotice>,
    pub store: Arc<DecorationStore>,
}

pub fn routes(notices: mpsc::Sender<SelectionNotice>, store: Arc<DecorationStore>) -> Router {
    Router::new()
        .route("/api/v1/selection", post(post_selection))
        .route("/api/v1/selection/decorations", get(get_decorations))
        .with_state(SelectionState { notices, store })
}

async fn post_selection(
    State(state): State<SelectionState>,
    Json(notice): Json<SelectionNotice>,
) -> Result<StatusCode> {
    state
        .notices
        .send(notice)
        .await
        .map_err(|_| AppError::Internal("Selection pipeline stopped".to_string()))?;
    Ok(StatusCode::ACCEPTED)
}

async fn get_decorations(State(state): State<SelectionState>) -> Json<RenderedDecorations> {
    Json(state.store.snapshot())
}
