//! API route handlers - maps HTTP endpoints to the attribution pipeline.
//!
//! Each submodule defines routes for a feature area:
//! - `repository`: Basic repo info (GET /api/v1/repository)
//! - `blame`: Blame hunks for a document, scoped or whole-file
//! - `selection`: Selection notices in, rendered decorations out

pub mod blame;
pub mod repository;
pub mod selection;

use axum::Router;
use std::sync::Arc;

use crate::git::SharedRepo;
use crate::models::SelectionNotice;
use crate::session::DecorationStore;
use tokio::sync::mpsc;

pub fn create_router(
    repo: SharedRepo,
    selections: mpsc::Sender<SelectionNotice>,
    store: Arc<DecorationStore>,
) -> Router {
    Router::new()
        .merge(repository::routes(repo.clone()))
        .merge(blame::routes(repo))
        .merge(selection::routes(selections, store))
}
