//! Blame endpoint.
//!
//! GET /api/v1/repository/blame?uri=<uri>&line=<optional>
//!
//! Returns blame hunks for a document at HEAD: with `line`, only the hunk
//! covering that 0-based line; without it, the whole file served from the
//! per-document cache.
//!
//! Used by: the viewer's blame gutter, and for debugging the attribution
//! pipeline's view of a document.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;

use crate::attribution::resolve_document_path;
use crate::error::Result;
use crate::git::SharedRepo;
use crate::models::BlameResponse;

pub fn routes(repo: SharedRepo) -> Router {
    Router::new()
        .route("/api/v1/repository/blame", get(get_blame))
        .with_state(repo)
}

#[derive(Debug, Deserialize)]
struct BlameQuery {
    uri: String,
    line: Option<u32>,
}

async fn get_blame(
    State(repo): State<SharedRepo>,
    Query(query): Query<BlameQuery>,
) -> Result<Json<BlameResponse>> {
    let path = resolve_document_path(&query.uri);
    let hunks = repo.blame_hunks(&path, query.line)?;
    Ok(Json(BlameResponse {
        uri: query.uri,
        path,
        hunks,
    }))
}
