//! Blame data source port.
//!
//! `BlameSource` is the narrow contract between the attribution engine and
//! whatever actually produces blame data. The engine never sees git types;
//! a fetch error is an `Err` the caller degrades to "no attribution".

use async_trait::async_trait;
use std::sync::Arc;

use crate::attribution::uri::resolve_document_path;
use crate::error::{AppError, Result};
use crate::git::SharedRepo;
use crate::models::Hunk;

#[async_trait]
pub trait BlameSource: Send + Sync {
    /// Hunks covering the document, scoped to the hunk containing `line`
    /// when given.
    async fn query_blame_hunks(&self, uri: &str, line: Option<u32>) -> Result<Vec<Hunk>>;

    /// Current text of the document, for quoting lines in the contact body.
    async fn document_text(&self, uri: &str) -> Result<String>;
}

/// `BlameSource` over a local repository via libgit2. Blame is blocking
/// work, so it runs on the tokio blocking pool.
pub struct GitBlameSource {
    repo: SharedRepo,
}

impl GitBlameSource {
    pub fn new(repo: SharedRepo) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl BlameSource for GitBlameSource {
    async fn query_blame_hunks(&self, uri: &str, line: Option<u32>) -> Result<Vec<Hunk>> {
        let repo = Arc::clone(&self.repo);
        let path = resolve_document_path(uri);
        tokio::task::spawn_blocking(move || repo.blame_hunks(&path, line))
            .await
            .map_err(|e| AppError::Internal(format!("Blame task failed: {}", e)))?
    }

    async fn document_text(&self, uri: &str) -> Result<String> {
        let repo = Arc::clone(&self.repo);
        let path = resolve_document_path(uri);
        tokio::task::spawn_blocking(move || repo.document_text(&path))
            .await
            .map_err(|e| AppError::Internal(format!("Read task failed: {}", e)))?
    }
}
