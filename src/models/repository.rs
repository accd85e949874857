//! Repository info and blame response DTOs.

use serde::Serialize;

use crate::models::Hunk;

/// Summary of the commit at HEAD.
#[derive(Debug, Clone, Serialize)]
pub struct CommitSummary {
    pub oid: String,
    pub message: String,
    pub author: String,
    pub timestamp: i64,
    pub relative_time: String,
}

/// Basic repository identity for the viewer header.
#[derive(Debug, Serialize)]
pub struct RepositoryInfo {
    pub name: String,
    pub path: String,
    pub head_branch: Option<String>,
    pub head_commit: Option<CommitSummary>,
}

/// Response for a blame request on a document.
#[derive(Debug, Serialize)]
pub struct BlameResponse {
    /// Document URI as requested
    pub uri: String,
    /// Repository-relative path the URI resolved to
    pub path: String,
    /// Hunks covering the requested region
    pub hunks: Vec<Hunk>,
}
