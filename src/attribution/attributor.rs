//! Line-to-author resolution.

use std::sync::Arc;

use crate::attribution::source::BlameSource;
use crate::models::Hunk;

/// Resolves a (document, line) pair to the blame hunk covering the line.
///
/// The returned hunk carries the author plus the commit metadata used for
/// the decoration's hover detail. Fetch failures are logged and degrade to
/// `None`; they must never crash the selection pipeline.
pub struct BlameAttributor {
    source: Arc<dyn BlameSource>,
}

impl BlameAttributor {
    pub fn new(source: Arc<dyn BlameSource>) -> Self {
        Self { source }
    }

    /// The hunk whose inclusive range contains `line`, or `None` when no
    /// hunk covers it or the fetch failed.
    pub async fn attribute(&self, uri: &str, line: u32) -> Option<Hunk> {
        match self.source.query_blame_hunks(uri, Some(line)).await {
            Ok(hunks) => hunk_for_line(line, hunks),
            Err(e) => {
                tracing::warn!(uri, line, error = %e, "blame fetch failed; no attribution");
                None
            }
        }
    }
}

/// First hunk whose inclusive range contains `line`.
pub fn hunk_for_line(line: u32, hunks: Vec<Hunk>) -> Option<Hunk> {
    hunks.into_iter().find(|hunk| hunk.contains(line))
}
