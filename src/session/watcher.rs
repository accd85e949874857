//! Selection watching.
//!
//! Collapses the viewer's stream of raw selection notices into attribution
//! triggers. Pure state machine: no fetching, no rendering, no I/O.

use crate::models::SelectionNotice;

/// An attribution trigger: the document and the selection's start line.
/// `line: None` means the selection is empty and any existing decoration
/// should be cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEvent {
    pub uri: String,
    pub line: Option<u32>,
}

/// Emits one event per distinct (document, start-line) pair.
///
/// Only the first selection range is significant. Switching documents emits
/// even when the line number happens to match the previous document's.
#[derive(Debug, Default)]
pub struct SelectionWatcher {
    last: Option<(String, Option<u32>)>,
}

impl SelectionWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one notice into the watcher state, returning an event when the
    /// effective selection changed.
    pub fn observe(&mut self, notice: &SelectionNotice) -> Option<SelectionEvent> {
        let line = notice.selections.first().map(|range| range.start_line);

        if let Some((last_uri, last_line)) = &self.last {
            if *last_uri == notice.uri && *last_line == line {
                return None;
            }
        }

        self.last = Some((notice.uri.clone(), line));
        Some(SelectionEvent {
            uri: notice.uri.clone(),
            line,
        })
    }
}
