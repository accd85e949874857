//! Decoration store.
//!
//! The service-side `DecorationHost`: holds the decorations most recently
//! rendered by the pipeline so the viewer can fetch them. Owned by the
//! server bootstrap — created once at startup, dropped on shutdown.

use std::sync::RwLock;

use crate::models::{Decoration, RenderedDecorations};
use crate::session::pipeline::DecorationHost;

#[derive(Default)]
pub struct DecorationStore {
    current: RwLock<RenderedDecorations>,
}

impl DecorationStore {
    /// The decorations to draw right now. Empty when nothing is attributed.
    pub fn snapshot(&self) -> RenderedDecorations {
        self.current
            .read()
            .map(|current| current.clone())
            .unwrap_or_default()
    }
}

impl DecorationHost for DecorationStore {
    fn apply(&self, uri: &str, decorations: Vec<Decoration>) {
        if let Ok(mut current) = self.current.write() {
            *current = RenderedDecorations {
                uri: uri.to_string(),
                decorations,
            };
        }
    }
}
