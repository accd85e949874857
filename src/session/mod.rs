//! Selection-driven pipeline.
//!
//! Turns raw selection notices from the viewer into rendered contact
//! decorations:
//! - `watcher`: dedups notices into (document, line) events
//! - `pipeline`: generation-tagged async attribution, last write wins
//! - `store`: the decoration sink the HTTP surface serves back out

pub mod pipeline;
pub mod store;
pub mod watcher;

pub use pipeline::{AttributionPipeline, DecorationHost};
pub use store::DecorationStore;
pub use watcher::{SelectionEvent, SelectionWatcher};
