//! Blame-driven contact affordances for a source-code viewer.
//!
//! When a cursor lands on a line, the pipeline resolves who last modified
//! that line from version-control blame data and renders an inline
//! "contact the author" decoration with a pre-filled email link.
//!
//! Layers:
//! - `attribution`: the core engine — hunk resolution and contact payloads
//! - `session`: selection events in, generation-tagged decorations out
//! - `git`: libgit2-backed blame source with per-document caching
//! - `routes` / `models` / `error`: the HTTP surface for the viewer

pub mod attribution;
pub mod error;
pub mod git;
pub mod models;
pub mod routes;
pub mod session;
