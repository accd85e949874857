//! Data transfer objects (DTOs) for API responses and pipeline payloads.
//!
//! These structs are serialized to JSON for the viewer frontend.
//! - `hunk`: Hunk, Author, Person — per-line attribution data
//! - `contact`: ContactPayload, Decoration, SelectionNotice — the contact
//!   affordance and the selection events that drive it
//! - `repository`: RepositoryInfo, BlameResponse

pub mod contact;
pub mod hunk;
pub mod repository;

pub use contact::*;
pub use hunk::*;
pub use repository::*;
