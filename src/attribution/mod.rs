//! Line-to-author attribution engine.
//!
//! Resolves a (document, line) pair to the author who last modified the line
//! and derives the contact payload shown in the viewer:
//! - `source`: the `BlameSource` collaborator port and its git2 binding
//! - `attributor`: first-matching-hunk resolution with failure degradation
//! - `contact`: label and `mailto:` link construction
//! - `uri`: document URI → repository-relative path

pub mod attributor;
pub mod contact;
pub mod source;
pub mod uri;

pub use attributor::BlameAttributor;
pub use contact::build_contact_payload;
pub use source::{BlameSource, GitBlameSource};
pub use uri::resolve_document_path;
