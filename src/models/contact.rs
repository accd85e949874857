//! Contact affordance and selection event DTOs.
//!
//! `Decoration` follows the host contract: an annotation anchored at a line,
//! with attached content rendered after the line text. `SelectionNotice` is
//! what the viewer posts on every cursor change.

use serde::{Deserialize, Serialize};

/// The derived contact action for an attributed line. Ephemeral: built fresh
/// on every selection change, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactPayload {
    /// Short display string identifying the author
    pub label_text: String,
    /// `mailto:` URI with percent-encoded subject and body
    pub mail_link: String,
}

/// Anchor position of a decoration inside the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecorationRange {
    /// Line the decoration is anchored to (0-based)
    pub line: u32,
    /// Column within the line (always 0 for line-level annotations)
    pub character: u32,
}

/// Content attached after the decorated line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecorationAttachment {
    /// CSS color of the rendered text
    pub color: String,
    /// Text rendered inline after the line
    pub content_text: String,
    /// Link opened when the attachment is clicked
    pub link_url: String,
    /// Extra detail shown on hover
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_message: Option<String>,
}

/// A host-rendered annotation anchored to a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoration {
    pub range: DecorationRange,
    pub after: DecorationAttachment,
}

/// The decorations most recently rendered for the active editor. An empty
/// list means "cleared".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedDecorations {
    /// Document the decorations belong to
    pub uri: String,
    pub decorations: Vec<Decoration>,
}

/// One selection range as reported by the viewer. Only the start line of the
/// first range is significant for attribution.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SelectionRange {
    pub start_line: u32,
    pub end_line: u32,
}

/// A raw selection-change notice from the viewer. An empty `selections` list
/// means the document has no cursor (suppresses any existing decoration).
#[derive(Debug, Clone, Deserialize)]
pub struct SelectionNotice {
    pub uri: String,
    #[serde(default)]
    pub selections: Vec<SelectionRange>,
}
