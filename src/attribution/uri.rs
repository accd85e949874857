//! Document URI resolution.
//!
//! Viewers address documents with opaque URIs; the email subject and body
//! want a human-readable repository-relative path. Total function: anything
//! unrecognized resolves to the raw input, so a resolver problem can never
//! block attribution.

/// Resolve a document URI to a repository-relative path.
///
/// Supported shapes:
/// - `git://host/repo?rev#src/lib.rs` → `src/lib.rs` (fragment carries the path)
/// - `file:///checkout/src/lib.rs` → `/checkout/src/lib.rs`
/// - anything else → the input unchanged
pub fn resolve_document_path(uri: &str) -> String {
    if let Some((_, fragment)) = uri.split_once('#') {
        if !fragment.is_empty() {
            return fragment.to_string();
        }
    }

    if let Some(path) = uri.strip_prefix("file://") {
        if !path.is_empty() {
            return path.to_string();
        }
    }

    uri.to_string()
}
