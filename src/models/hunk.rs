//! Blame hunk data model.
//!
//! A hunk is a contiguous, inclusive range of lines last touched by a single
//! change, attributed to one author. Line numbers are 0-based throughout the
//! crate; the git boundary converts from git's 1-based counting.

use serde::{Deserialize, Serialize};

/// The person recorded on a historical change. An immutable snapshot tied to
/// the change, not a live user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub display_name: String,
    pub email: String,
}

/// The author of a blame hunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub person: Person,
}

/// A contiguous line range attributed to one author.
///
/// Hunks for a document are non-overlapping but not guaranteed sorted or
/// gap-free; lines outside every hunk have no attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunk {
    /// First line of the range (0-based, inclusive)
    pub start_line: u32,
    /// Last line of the range (0-based, inclusive)
    pub end_line: u32,
    /// Who last modified these lines
    pub author: Author,
    /// OID of the commit that last modified these lines
    pub commit_oid: String,
    /// Unix timestamp of that change
    pub timestamp: i64,
}

impl Hunk {
    /// Whether `line` falls inside this hunk's inclusive range.
    pub fn contains(&self, line: u32) -> bool {
        self.start_line <= line && line <= self.end_line
    }
}
