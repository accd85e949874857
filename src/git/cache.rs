//! Blame cache for whole-file hunk queries.
//!
//! A whole-file blame walks history for every line, so results are cached
//! per path and reused until HEAD moves:
//! - Entries are built lazily on first request for a path
//! - `is_valid` compares HEAD against the OID recorded at build time; the
//!   owner (`GitRepository::with_cache`) rebuilds on mismatch
//!
//! Scoped single-line blames bypass this cache entirely — they are already
//! bounded and always reflect the current HEAD.

use git2::{Oid, Repository};
use std::collections::HashMap;
use std::time::Instant;

use crate::error::Result;
use crate::git::blame::blame_file_range;
use crate::models::Hunk;

pub struct BlameCache {
    /// path -> whole-file hunks (lazily populated)
    files: HashMap<String, Vec<Hunk>>,

    /// HEAD commit OID when the cache was built
    head_oid: Oid,
}

impl BlameCache {
    /// Create an empty cache pinned to the current HEAD.
    pub fn new(repo: &Repository) -> Result<Self> {
        let head_oid = repo.head()?.peel_to_commit()?.id();

        Ok(Self {
            files: HashMap::new(),
            head_oid,
        })
    }

    /// Check if the cache still matches the repository HEAD.
    pub fn is_valid(&self, repo: &Repository) -> bool {
        match repo.head().and_then(|h| h.peel_to_commit()) {
            Ok(head_commit) => head_commit.id() == self.head_oid,
            Err(_) => false,
        }
    }

    /// Get the whole-file hunks for a path, blaming it on first request.
    pub fn hunks_for(&mut self, repo: &Repository, path: &str) -> Result<Vec<Hunk>> {
        if !self.files.contains_key(path) {
            tracing::info!("Building blame cache for: {}", path);
            let start = Instant::now();
            let hunks = blame_file_range(repo, path, None)?;
            tracing::info!(
                "Blame cache built: {} hunks in {:?}",
                hunks.len(),
                start.elapsed()
            );
            self.files.insert(path.to_string(), hunks);
        }

        Ok(self.files.get(path).expect("entry just inserted").clone())
    }
}
