//! Blame hunk extraction.
//!
//! Wraps libgit2 blame into the crate's `Hunk` model. Git counts lines from
//! 1; everything above this boundary is 0-based, so the conversion happens
//! here and nowhere else.
//!
//! Two fetch shapes:
//! - scoped to a single line (`line: Some(n)`) — bounded work per selection
//!   change, used by the attribution pipeline
//! - whole file (`line: None`) — served from the per-document cache, used by
//!   the viewer's blame gutter

use git2::{BlameOptions, Repository};
use std::path::Path;

use crate::error::{AppError, Result};
use crate::git::repository::GitRepository;
use crate::models::{Author, Hunk, Person};

impl GitRepository {
    /// Blame hunks for a repository-relative path at HEAD, optionally scoped
    /// to the hunk covering one 0-based line.
    pub fn blame_hunks(&self, path: &str, line: Option<u32>) -> Result<Vec<Hunk>> {
        match line {
            Some(line) => self.with_repo(|repo| blame_file_range(repo, path, Some(line))),
            None => self.with_cache(|cache, repo| cache.hunks_for(repo, path)),
        }
    }

    /// Full text of the blob at HEAD for a repository-relative path.
    pub fn document_text(&self, path: &str) -> Result<String> {
        self.with_repo(|repo| {
            let head = repo.head()?;
            let commit = head.peel_to_commit()?;
            let tree = commit.tree()?;

            let entry = tree
                .get_path(Path::new(path))
                .map_err(|_| AppError::PathNotFound(path.to_string()))?;

            let obj = entry.to_object(repo)?;
            let blob = obj
                .as_blob()
                .ok_or_else(|| AppError::InvalidUri(format!("{} is not a file", path)))?;

            String::from_utf8(blob.content().to_vec())
                .map_err(|_| AppError::Internal("File is not valid UTF-8".to_string()))
        })
    }
}

/// Run libgit2 blame over a file, optionally restricted to a single line.
pub(crate) fn blame_file_range(
    repo: &Repository,
    path: &str,
    line: Option<u32>,
) -> Result<Vec<Hunk>> {
    let mut opts = BlameOptions::new();
    if let Some(line) = line {
        // git counts from 1
        let git_line = line as usize + 1;
        opts.min_line(git_line).max_line(git_line);
    }

    let blame = repo
        .blame_file(Path::new(path), Some(&mut opts))
        .map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                AppError::PathNotFound(path.to_string())
            } else {
                AppError::Git(e)
            }
        })?;

    let mut hunks = Vec::new();
    for hunk in blame.iter() {
        let lines = hunk.lines_in_hunk();
        if lines == 0 {
            continue;
        }
        let start_line = (hunk.final_start_line() - 1) as u32;
        let signature = hunk.final_signature();

        hunks.push(Hunk {
            start_line,
            end_line: start_line + (lines as u32 - 1),
            author: Author {
                person: Person {
                    display_name: signature.name().unwrap_or("Unknown").to_string(),
                    email: signature.email().unwrap_or("").to_string(),
                },
            },
            commit_oid: hunk.final_commit_id().to_string(),
            timestamp: signature.when().seconds(),
        });
    }

    Ok(hunks)
}
