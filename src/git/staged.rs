//! Staged file listing.
//!
//! Lists the paths staged in the index the way
//! `git diff --cached --name-only --diff-filter=d` does, then keeps only the
//! ones the configured filter accepts.

use crate::config::FilterConfig;
use crate::error::{Error, Result};
use git2::{Delta, DiffOptions, ErrorCode, FileMode, Repository, Tree};
use glob::Pattern;
use std::path::{Path, PathBuf};

/// Compiled form of [`FilterConfig`].
#[derive(Debug, Clone)]
pub struct PathFilter {
    suffix: String,
    exclude: Vec<Pattern>,
}

impl PathFilter {
    /// Compile a filter from config.
    ///
    /// # Errors
    ///
    /// Returns an error if an exclude pattern is not a valid glob.
    pub fn new(config: &FilterConfig) -> Result<Self> {
        let exclude = config
            .exclude
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| Error::Config(format!("invalid exclude pattern {p:?}: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            suffix: config.suffix.clone(),
            exclude,
        })
    }

    /// Whether a repository-relative path should be checked.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        path.to_string_lossy().ends_with(&self.suffix)
            && !self.exclude.iter().any(|p| p.matches_path(path))
    }
}

/// List staged, non-deleted files accepted by `filter`.
///
/// Paths are relative to the work tree, in index order. When `HEAD` is
/// unborn every staged file counts as added.
///
/// # Errors
///
/// Returns an error if `HEAD` or the index cannot be read.
pub fn staged_files(repo: &Repository, filter: &PathFilter) -> Result<Vec<PathBuf>> {
    let head = head_tree(repo)?;
    let mut opts = DiffOptions::new();
    opts.include_typechange(true);
    let diff = repo.diff_tree_to_index(head.as_ref(), None, Some(&mut opts))?;

    let files = diff
        .deltas()
        .filter(|delta| delta.status() != Delta::Deleted)
        .map(|delta| delta.new_file())
        // Submodule entries are commits, not files
        .filter(|file| file.mode() != FileMode::Commit)
        .filter_map(|file| file.path().map(Path::to_path_buf))
        .filter(|path| filter.matches(path))
        .collect();

    Ok(files)
}

/// Tree of the `HEAD` commit, or `None` before the first commit.
fn head_tree(repo: &Repository) -> Result<Option<Tree<'_>>> {
    match repo.head() {
        Ok(head) => Ok(Some(head.peel_to_tree()?)),
        Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
