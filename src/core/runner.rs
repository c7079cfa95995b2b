//! Hook runner: check staged files, reformat and block on failure.

use crate::config::{Config, HookMode};
use crate::error::Result;
use crate::formatter::Formatter;
use crate::git::{PathFilter, staged_files};
use git2::Repository;
use serde::Serialize;
use std::path::PathBuf;

/// Result of one hook invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The hook is turned off in config.
    Disabled,

    /// No staged file matched the filter.
    NothingStaged,

    /// Every checked file already conforms.
    Clean { checked: Vec<PathBuf> },

    /// These files were rewritten in place; the commit must be retried.
    Reformatted { files: Vec<PathBuf> },

    /// These files do not conform and were left untouched (check mode).
    Unformatted { files: Vec<PathBuf> },
}

impl Outcome {
    /// Whether the commit must be aborted.
    #[must_use]
    pub fn blocks_commit(&self) -> bool {
        matches!(self, Self::Reformatted { .. } | Self::Unformatted { .. })
    }

    /// The status line to show the user, if any.
    ///
    /// Passing outcomes are silent.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Reformatted { files } => Some(format!(
                "fmtgate: reformatted {}; review and re-stage them, then commit again",
                join_paths(files)
            )),
            Self::Unformatted { files } => Some(format!(
                "fmtgate: not formatted: {}",
                join_paths(files)
            )),
            Self::Disabled | Self::NothingStaged | Self::Clean { .. } => None,
        }
    }
}

fn join_paths(files: &[PathBuf]) -> String {
    files
        .iter()
        .map(|f| f.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Run the hook over the files staged in `repo`.
///
/// # Errors
///
/// Returns an error if the index cannot be read, the filter is invalid, or
/// the formatter cannot be run.
pub fn run_hook(repo: &Repository, config: &Config, formatter: &dyn Formatter) -> Result<Outcome> {
    run_staged(repo, config, formatter, config.hook.mode)
}

/// Like [`run_hook`], with the mode given explicitly instead of from config.
///
/// # Errors
///
/// See [`run_hook`].
pub fn run_staged(
    repo: &Repository,
    config: &Config,
    formatter: &dyn Formatter,
    mode: HookMode,
) -> Result<Outcome> {
    if mode == HookMode::Off {
        return Ok(Outcome::Disabled);
    }

    let filter = PathFilter::new(&config.filter)?;
    let files = staged_files(repo, &filter)?;
    run_files(&files, formatter, mode == HookMode::Fix)
}

/// Check `files` and, when `rewrite` is set, reformat the ones that fail.
///
/// # Errors
///
/// Returns an error if the formatter cannot be run or fails.
pub fn run_files(files: &[PathBuf], formatter: &dyn Formatter, rewrite: bool) -> Result<Outcome> {
    if files.is_empty() {
        return Ok(Outcome::NothingStaged);
    }

    // Only ever touch files we were asked about
    let unformatted: Vec<PathBuf> = formatter
        .check(files)?
        .into_iter()
        .filter(|f| files.contains(f))
        .collect();

    if unformatted.is_empty() {
        return Ok(Outcome::Clean {
            checked: files.to_vec(),
        });
    }

    if !rewrite {
        return Ok(Outcome::Unformatted { files: unformatted });
    }

    formatter.format(&unformatted)?;
    Ok(Outcome::Reformatted { files: unformatted })
}
