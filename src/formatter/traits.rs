//! Formatter trait definition.

use crate::error::Result;
use std::path::PathBuf;

/// A code formatter with a check-only mode and a mutating mode.
///
/// Paths are relative to the repository work tree. Each file is evaluated on
/// its own; implementations must not reformat files that were not passed in.
pub trait Formatter: Send + Sync {
    /// Check `files` without modifying them.
    ///
    /// Returns the subset of `files` that is not in canonical format, in the
    /// order given. An empty result means every file conforms.
    ///
    /// # Errors
    ///
    /// Returns an error if the formatter cannot be run or fails for a reason
    /// other than non-conforming input.
    fn check(&self, files: &[PathBuf]) -> Result<Vec<PathBuf>>;

    /// Rewrite `files` in place in canonical format.
    ///
    /// # Errors
    ///
    /// Returns an error if the formatter cannot be run or fails.
    fn format(&self, files: &[PathBuf]) -> Result<()>;
}
