//! Error types for fmtgate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for fmtgate operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running the hook.
///
/// Non-conforming files are not an error: they are reported through
/// [`crate::core::Outcome`].
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem or process I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Repository access error.
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The formatter binary could not be found.
    #[error("formatter `{program}` not found; install it or set FMTGATE_FORMATTER")]
    FormatterNotFound { program: String },

    /// The formatter failed for a reason other than non-conforming input.
    #[error("formatter `{program}` failed (exit code {code:?}): {stderr}")]
    FormatterFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    /// A pre-commit hook is already installed.
    #[error("hook already exists at {}; use --force to replace it", .0.display())]
    HookExists(PathBuf),

    /// The repository has no working tree.
    #[error("repository has no working tree")]
    NoWorkTree,
}
