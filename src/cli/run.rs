//! `fmtgate run` command implementation.
//!
//! This is what the installed pre-commit hook executes.

use crate::cli::Session;
use crate::core::run_hook;
use crate::error::Result;
use std::process::ExitCode;

/// Run the pre-commit hook.
///
/// Exits non-zero when files were reformatted so git aborts the commit.
///
/// # Errors
///
/// Returns an error if the repository, config, or formatter fails.
pub fn run() -> Result<ExitCode> {
    let session = Session::open()?;
    let outcome = run_hook(&session.repo, &session.config, &session.formatter)?;

    if let Some(message) = outcome.message() {
        eprintln!("{message}");
    }

    Ok(if outcome.blocks_commit() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
