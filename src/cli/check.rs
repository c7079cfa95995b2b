//! `fmtgate check` command implementation.

use crate::cli::Session;
use crate::config::HookMode;
use crate::core::run_staged;
use crate::error::Result;
use std::io::{self, Write};
use std::process::ExitCode;

/// Report staged files that are not formatted, without rewriting them.
///
/// With `json`, the outcome is written to stdout as a JSON object.
///
/// # Errors
///
/// Returns an error if the repository, config, or formatter fails, or if
/// writing to stdout fails.
pub fn run(json: bool) -> Result<ExitCode> {
    let session = Session::open()?;
    let outcome = run_staged(
        &session.repo,
        &session.config,
        &session.formatter,
        HookMode::Check,
    )?;

    if json {
        let mut stdout = io::stdout();
        serde_json::to_writer_pretty(&mut stdout, &outcome)?;
        stdout.write_all(b"\n")?;
    } else if let Some(message) = outcome.message() {
        eprintln!("{message}");
    }

    Ok(if outcome.blocks_commit() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
