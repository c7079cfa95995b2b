//! `fmtgate install` command implementation.

use crate::error::Result;
use crate::git::{install_hook, open_repo};
use std::env;
use std::process::ExitCode;

/// Install the pre-commit hook into the current repository.
///
/// # Errors
///
/// Returns an error if no repository is found or a hook already exists and
/// `force` is not set.
pub fn run(force: bool) -> Result<ExitCode> {
    let repo = open_repo(&env::current_dir()?)?;
    let exe = env::current_exe()?;
    let path = install_hook(&repo, &exe, force)?;

    println!("Installed pre-commit hook at {}", path.display());
    Ok(ExitCode::SUCCESS)
}
