//! fmtgate - formatting gate for git commits.
//!
//! Runs as a pre-commit hook: checks the staged files with a formatter,
//! and if any fail, reformats them in place and aborts the commit so the
//! fixed files can be re-staged.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod formatter;
pub mod git;

pub use config::Config;
pub use error::{Error, Result};
