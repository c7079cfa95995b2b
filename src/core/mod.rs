//! Core hook logic.

pub mod runner;

pub use runner::{Outcome, run_files, run_hook, run_staged};
