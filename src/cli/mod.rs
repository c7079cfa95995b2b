//! CLI command implementations.

pub mod check;
pub mod install;
pub mod run;

use crate::config::{Config, load_config};
use crate::error::Result;
use crate::formatter::CommandFormatter;
use crate::git::{open_repo, workdir};
use git2::Repository;
use std::env;

/// Everything a hook command needs: the repository, its config, and the
/// formatter configured for it.
pub struct Session {
    pub repo: Repository,
    pub config: Config,
    pub formatter: CommandFormatter,
}

impl Session {
    /// Open the repository around the current directory and load its config.
    ///
    /// # Errors
    ///
    /// Returns an error if no repository is found, it is bare, or the config
    /// cannot be loaded.
    pub fn open() -> Result<Self> {
        let repo = open_repo(&env::current_dir()?)?;
        let root = workdir(&repo)?.to_path_buf();
        let config = load_config(Some(&root))?;
        let formatter = CommandFormatter::new(config.formatter.clone(), root);
        Ok(Self {
            repo,
            config,
            formatter,
        })
    }
}
