//! Configuration loading and management.
//!
//! Configuration is loaded with the following precedence:
//! 1. Environment variables (`FMTGATE_*`)
//! 2. Config file (`FMTGATE_CONFIG`, `<repo>/.fmtgate.toml`, or `~/.fmtgate/config.toml`)
//! 3. Defaults

use crate::error::{Error, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-repository config file, looked up in the work tree root.
pub const REPO_CONFIG_FILE: &str = ".fmtgate.toml";

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Hook behaviour.
    pub hook: HookConfig,

    /// Which staged files are checked.
    pub filter: FilterConfig,

    /// Formatter invocation.
    pub formatter: FormatterConfig,
}

/// Hook configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct HookConfig {
    /// What to do with non-conforming files.
    pub mode: HookMode,
}

/// Hook mode.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HookMode {
    /// Reformat non-conforming files and block the commit (default).
    #[default]
    Fix,

    /// Report non-conforming files and block the commit without rewriting.
    Check,

    /// Do nothing.
    Off,
}

impl HookMode {
    /// Parse a mode name, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "fix" => Some(Self::Fix),
            "check" => Some(Self::Check),
            "off" => Some(Self::Off),
            _ => None,
        }
    }
}

/// Staged file filter configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Filename suffix a staged path must end with.
    pub suffix: String,

    /// Glob patterns (relative to the work tree) that are never checked.
    pub exclude: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            suffix: ".rs".to_string(),
            exclude: Vec::new(),
        }
    }
}

/// Formatter configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Program to run (looked up on `PATH`).
    pub program: String,

    /// Language edition passed as `--edition`; empty to omit.
    pub edition: String,

    /// Arguments that make the program read source on stdin and write the
    /// formatted source to stdout. `{path}` expands to the file's path
    /// relative to the work tree.
    pub args: Vec<String>,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            program: "rustfmt".to_string(),
            edition: "2021".to_string(),
            // rustfmt filters stdin to stdout without flags
            args: Vec::new(),
        }
    }
}

/// Get the default fmtgate home directory.
fn default_fmtgate_home() -> PathBuf {
    dirs::home_dir().map_or_else(|| PathBuf::from(".fmtgate"), |h| h.join(".fmtgate"))
}

/// Load configuration with precedence: env vars → file → defaults.
///
/// `workdir` is the repository work tree, used to find `.fmtgate.toml`.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be read or parsed.
pub fn load_config(workdir: Option<&Path>) -> Result<Config> {
    let lookup = |key: &str| env::var(key).ok();
    let mut config = Config::default();

    if let Some(config_path) = find_config_path(workdir, &lookup) {
        let contents = fs::read_to_string(&config_path)?;
        config = parse_config(&contents)
            .map_err(|e| Error::Config(format!("{}: {e}", config_path.display())))?;
    }

    apply_overrides(&mut config, lookup);

    Ok(config)
}

/// Parse a TOML config document.
///
/// # Errors
///
/// Returns an error if the document is not valid config TOML.
pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))
}

/// Find the config file to load, if any.
///
/// `lookup` resolves `FMTGATE_CONFIG` and `FMTGATE_HOME`.
fn find_config_path<F>(workdir: Option<&Path>, lookup: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = lookup("FMTGATE_CONFIG") {
        return Some(PathBuf::from(path));
    }

    if let Some(repo_config) = workdir.map(|dir| dir.join(REPO_CONFIG_FILE)) {
        if repo_config.exists() {
            return Some(repo_config);
        }
    }

    let home = lookup("FMTGATE_HOME").map_or_else(default_fmtgate_home, PathBuf::from);
    let user_config = home.join("config.toml");
    user_config.exists().then_some(user_config)
}

/// Apply variable overrides to config.
///
/// `lookup` resolves a variable name; `load_config` passes the process
/// environment. Unrecognised mode names are ignored with a warning.
pub fn apply_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(mode) = lookup("FMTGATE_MODE") {
        match HookMode::from_name(&mode) {
            Some(mode) => config.hook.mode = mode,
            None => eprintln!("fmtgate: warning: ignoring unknown FMTGATE_MODE: {mode}"),
        }
    }

    if let Some(suffix) = lookup("FMTGATE_SUFFIX") {
        config.filter.suffix = suffix;
    }

    if let Some(program) = lookup("FMTGATE_FORMATTER") {
        if !program.is_empty() {
            config.formatter.program = program;
        }
    }

    if let Some(edition) = lookup("FMTGATE_EDITION") {
        config.formatter.edition = edition;
    }
}
