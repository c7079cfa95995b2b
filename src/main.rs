//! fmtgate CLI - formatting gate for git commits.

use clap::{Parser, Subcommand};
use fmtgate::cli;
use std::process::ExitCode;

/// Get the version string.
///
/// - Release builds (on a git tag): "0.1.0"
/// - Development builds: "0.1.0-dev (abc1234)"
fn version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("FMTGATE_GIT_HASH");
    const IS_RELEASE: &str = env!("FMTGATE_IS_RELEASE");

    static VERSION_STRING: std::sync::OnceLock<String> = std::sync::OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" {
            VERSION.to_string()
        } else {
            format!("{VERSION}-dev ({GIT_HASH})")
        }
    })
}

/// Exit status for errors, distinct from "commit blocked".
const EXIT_ERROR: u8 = 2;

#[derive(Parser)]
#[command(name = "fmtgate")]
#[command(author, version = version(), about = "Formatting gate for git commits", long_about = None)]
struct Cli {
    /// Defaults to `run` when omitted, which is how git invokes the hook.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// [Hook] Check staged files; reformat and block the commit on failure.
    Run,

    /// [User] Report unformatted staged files without rewriting them.
    Check {
        /// Print the result as JSON on stdout.
        #[arg(long)]
        json: bool,
    },

    /// [User] Install the pre-commit hook into the current repository.
    Install {
        /// Replace an existing pre-commit hook.
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => cli::run::run(),
        Commands::Check { json } => cli::check::run(json),
        Commands::Install { force } => cli::install::run(force),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("fmtgate: error: {e}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
