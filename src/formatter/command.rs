//! Subprocess formatter backend.

use crate::config::FormatterConfig;
use crate::error::{Error, Result};
use crate::formatter::traits::Formatter;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::thread;

/// Placeholder in formatter arguments replaced by the file's relative path.
pub const PATH_PLACEHOLDER: &str = "{path}";

/// Formatter that pipes each file through an external program such as `rustfmt`.
///
/// Every file is formatted on its own: its contents go to the program's
/// stdin and the canonical text is read back from stdout. The program never
/// sees a path on disk, so it cannot follow `mod` declarations into other
/// files or rewrite anything itself. The command line is
/// `<program> [--edition E] <args>`, run from the file's directory so the
/// nearest formatter config file applies.
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    config: FormatterConfig,
    workdir: PathBuf,
}

impl CommandFormatter {
    /// Create a formatter for files relative to `workdir`.
    #[must_use]
    pub fn new(config: FormatterConfig, workdir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            workdir: workdir.into(),
        }
    }

    /// Build the command line for one file.
    fn command(&self, file: &Path) -> Command {
        let mut cmd = Command::new(&self.config.program);
        let dir = self
            .workdir
            .join(file)
            .parent()
            .map_or_else(|| self.workdir.clone(), Path::to_path_buf);
        cmd.current_dir(dir);
        if !self.config.edition.is_empty() {
            cmd.arg("--edition").arg(&self.config.edition);
        }
        let rel = file.to_string_lossy();
        cmd.args(
            self.config
                .args
                .iter()
                .map(|arg| arg.replace(PATH_PLACEHOLDER, &rel)),
        );
        cmd
    }

    /// Feed `input` to the program and collect its output.
    fn pipe(&self, mut cmd: Command, input: &[u8]) -> Result<Output> {
        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == io::ErrorKind::NotFound {
                    Error::FormatterNotFound {
                        program: self.config.program.clone(),
                    }
                } else {
                    Error::Io(e)
                }
            })?;

        let stdin = child.stdin.take();
        // Write on another thread so a chatty program cannot fill stdout and stall us
        let output = thread::scope(|s| {
            let writer = s.spawn(move || -> io::Result<()> {
                if let Some(mut stdin) = stdin {
                    match stdin.write_all(input) {
                        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => return Err(e),
                        _ => {}
                    }
                }
                Ok(())
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
            written.and(output)
        })?;

        Ok(output)
    }

    /// Return the file's current contents and its canonical form.
    fn render(&self, file: &Path) -> Result<(Vec<u8>, Vec<u8>)> {
        let original = fs::read(self.workdir.join(file))?;
        let output = self.pipe(self.command(file), &original)?;
        if !output.status.success() {
            return Err(Error::FormatterFailed {
                program: self.config.program.clone(),
                code: output.status.code(),
                stderr: format!(
                    "{}: {}",
                    file.display(),
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }
        Ok((original, output.stdout))
    }
}

impl Formatter for CommandFormatter {
    fn check(&self, files: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut unformatted = Vec::new();
        for file in files {
            let (original, formatted) = self.render(file)?;
            if original != formatted {
                unformatted.push(file.clone());
            }
        }
        Ok(unformatted)
    }

    fn format(&self, files: &[PathBuf]) -> Result<()> {
        for file in files {
            let (original, formatted) = self.render(file)?;
            if original != formatted {
                fs::write(self.workdir.join(file), formatted)?;
            }
        }
        Ok(())
    }
}
