//! Pre-commit hook installation.

use crate::error::{Error, Result};
use git2::{ErrorCode, Repository};
use std::fs;
use std::path::{Path, PathBuf};

/// Hook file name inside the hooks directory.
pub const HOOK_NAME: &str = "pre-commit";

/// Resolve the directory git runs hooks from.
///
/// Honours `core.hooksPath` (relative values are taken from the work tree),
/// falling back to `<git dir>/hooks`.
///
/// # Errors
///
/// Returns an error if the repository config cannot be read.
pub fn hooks_dir(repo: &Repository) -> Result<PathBuf> {
    let configured = match repo.config()?.get_path("core.hooksPath") {
        Ok(path) => Some(path),
        Err(e) if e.code() == ErrorCode::NotFound => None,
        Err(e) => return Err(e.into()),
    };

    Ok(match configured {
        Some(path) if path.is_relative() => repo
            .workdir()
            .map_or_else(|| repo.path().join(&path), |w| w.join(&path)),
        Some(path) => path,
        None => repo.path().join("hooks"),
    })
}

/// Render the hook script that runs `exe`.
#[must_use]
pub fn hook_script(exe: &Path) -> String {
    format!(
        "#!/bin/sh\n# Installed by fmtgate\nexec {} run\n",
        shell_quote(&exe.to_string_lossy())
    )
}

/// Quote `value` as a single POSIX shell word.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Install a pre-commit hook that runs `exe`.
///
/// Returns the path of the written hook.
///
/// # Errors
///
/// Returns [`Error::HookExists`] if a hook is already present and `force`
/// is not set, or an I/O error if the script cannot be written.
pub fn install_hook(repo: &Repository, exe: &Path, force: bool) -> Result<PathBuf> {
    let dir = hooks_dir(repo)?;
    let path = dir.join(HOOK_NAME);

    if path.exists() && !force {
        return Err(Error::HookExists(path));
    }

    fs::create_dir_all(&dir)?;
    fs::write(&path, hook_script(exe))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms)?;
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn installs_into_git_dir() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        let path = install_hook(&repo, Path::new("/usr/local/bin/fmtgate"), false).unwrap();
        assert_eq!(path, repo.path().join("hooks").join(HOOK_NAME));

        let script = fs::read_to_string(&path).unwrap();
        assert!(script.starts_with("#!/bin/sh\n"));
        assert!(script.contains("exec '/usr/local/bin/fmtgate' run"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o755);
        }
    }

    #[test]
    fn script_quotes_shell_metacharacters() {
        let script = hook_script(Path::new("/opt/it's $HOME/`x`/\"fmt\"gate"));
        assert!(script.ends_with("exec '/opt/it'\\''s $HOME/`x`/\"fmt\"gate' run\n"));
    }

    #[cfg(unix)]
    #[test]
    fn quoted_script_runs_the_exact_path() {
        let dir = TempDir::new().unwrap();
        let bin_dir = dir.path().join("we'ird $dir");
        fs::create_dir_all(&bin_dir).unwrap();
        // The hook ends up running `sh run`, which executes ./run
        let exe = bin_dir.join("fake-fmtgate");
        std::os::unix::fs::symlink("/bin/sh", &exe).unwrap();
        fs::write(dir.path().join("run"), "printf ok > ran\n").unwrap();

        let hook = dir.path().join("pre-commit");
        fs::write(&hook, hook_script(&exe)).unwrap();
        let status = std::process::Command::new("sh")
            .arg(&hook)
            .current_dir(dir.path())
            .status()
            .unwrap();

        assert!(status.success());
        assert_eq!(fs::read_to_string(dir.path().join("ran")).unwrap(), "ok");
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let hook = repo.path().join("hooks").join(HOOK_NAME);
        fs::create_dir_all(hook.parent().unwrap()).unwrap();
        fs::write(&hook, "#!/bin/sh\nexit 0\n").unwrap();

        let err = install_hook(&repo, Path::new("fmtgate"), false).unwrap_err();
        assert!(matches!(err, Error::HookExists(_)));
        assert_eq!(fs::read_to_string(&hook).unwrap(), "#!/bin/sh\nexit 0\n");

        install_hook(&repo, Path::new("fmtgate"), true).unwrap();
        assert!(fs::read_to_string(&hook).unwrap().contains("fmtgate"));
    }

    #[test]
    fn honours_relative_hooks_path() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        repo.config()
            .unwrap()
            .set_str("core.hooksPath", ".githooks")
            .unwrap();

        let path = install_hook(&repo, Path::new("fmtgate"), false).unwrap();
        assert_eq!(
            path,
            repo.workdir().unwrap().join(".githooks").join(HOOK_NAME)
        );
        assert!(path.exists());
    }
}
