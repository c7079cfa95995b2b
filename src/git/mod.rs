//! Repository access: staged file listing and hook installation.

pub mod install;
pub mod staged;

pub use install::{HOOK_NAME, hooks_dir, install_hook};
pub use staged::{PathFilter, staged_files};

use crate::error::{Error, Result};
use git2::{Index, Repository};
use std::env;
use std::ffi::OsString;
use std::path::Path;

/// Open the repository containing `path`, honouring git's hook environment.
///
/// # Errors
///
/// Returns an error if no repository is found or the index cannot be opened.
pub fn open_repo(path: &Path) -> Result<Repository> {
    open_repo_with(path, |key| env::var_os(key))
}

/// Open the repository containing `path`, reading git variables through `lookup`.
///
/// `GIT_DIR` (with optional `GIT_WORK_TREE`) selects the repository instead
/// of discovery from `path`. `GIT_INDEX_FILE` replaces the default index;
/// `git commit -a` and `git commit <paths>` stage into such a temporary
/// index, so the hook must read it to check what is being committed.
/// Relative values are resolved against `path`.
///
/// # Errors
///
/// Returns an error if no repository is found or the index cannot be opened.
pub fn open_repo_with<F>(path: &Path, lookup: F) -> Result<Repository>
where
    F: Fn(&str) -> Option<OsString>,
{
    let repo = match lookup("GIT_DIR") {
        Some(git_dir) => {
            let repo = Repository::open(path.join(git_dir))?;
            if let Some(work_tree) = lookup("GIT_WORK_TREE") {
                repo.set_workdir(&path.join(work_tree), false)?;
            }
            repo
        }
        None => Repository::discover(path)?,
    };

    if let Some(index_file) = lookup("GIT_INDEX_FILE") {
        let mut index = Index::open(&path.join(index_file))?;
        repo.set_index(&mut index)?;
    }

    Ok(repo)
}

/// Work tree root of `repo`.
///
/// # Errors
///
/// Returns [`Error::NoWorkTree`] for bare repositories.
pub fn workdir(repo: &Repository) -> Result<&Path> {
    repo.workdir().ok_or(Error::NoWorkTree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterConfig;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn stage(repo: &Repository, rel: &str) {
        fs::write(repo.workdir().unwrap().join(rel), "fn f() {}\n").unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(rel)).unwrap();
        index.write().unwrap();
    }

    fn rust_files(repo: &Repository) -> Vec<PathBuf> {
        let filter = PathFilter::new(&FilterConfig::default()).unwrap();
        staged_files(repo, &filter).unwrap()
    }

    #[test]
    fn alternate_index_file_is_read() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        stage(&repo, "a.rs");
        fs::copy(repo.path().join("index"), dir.path().join("commit-index")).unwrap();
        stage(&repo, "b.rs");

        let default = open_repo_with(dir.path(), |_| None).unwrap();
        assert_eq!(
            rust_files(&default),
            vec![PathBuf::from("a.rs"), PathBuf::from("b.rs")]
        );

        let alternate = open_repo_with(dir.path(), |key| {
            (key == "GIT_INDEX_FILE").then(|| OsString::from("commit-index"))
        })
        .unwrap();
        assert_eq!(rust_files(&alternate), vec![PathBuf::from("a.rs")]);
    }

    #[test]
    fn git_dir_selects_repository() {
        let outside = TempDir::new().unwrap();
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        stage(&repo, "a.rs");
        let git_dir = repo.path().as_os_str().to_os_string();
        let work_tree = dir.path().as_os_str().to_os_string();

        let opened = open_repo_with(outside.path(), |key| match key {
            "GIT_DIR" => Some(git_dir.clone()),
            "GIT_WORK_TREE" => Some(work_tree.clone()),
            _ => None,
        })
        .unwrap();

        assert_eq!(
            workdir(&opened).unwrap().canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
        assert_eq!(rust_files(&opened), vec![PathBuf::from("a.rs")]);
    }

    #[test]
    fn discovery_without_git_dir_fails_outside_repository() {
        let outside = TempDir::new().unwrap();
        let err = open_repo_with(outside.path(), |_| None).err().unwrap();
        assert!(matches!(err, Error::Git(_)));
    }

    #[test]
    fn bare_repository_has_no_work_tree() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init_bare(dir.path()).unwrap();
        assert!(matches!(workdir(&repo), Err(Error::NoWorkTree)));
    }

    #[test]
    fn workdir_of_normal_repository() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let root = workdir(&repo).unwrap();
        assert_eq!(
            root.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }
}
