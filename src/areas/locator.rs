use crate::areas::repository::Repository;
use crate::errors::{StoreError, StoreResult};
use std::path::{Path, PathBuf};
use tracing::debug;

const GIT_DIR: &str = ".git";
const OBJECTS_DIR: &str = "objects";
const HEAD_FILE: &str = "HEAD";

/// Validates a directory chosen by the user as a repository root
///
/// Only the shape of the directory is checked; individual objects are not
/// touched until someone reads them.
pub struct RepositoryLocator;

impl RepositoryLocator {
    /// Resolve `path` to a repository handle
    ///
    /// `path` is either a working tree containing `.git`, or a git directory
    /// itself (a bare repository, or `.git` picked directly).
    pub fn locate(path: impl AsRef<Path>) -> StoreResult<Repository> {
        let path = std::path::absolute(path.as_ref())?;

        if !path.is_dir() {
            return Err(StoreError::DirectoryDoesNotExist(path));
        }

        let git_dir = Self::git_dir(&path)?;
        debug!(git_dir = %git_dir.display(), "located repository");

        Ok(Repository::new(git_dir.into_boxed_path()))
    }

    fn git_dir(path: &Path) -> StoreResult<PathBuf> {
        let git_dir = path.join(GIT_DIR);

        if git_dir.exists() {
            if !git_dir.is_dir() {
                return Err(StoreError::NotGitDirectory(git_dir));
            }
            return Ok(git_dir);
        }

        if Self::is_database_root(path) {
            return Ok(path.to_path_buf());
        }

        Err(StoreError::NotGitRepository(path.to_path_buf()))
    }

    fn is_database_root(path: &Path) -> bool {
        path.join(OBJECTS_DIR).is_dir() && path.join(HEAD_FILE).is_file()
    }
}
