//! Log source backed by the `git` executable.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::{GitError, GitResult, LogSource};

/// The `--pretty` format understood by the log line parser.
pub const LOG_FORMAT: &str = "--pretty=%at %h %D | %s";

/// Runs `git log` in a working directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    executable: PathBuf,
    repo_path: PathBuf,
}

impl GitCli {
    /// Creates a source for the repository at `repo_path`, using the `git`
    /// found on `PATH`.
    #[must_use]
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            executable: PathBuf::from("git"),
            repo_path: repo_path.into(),
        }
    }

    /// Uses the given executable instead of `git`.
    ///
    /// A bare name is looked up on `PATH`; anything with a directory
    /// component is used as is.
    #[must_use]
    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = executable.into();
        self
    }

    /// Resolves the executable to an existing executable file.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::ExecutableNotFound`] if no such file exists or it
    /// lacks execute permission.
    pub fn resolve_executable(&self) -> GitResult<PathBuf> {
        let not_found = || GitError::ExecutableNotFound(self.executable.clone());

        if self.executable.components().count() > 1 {
            return if is_executable(&self.executable) {
                Ok(self.executable.clone())
            } else {
                Err(not_found())
            };
        }

        let path = env::var_os("PATH").ok_or_else(not_found)?;
        env::split_paths(&path)
            .flat_map(|dir| {
                let plain = dir.join(&self.executable);
                let suffixed = plain.with_extension(env::consts::EXE_EXTENSION);
                [plain, suffixed]
            })
            .find(|candidate| is_executable(candidate))
            .ok_or_else(not_found)
    }

    fn check_repository(&self) -> GitResult<()> {
        if !self.repo_path.is_dir() {
            return Err(GitError::RepoNotFound(self.repo_path.clone()));
        }
        if !self.repo_path.join(".git").exists() {
            return Err(GitError::NotARepo(self.repo_path.clone()));
        }
        Ok(())
    }
}

fn is_executable(path: &Path) -> bool {
    let Ok(meta) = fs::metadata(path) else {
        return false;
    };
    if !meta.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        meta.permissions().mode() & 0o111 != 0
    }

    #[cfg(not(unix))]
    {
        true
    }
}

impl LogSource for GitCli {
    fn read_log(&self) -> GitResult<String> {
        let executable = self.resolve_executable()?;
        self.check_repository()?;

        debug!(?executable, path = ?self.repo_path, "running git log");
        let output = Command::new(&executable)
            .args(["log", LOG_FORMAT, "--no-show-signature"])
            .current_dir(&self.repo_path)
            .output()?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
