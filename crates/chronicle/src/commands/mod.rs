//! CLI commands.

pub mod changelog;
pub mod log;
pub mod tags;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use chronicle_config::{Config, GitBackend, load_or_default};
use chronicle_core::Pipeline;
use chronicle_git::{GitCli, LogSource, Repository};
use tracing::debug;

/// What every command needs: the repository, its configuration and a
/// pipeline reading its log.
pub struct Context {
    pub repo: PathBuf,
    pub config: Config,
    pub pipeline: Pipeline,
}

impl Context {
    /// Loads the configuration found from `repo` and opens the log source.
    pub fn load(repo: &Path, backend: Option<GitBackend>) -> Result<Self> {
        let mut config = load_or_default(repo)
            .with_context(|| format!("failed to load configuration for '{}'", repo.display()))?;
        if let Some(backend) = backend {
            config.git.backend = backend;
        }
        debug!(?config, "resolved configuration");

        let source: Box<dyn LogSource> = match config.git.backend {
            GitBackend::Cli => {
                Box::new(GitCli::new(repo).with_executable(&config.git.executable))
            }
            GitBackend::Libgit2 => Box::new(
                Repository::discover(repo)
                    .with_context(|| format!("did not find git repository at '{}'", repo.display()))?,
            ),
        };

        Ok(Self {
            repo: repo.to_path_buf(),
            config,
            pipeline: Pipeline::new(source),
        })
    }

    /// Reads the log, naming the repository on failure.
    pub fn commits(&self) -> Result<Vec<chronicle_commit::Commit>> {
        self.pipeline
            .commits()
            .with_context(|| format!("failed to read the log of '{}'", self.repo.display()))
    }
}
