//! CLI definition.

use std::path::PathBuf;

use anyhow::Result;
use chronicle_config::GitBackend;
use clap::{Parser, Subcommand, ValueEnum};

use crate::commands;

/// Derive ordered releases and changelogs from Git history.
#[derive(Debug, Parser)]
#[command(name = "chronicle")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the repository
    #[arg(short = 'C', long = "repo", global = true, default_value = ".")]
    pub repo: PathBuf,

    /// How to read the log (overrides the configuration file)
    #[arg(long, global = true, value_enum, env = "CHRONICLE_BACKEND")]
    pub backend: Option<Backend>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Log source backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Run the git executable
    Cli,
    /// Read the repository through libgit2
    Libgit2,
}

impl From<Backend> for GitBackend {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Cli => Self::Cli,
            Backend::Libgit2 => Self::Libgit2,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List commits, newest first
    Log(commands::log::LogArgs),

    /// Generate the changelog
    Changelog(commands::changelog::ChangelogArgs),

    /// List version tags by precedence, highest first
    Tags(commands::tags::TagsArgs),
}

impl Cli {
    /// Runs the CLI command.
    pub fn run(self) -> Result<()> {
        let ctx = commands::Context::load(&self.repo, self.backend.map(GitBackend::from))?;
        match self.command {
            Commands::Log(args) => commands::log::run(&ctx, &args),
            Commands::Changelog(args) => commands::changelog::run(&ctx, &args),
            Commands::Tags(args) => commands::tags::run(&ctx, &args),
        }
    }
}
