//! Changelog command.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use chronicle_core::ChangelogOptions;
use clap::Args;
use tracing::info;

use super::Context;

/// Arguments for the changelog command.
#[derive(Debug, Args)]
pub struct ChangelogArgs {
    /// Output file (default: from configuration, relative to the repository)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,

    /// Include commits that are neither features nor fixes
    #[arg(long)]
    pub all_types: bool,

    /// Omit commit hashes
    #[arg(long)]
    pub no_hashes: bool,
}

/// Runs the changelog command.
pub fn run(ctx: &Context, args: &ChangelogArgs) -> Result<()> {
    let changelog = ctx
        .pipeline
        .changelog(&ctx.config.version.tag_prefix)
        .with_context(|| format!("failed to read the log of '{}'", ctx.repo.display()))?;

    let options = ChangelogOptions {
        include_unknown: args.all_types || ctx.config.changelog.include_unknown,
        include_hashes: !args.no_hashes && ctx.config.changelog.include_hashes,
    };
    let markdown = changelog.render_markdown(&options);

    if args.stdout {
        print!("{markdown}");
        return Ok(());
    }

    let path = args
        .output
        .clone()
        .unwrap_or_else(|| ctx.repo.join(&ctx.config.changelog.output));
    std::fs::write(&path, markdown)
        .with_context(|| format!("failed to write '{}'", path.display()))?;

    info!(
        path = %path.display(),
        releases = changelog.releases().len(),
        skipped = changelog.skipped().len(),
        "wrote changelog"
    );
    Ok(())
}
