//! Tags command.

use anyhow::{Context as _, Result};
use clap::Args;

use super::Context;

/// Arguments for the tags command.
#[derive(Debug, Args)]
pub struct TagsArgs {
    /// Leave out pre-releases
    #[arg(long)]
    pub stable: bool,
}

/// Runs the tags command.
pub fn run(ctx: &Context, args: &TagsArgs) -> Result<()> {
    let changelog = ctx
        .pipeline
        .changelog(&ctx.config.version.tag_prefix)
        .with_context(|| format!("failed to read the log of '{}'", ctx.repo.display()))?;

    for release in changelog
        .releases()
        .iter()
        .filter(|r| !args.stable || !r.version.is_pre_release())
    {
        println!("{}\t{}", release.version, release.tag);
    }
    Ok(())
}
