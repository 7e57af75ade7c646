//! Log command.

use anyhow::Result;
use clap::Args;
use tracing::debug;

use super::Context;

/// Arguments for the log command.
#[derive(Debug, Args)]
pub struct LogArgs {
    /// Print commits as JSON
    #[arg(long)]
    pub json: bool,

    /// Classify subjects and print type and scope
    #[arg(long, conflicts_with = "json")]
    pub conventional: bool,
}

/// Runs the log command.
pub fn run(ctx: &Context, args: &LogArgs) -> Result<()> {
    let commits = ctx.commits()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&commits)?);
        return Ok(());
    }

    if args.conventional {
        let parser = ctx.pipeline.parser();
        for commit in &commits {
            match parser.parse(commit) {
                Ok(parsed) => {
                    let scope = if parsed.scope.is_empty() {
                        String::new()
                    } else {
                        format!("({})", parsed.scope.join(","))
                    };
                    println!(
                        "{} {}{scope}: {}",
                        parsed.hash(),
                        parsed.commit_type,
                        parsed.subject
                    );
                }
                Err(error) => {
                    debug!(hash = %commit.abbreviated_hash, %error, "unparseable subject");
                    println!("{} ? {}", commit.abbreviated_hash, commit.subject);
                }
            }
        }
        return Ok(());
    }

    for commit in &commits {
        println!("{} {}", commit.abbreviated_hash, commit.subject);
    }
    Ok(())
}
