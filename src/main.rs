//! shipwright - CLI entry point.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use octocrab::Octocrab;
use tracing_subscriber::EnvFilter;

use shipwright::github::resolve_github_token;
use shipwright::inputs::WorkflowInputs;
use shipwright::release::{run_open, run_publish, run_sync};

/// Release automation bot: infer the next version and manage release PRs.
#[derive(Parser, Debug)]
#[command(name = "shipwright")]
#[command(about = "Infer the next semantic version and manage release pull requests")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    inputs: WorkflowInputs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the next version and open a release PR (workflow_dispatch)
    Open,
    /// Update the open release PR with its base branch (push)
    Sync,
    /// Publish the draft release of a merged release PR (pull_request closed)
    Publish {
        /// Number of the merged release PR, from the event payload
        #[arg(long = "pr-number", env = "INPUT_PR_NUMBER")]
        pr_number: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let token = resolve_github_token(cli.inputs.github_token.as_deref())
        .context("GitHub authentication is required")?;

    let octocrab = Octocrab::builder()
        .personal_token(token)
        .build()
        .context("Failed to build the GitHub client")?;

    let (owner, repo) = cli
        .inputs
        .repo_slug()
        .context("Could not determine the target repository")?;

    match cli.command {
        Command::Open => run_open(&octocrab, &owner, &repo, &cli.inputs).await,
        Command::Sync => {
            let pushed_ref = cli.inputs.base_branch();
            run_sync(&octocrab, &owner, &repo, &pushed_ref).await
        }
        Command::Publish { pr_number } => {
            run_publish(
                &octocrab,
                &owner,
                &repo,
                pr_number,
                cli.inputs.notify_linked_issues,
            )
            .await
        }
    }
}
