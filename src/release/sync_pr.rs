//! Keep the open release PR in sync with its base branch.

use anyhow::{Context, Result};
use octocrab::Octocrab;
use tracing::info;

use crate::error::ReleaseError;
use crate::github::{find_release_pr, update_pr_branch, with_transport_retry};

/// Update the release PR branch after a push to its base branch.
///
/// A push to any other branch is a mismatch, reported as an error rather
/// than silently ignored so the workflow run shows why nothing happened.
pub async fn run_sync(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
    pushed_ref: &str,
) -> Result<()> {
    info!("Starting release PR sync");

    let pushed_branch = branch_from_ref(pushed_ref);

    let pr = with_transport_retry("find release PR", || find_release_pr(octocrab, owner, repo))
        .await
        .context("An error occurred while getting the release PR")?
        .ok_or(ReleaseError::ReleasePrNotFound)?;

    if pr.base_ref != pushed_branch {
        return Err(ReleaseError::BaseBranchMismatch {
            pr_base: pr.base_ref,
            pushed: pushed_branch.to_string(),
        }
        .into());
    }

    update_pr_branch(octocrab, owner, repo, pr.number)
        .await
        .context("Failed to update the release PR branch")?;

    info!(number = pr.number, "Release PR updated");

    Ok(())
}

/// Branch name from a fully-qualified ref. `GITHUB_REF_NAME` already holds
/// the bare branch, `GITHUB_REF` holds `refs/heads/{branch}`.
fn branch_from_ref(git_ref: &str) -> &str {
    git_ref.strip_prefix("refs/heads/").unwrap_or(git_ref)
}
