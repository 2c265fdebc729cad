//! Publish the draft release when its release PR merges.

use anyhow::{Context, Result};
use octocrab::Octocrab;
use tracing::{info, warn};

use crate::error::ReleaseError;
use crate::github::{PR_TITLE_PREFIX, map_api_error, publish_release, with_transport_retry};
use crate::notify::notify_linked_issues;
use crate::release::body::extract_release_meta;

/// Publish the draft release recorded in a merged release PR and notify
/// issues linked to the released pull requests.
pub async fn run_publish(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
    pr_number: u64,
    notify: bool,
) -> Result<()> {
    info!(number = pr_number, "Starting release publish");

    let pr = octocrab
        .pulls(owner, repo)
        .get(pr_number)
        .await
        .map_err(|e| map_api_error(e, owner, repo))
        .context("Failed to fetch the release PR")?;

    let title = pr.title.clone().unwrap_or_default();
    if !title.starts_with(PR_TITLE_PREFIX) {
        return Err(ReleaseError::ReleasePrNotFound.into());
    }

    if pr.merged_at.is_none() {
        return Err(ReleaseError::NotMerged.into());
    }

    let meta = pr
        .body
        .as_deref()
        .and_then(extract_release_meta)
        .ok_or(ReleaseError::MissingReleaseMeta)?;

    let (notes, release_url) = with_transport_retry("publish release", || {
        publish_release(octocrab, owner, repo, meta.id)
    })
    .await
    .context("Failed to publish the draft release")?;

    info!(version = %meta.version, "Release published");

    if notify {
        // Notification is best-effort; the release is already out.
        match notify_linked_issues(octocrab, owner, repo, &notes, &release_url, &meta.version).await
        {
            Ok(count) => info!(count, "Linked issues notified"),
            Err(e) => warn!(error = %e, "Failed to notify linked issues"),
        }
    }

    Ok(())
}
