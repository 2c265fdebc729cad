//! Commit history fetching since a release anchor.

use chrono::{DateTime, Duration, Utc};
use octocrab::Octocrab;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::GitHubError;
use crate::github::{is_not_found, map_api_error};
use crate::version::CommitRecord;

/// The reference point from which history is scanned forward.
#[derive(Debug, Clone)]
pub enum HistoryAnchor {
    Since(DateTime<Utc>),
    /// A commit id or tag name, resolved to its committed timestamp first.
    Commit(String),
}

/// Commit payload shape shared by the list and single-commit endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct CommitItem {
    pub sha: String,
    pub commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitDetail {
    pub message: String,
    pub committer: Option<CommitSignature>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitSignature {
    pub date: Option<DateTime<Utc>>,
}

/// A commit reference resolved through the commits API.
#[derive(Debug, Clone)]
pub struct ResolvedCommit {
    pub sha: String,
    pub timestamp: Option<DateTime<Utc>>,
}

const PER_PAGE: usize = 100;
const PAGE_SAFETY_LIMIT: u32 = 50;

/// Fetch the messages of all commits on the default branch since the anchor.
///
/// The anchor timestamp is advanced by one second before querying: GitHub's
/// `since` boundary is inclusive and would re-include the release commit
/// itself. Pagination is followed until exhausted. An empty history returns
/// an empty Vec; deciding whether that is fatal belongs to the calculator.
pub async fn commit_messages_since(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
    anchor: &HistoryAnchor,
) -> Result<Vec<CommitRecord>, GitHubError> {
    let anchor_time = match anchor {
        HistoryAnchor::Since(ts) => *ts,
        HistoryAnchor::Commit(reference) => {
            let resolved = resolve_commit(octocrab, owner, repo, reference)
                .await?
                .ok_or_else(|| GitHubError::CommitNotFound {
                    reference: reference.clone(),
                })?;
            resolved
                .timestamp
                .ok_or_else(|| GitHubError::CommitNotFound {
                    reference: reference.clone(),
                })?
        }
    };

    let since = anchor_time + Duration::seconds(1);
    debug!(%since, "Fetching commits since release anchor");

    let route = format!("/repos/{owner}/{repo}/commits");
    let mut messages = Vec::new();
    let mut page: u32 = 1;

    loop {
        let params = [
            ("since", since.to_rfc3339()),
            ("per_page", PER_PAGE.to_string()),
            ("page", page.to_string()),
        ];

        let batch: Vec<CommitItem> = octocrab
            .get(&route, Some(&params))
            .await
            .map_err(|e| map_api_error(e, owner, repo))?;

        let batch_len = batch.len();
        messages.extend(
            batch
                .into_iter()
                .map(|item| CommitRecord::new(item.commit.message)),
        );

        if batch_len < PER_PAGE {
            break;
        }

        page += 1;

        if page > PAGE_SAFETY_LIMIT {
            warn!(
                "Reached {}-page safety limit while fetching commits for {}/{}",
                PAGE_SAFETY_LIMIT, owner, repo
            );
            break;
        }
    }

    Ok(messages)
}

/// Resolve a commit id, tag or branch to its sha and committed timestamp.
///
/// Returns `Ok(None)` when the reference does not exist; transport failures
/// propagate as errors.
pub async fn resolve_commit(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
    reference: &str,
) -> Result<Option<ResolvedCommit>, GitHubError> {
    let route = format!("/repos/{owner}/{repo}/commits/{reference}");

    match octocrab.get::<CommitItem, _, ()>(&route, None).await {
        Ok(item) => Ok(Some(ResolvedCommit {
            sha: item.sha,
            timestamp: item.commit.committer.and_then(|c| c.date),
        })),
        Err(e) if is_not_found(&e) => Ok(None),
        Err(e) => Err(map_api_error(e, owner, repo)),
    }
}
