//! Release pull request operations via octocrab.

use octocrab::Octocrab;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::GitHubError;
use crate::github::map_api_error;

/// Title prefix identifying pull requests opened by this bot.
pub const PR_TITLE_PREFIX: &str = "[shipwright release]";

const PER_PAGE: usize = 100;
const PAGE_SAFETY_LIMIT: u32 = 50;

/// The subset of a pull request the release flows need.
#[derive(Debug, Clone)]
pub struct ReleasePullRequest {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub base_ref: String,
    pub head_ref: String,
}

/// List-endpoint payload shape, reduced to the fields the sync flow reads.
#[derive(Debug, Deserialize)]
struct PullRequestItem {
    number: u64,
    title: Option<String>,
    body: Option<String>,
    base: RefTarget,
    head: RefTarget,
}

#[derive(Debug, Deserialize)]
struct RefTarget {
    #[serde(rename = "ref")]
    ref_name: String,
}

/// Open the release pull request for a pushed release branch.
pub async fn open_release_pr(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
    head_branch: &str,
    base_ref: &str,
    body: &str,
) -> Result<ReleasePullRequest, GitHubError> {
    let title = format!("{PR_TITLE_PREFIX} {head_branch}");

    let pr = octocrab
        .pulls(owner, repo)
        .create(&title, head_branch, base_ref)
        .body(body)
        .send()
        .await
        .map_err(|e| map_api_error(e, owner, repo))?;

    debug!(number = pr.number, "Release PR opened");

    Ok(ReleasePullRequest {
        number: pr.number,
        title,
        body: Some(body.to_string()),
        base_ref: base_ref.to_string(),
        head_ref: head_branch.to_string(),
    })
}

/// Locate the open release PR, newest first.
///
/// Only PRs carrying the bot's title prefix and a non-empty body qualify;
/// everything else in the list is skipped.
pub async fn find_release_pr(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
) -> Result<Option<ReleasePullRequest>, GitHubError> {
    let route = format!("/repos/{owner}/{repo}/pulls");
    let mut page: u32 = 1;

    loop {
        let params = [
            ("state", "open".to_string()),
            ("sort", "created".to_string()),
            ("direction", "desc".to_string()),
            ("per_page", PER_PAGE.to_string()),
            ("page", page.to_string()),
        ];

        let batch: Vec<PullRequestItem> = octocrab
            .get(&route, Some(&params))
            .await
            .map_err(|e| map_api_error(e, owner, repo))?;

        let batch_len = batch.len();

        for pr in batch {
            let title = pr.title.unwrap_or_default();
            let has_body = pr.body.as_deref().is_some_and(|b| !b.is_empty());

            if !title.starts_with(PR_TITLE_PREFIX) || !has_body {
                debug!(number = pr.number, "Skipping non-release PR");
                continue;
            }

            return Ok(Some(ReleasePullRequest {
                number: pr.number,
                title,
                body: pr.body,
                base_ref: pr.base.ref_name,
                head_ref: pr.head.ref_name,
            }));
        }

        if batch_len < PER_PAGE {
            return Ok(None);
        }

        page += 1;

        if page > PAGE_SAFETY_LIMIT {
            warn!(
                "Reached {}-page safety limit while searching for the release PR in {}/{}",
                PAGE_SAFETY_LIMIT, owner, repo
            );
            return Ok(None);
        }
    }
}

/// Update the PR branch with its base, the merge-button "update branch".
pub async fn update_pr_branch(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
    number: u64,
) -> Result<(), GitHubError> {
    let route = format!("/repos/{owner}/{repo}/pulls/{number}/update-branch");

    let _: serde_json::Value = octocrab
        .put(route, None::<&()>)
        .await
        .map_err(|e| map_api_error(e, owner, repo))?;

    Ok(())
}
