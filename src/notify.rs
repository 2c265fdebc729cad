//! Linked-issue notification after publishing a release.
//!
//! Release notes reference the pull requests that went into the release;
//! each PR may in turn close issues. Every such issue gets a comment
//! pointing at the published version.

use std::collections::BTreeSet;

use octocrab::Octocrab;
use regex_lite::Regex;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::GitHubError;
use crate::github::map_api_error;

/// Comment on every issue closed by the pull requests in the release notes.
pub async fn notify_linked_issues(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
    release_notes: &str,
    release_url: &str,
    version: &str,
) -> Result<usize, GitHubError> {
    let pr_numbers = extract_pr_numbers(owner, repo, release_notes);

    if pr_numbers.is_empty() {
        debug!("No pull requests referenced in release notes");
        return Ok(0);
    }

    let mut issues: BTreeSet<u64> = BTreeSet::new();
    for pr_number in pr_numbers {
        issues.extend(closing_issues(octocrab, owner, repo, pr_number).await?);
    }

    let body = comment_body(version, release_url);

    for issue in &issues {
        octocrab
            .issues(owner, repo)
            .create_comment(*issue, body.as_str())
            .await
            .map_err(|e| map_api_error(e, owner, repo))?;
    }

    info!(count = issues.len(), "Notified linked issues");

    Ok(issues.len())
}

/// Pull request numbers referenced by the generated release notes.
fn extract_pr_numbers(owner: &str, repo: &str, notes: &str) -> BTreeSet<u64> {
    let pattern = format!(
        r"github\.com/{}/{}/pull/(\d+)",
        regex_escape(owner),
        regex_escape(repo)
    );

    let Ok(re) = Regex::new(&pattern) else {
        return BTreeSet::new();
    };

    re.captures_iter(notes)
        .filter_map(|caps| caps.get(1)?.as_str().parse().ok())
        .collect()
}

fn regex_escape(s: &str) -> String {
    s.chars()
        .flat_map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                vec![c]
            } else {
                vec!['\\', c]
            }
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct ClosingIssuesResponse {
    data: Option<ClosingIssuesData>,
}

#[derive(Debug, Deserialize)]
struct ClosingIssuesData {
    repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
struct RepositoryNode {
    #[serde(rename = "pullRequest")]
    pull_request: Option<PullRequestNode>,
}

#[derive(Debug, Deserialize)]
struct PullRequestNode {
    #[serde(rename = "closingIssuesReferences")]
    closing_issues_references: Option<IssueConnection>,
}

#[derive(Debug, Deserialize)]
struct IssueConnection {
    nodes: Option<Vec<IssueNode>>,
}

#[derive(Debug, Deserialize)]
struct IssueNode {
    number: u64,
}

/// Issues a pull request closes, via the GraphQL API (REST has no
/// equivalent of `closingIssuesReferences`).
async fn closing_issues(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
    pr_number: u64,
) -> Result<Vec<u64>, GitHubError> {
    let payload = serde_json::json!({
        "query": "query closingIssues($owner: String!, $repo: String!, $number: Int!) {\
            repository(owner: $owner, name: $repo) {\
                pullRequest(number: $number) {\
                    closingIssuesReferences(first: 100) { nodes { number } }\
                }\
            }\
        }",
        "variables": { "owner": owner, "repo": repo, "number": pr_number },
    });

    let response: ClosingIssuesResponse = octocrab
        .graphql(&payload)
        .await
        .map_err(|e| map_api_error(e, owner, repo))?;

    let numbers = response
        .data
        .and_then(|d| d.repository)
        .and_then(|r| r.pull_request)
        .and_then(|p| p.closing_issues_references)
        .and_then(|c| c.nodes)
        .map(|nodes| nodes.into_iter().map(|n| n.number).collect())
        .unwrap_or_default();

    Ok(numbers)
}

fn comment_body(version: &str, release_url: &str) -> String {
    format!(
        "🎉 This issue has been resolved in version {version} 🎉\n\n\
         The release is available on: [GitHub release]({release_url})\n\n\
         Your **shipwright** bot 📦🚀"
    )
}
