//! GitHub API operations using octocrab.

pub mod auth;
pub mod commits;
pub mod pulls;
pub mod releases;
pub mod retry;

pub use auth::resolve_github_token;
pub use commits::{HistoryAnchor, commit_messages_since, resolve_commit};
pub use pulls::{
    PR_TITLE_PREFIX, ReleasePullRequest, find_release_pr, open_release_pr, update_pr_branch,
};
pub use releases::{
    DraftRelease, ReleaseReference, create_draft_release, generate_release_notes, latest_release,
    publish_release,
};
pub use retry::with_transport_retry;

use crate::error::GitHubError;

/// Map an octocrab error onto the error taxonomy.
///
/// Checks error content using both Display and Debug output to handle the
/// different octocrab error formats, the same sniffing the rate-limit and
/// not-found paths need everywhere in this module family.
pub(crate) fn map_api_error(e: octocrab::Error, owner: &str, repo: &str) -> GitHubError {
    let err_display = e.to_string();
    let err_debug = format!("{:?}", e);
    let err_lower = err_display.to_lowercase();
    let debug_lower = err_debug.to_lowercase();

    // GitHub returns 403 with a rate limit message
    if err_lower.contains("rate limit") || debug_lower.contains("rate limit") {
        return GitHubError::RateLimited {
            reset_time: "unknown".to_string(),
        };
    }

    if err_display.contains("Not Found") || err_debug.contains("Not Found") {
        return GitHubError::RepositoryNotFound {
            owner: owner.to_string(),
            repo: repo.to_string(),
        };
    }

    GitHubError::Transport(Box::new(e))
}

/// Whether an octocrab error is a plain 404.
pub(crate) fn is_not_found(e: &octocrab::Error) -> bool {
    let err_display = e.to_string();
    let err_debug = format!("{:?}", e);
    err_display.contains("Not Found") || err_debug.contains("Not Found")
}

/// Extract owner and repo from a git remote URL.
pub fn parse_github_remote(url: &str) -> Result<(String, String), GitHubError> {
    // SSH format: git@github.com:owner/repo.git
    if url.starts_with("git@github.com:") {
        let path = url
            .strip_prefix("git@github.com:")
            .ok_or(GitHubError::InvalidRepositoryUrl)?;
        return parse_owner_repo_path(path);
    }

    // HTTPS format: https://github.com/owner/repo.git
    if url.contains("github.com/") {
        let path = url
            .split("github.com/")
            .nth(1)
            .ok_or(GitHubError::InvalidRepositoryUrl)?;
        return parse_owner_repo_path(path);
    }

    Err(GitHubError::InvalidRepositoryUrl)
}

fn parse_owner_repo_path(path: &str) -> Result<(String, String), GitHubError> {
    let path = path.strip_suffix(".git").unwrap_or(path);
    let parts: Vec<&str> = path.split('/').collect();

    if parts.len() >= 2 {
        Ok((parts[0].to_string(), parts[1].to_string()))
    } else {
        Err(GitHubError::InvalidRepositoryUrl)
    }
}
