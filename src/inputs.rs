//! Workflow inputs.
//!
//! Every input is a CLI flag with an environment fallback matching GitHub
//! Actions input wiring (`INPUT_*`), so the same binary works from a
//! workflow step or a local shell.

use std::path::PathBuf;

use clap::{ArgAction, Args};
use git2::Repository;

use crate::error::GitHubError;
use crate::github::parse_github_remote;

#[derive(Args, Debug, Clone)]
pub struct WorkflowInputs {
    /// GitHub token used for all API calls
    #[arg(long = "github-token", env = "INPUT_GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// "auto" to infer the next version from commit history, or an explicit
    /// semver literal used verbatim
    #[arg(long, env = "INPUT_SEMVER", default_value = "auto")]
    pub semver: String,

    /// Prefix applied to the formatted version (e.g. "v")
    #[arg(long = "version-prefix", env = "INPUT_VERSION_PREFIX", default_value = "")]
    pub version_prefix: String,

    /// Prerelease identifier appended to computed versions
    #[arg(long = "prerelease-prefix", env = "INPUT_PRERELEASE_PREFIX")]
    pub prerelease_prefix: Option<String>,

    /// Explicit anchor tag overriding the located latest release
    #[arg(long = "base-tag", env = "INPUT_BASE_TAG")]
    pub base_tag: Option<String>,

    /// Build artifact to archive and attach to the draft release
    #[arg(long = "artifact-path", env = "INPUT_ARTIFACT_PATH")]
    pub artifact_path: Option<PathBuf>,

    /// Release commit message; "{version}" is substituted
    #[arg(
        long = "commit-message",
        env = "INPUT_COMMIT_MESSAGE",
        default_value = "Release {version}"
    )]
    pub commit_message: String,

    /// Comment on issues linked to the released pull requests
    #[arg(
        long = "notify-linked-issues",
        env = "INPUT_NOTIFY_LINKED_ISSUES",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub notify_linked_issues: bool,

    /// Repository as "owner/repo"; falls back to the origin remote
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// Base branch of the release PR
    #[arg(long = "base-ref", env = "GITHUB_REF_NAME")]
    pub base_ref: Option<String>,

    /// Workflow actor credited in the PR body
    #[arg(long, env = "GITHUB_ACTOR", default_value = "shipwright")]
    pub actor: String,
}

impl WorkflowInputs {
    /// Resolve the owner/repo pair: explicit input first, then the origin
    /// remote of the working repository.
    pub fn repo_slug(&self) -> Result<(String, String), GitHubError> {
        if let Some(slug) = &self.repository {
            let mut parts = slug.splitn(2, '/');
            if let (Some(owner), Some(repo)) = (parts.next(), parts.next()) {
                if !owner.is_empty() && !repo.is_empty() {
                    return Ok((owner.to_string(), repo.to_string()));
                }
            }
            return Err(GitHubError::InvalidRepositoryUrl);
        }

        let repo = Repository::open(".").map_err(|_| GitHubError::InvalidRepositoryUrl)?;
        let remote = repo
            .find_remote("origin")
            .map_err(|_| GitHubError::InvalidRepositoryUrl)?;
        let url = remote.url().ok_or(GitHubError::InvalidRepositoryUrl)?;

        parse_github_remote(url)
    }

    /// Base branch for the release PR; defaults to main when the event ref
    /// is unavailable.
    pub fn base_branch(&self) -> String {
        self.base_ref
            .as_deref()
            .map(|r| r.strip_prefix("refs/heads/").unwrap_or(r).to_string())
            .unwrap_or_else(|| "main".to_string())
    }
}
