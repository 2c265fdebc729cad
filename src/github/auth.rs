//! GitHub authentication detection.
//!
//! Auth order:
//! 1. Explicit token from the workflow input
//! 2. `gh auth token` (gh CLI)
//! 3. GITHUB_TOKEN environment variable
//! 4. GH_TOKEN environment variable

use std::env;
use std::process::Command;

use crate::error::GitHubError;

/// Resolve the GitHub token used for all API calls.
///
/// The explicit input wins; the rest mirrors local-development fallbacks so
/// the bot can be run outside of CI.
pub fn resolve_github_token(input_token: Option<&str>) -> Result<String, GitHubError> {
    if let Some(token) = input_token {
        if !token.is_empty() {
            return Ok(token.to_string());
        }
    }

    if let Some(token) = get_token_from_gh_cli() {
        return Ok(token);
    }

    if let Ok(token) = env::var("GITHUB_TOKEN") {
        if !token.is_empty() {
            return Ok(token);
        }
    }

    if let Ok(token) = env::var("GH_TOKEN") {
        if !token.is_empty() {
            return Ok(token);
        }
    }

    Err(GitHubError::AuthenticationFailed)
}

/// Try to get a token from the gh CLI.
fn get_token_from_gh_cli() -> Option<String> {
    let status = Command::new("gh").args(["auth", "status"]).output().ok()?;

    if !status.status.success() {
        return None;
    }

    let output = Command::new("gh").args(["auth", "token"]).output().ok()?;

    if output.status.success() {
        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !token.is_empty() {
            return Some(token);
        }
    }

    None
}
