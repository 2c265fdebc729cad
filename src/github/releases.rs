//! Release queries and mutations via octocrab.

use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::GitHubError;
use crate::github::commits::resolve_commit;
use crate::github::{is_not_found, map_api_error};

/// The most recent published release at the time of computation.
#[derive(Debug, Clone)]
pub struct ReleaseReference {
    pub tag_name: String,
    pub commit_id: String,
    pub commit_timestamp: DateTime<Utc>,
}

/// A draft release created for the pending version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftRelease {
    pub id: u64,
    pub tag_name: String,
    pub html_url: String,
}

/// Release-notes lines referencing the bot's own release PRs are noise in
/// the next release's notes and get filtered out.
const BOT_NOTES_MARKER: &str = "* [shipwright release]";

/// Locate the latest published release.
///
/// `Ok(None)` means no usable prior release exists: the repository has never
/// released (404), or the release record is missing its tag, commit id or
/// commit timestamp. That state is expected for a first release and must be
/// distinguishable from a transport failure, which propagates as `Err`.
pub async fn latest_release(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
) -> Result<Option<ReleaseReference>, GitHubError> {
    let release = match octocrab.repos(owner, repo).releases().get_latest().await {
        Ok(release) => release,
        Err(e) if is_not_found(&e) => {
            info!("No previous releases found");
            return Ok(None);
        }
        Err(e) => return Err(map_api_error(e, owner, repo)),
    };

    let tag_name = release.tag_name;
    if tag_name.is_empty() {
        return Ok(None);
    }

    let Some(commit) = resolve_commit(octocrab, owner, repo, &tag_name).await? else {
        return Ok(None);
    };

    let Some(commit_timestamp) = commit.timestamp else {
        return Ok(None);
    };

    debug!(tag = %tag_name, commit = %commit.sha, "Latest release located");

    Ok(Some(ReleaseReference {
        tag_name,
        commit_id: commit.sha,
        commit_timestamp,
    }))
}

/// Create a draft release for the pending version.
pub async fn create_draft_release(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
    tag: &str,
    target_commit: &str,
    body: &str,
    prerelease: bool,
) -> Result<DraftRelease, GitHubError> {
    let release = octocrab
        .repos(owner, repo)
        .releases()
        .create(tag)
        .target_commitish(target_commit)
        .name(tag)
        .body(body)
        .draft(true)
        .prerelease(prerelease)
        .send()
        .await
        .map_err(|e| map_api_error(e, owner, repo))?;

    info!(tag, "Draft release created");

    Ok(DraftRelease {
        id: release.id.0,
        tag_name: release.tag_name,
        html_url: release.html_url.to_string(),
    })
}

/// Flip a draft release to published. Returns the published notes body and
/// release URL for downstream issue notification.
pub async fn publish_release(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
    release_id: u64,
) -> Result<(String, String), GitHubError> {
    let release = octocrab
        .repos(owner, repo)
        .releases()
        .update(release_id)
        .draft(false)
        .send()
        .await
        .map_err(|e| map_api_error(e, owner, repo))?;

    info!(tag = %release.tag_name, "Release published");

    Ok((
        release.body.unwrap_or_default(),
        release.html_url.to_string(),
    ))
}

/// Generate release notes for the pending tag, with the bot's own release-PR
/// lines filtered out.
pub async fn generate_release_notes(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
    tag: &str,
    previous_tag: Option<&str>,
) -> Result<String, GitHubError> {
    debug!(tag, ?previous_tag, "Generating release notes");

    let repos = octocrab.repos(owner, repo);
    let releases = repos.releases();

    let mut request = releases.generate_release_notes(tag);
    if let Some(previous) = previous_tag {
        request = request.previous_tag_name(previous);
    }

    let notes = request
        .send()
        .await
        .map_err(|e| map_api_error(e, owner, repo))?;

    Ok(exclude_bot_notes(&notes.body))
}

/// Drop lines referencing the bot's own release PRs from generated notes.
pub fn exclude_bot_notes(notes: &str) -> String {
    notes
        .lines()
        .filter(|line| !line.contains(BOT_NOTES_MARKER))
        .collect::<Vec<_>>()
        .join("\n")
}
