//! The open-release-PR flow: infer the version, cut the release branch,
//! draft the release and open the pull request.

use anyhow::{Context, Result};
use git2::Repository;
use octocrab::Octocrab;
use semver::Version;
use tracing::{debug, info, warn};

use crate::artifact;
use crate::error::{ReleaseError, VersionError};
use crate::github::{
    HistoryAnchor, commit_messages_since, create_draft_release, generate_release_notes,
    latest_release, open_release_pr, with_transport_retry,
};
use crate::inputs::WorkflowInputs;
use crate::release::body::{ReleaseMeta, render_commit_message, render_pr_body};
use crate::release::{git, npm};
use crate::version::{
    VersionSpec, format_version, next_version, parse_base_version, parse_version_input,
};

/// Run the full open flow against the working repository.
pub async fn run_open(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
    inputs: &WorkflowInputs,
) -> Result<()> {
    info!("Starting release PR flow");

    // Fail before any state is mutated if npm is missing.
    npm::check_npm_installed()?;

    let (version, previous_tag) = resolve_next_version(octocrab, owner, repo, inputs).await?;

    // npm owns the package version; hand it the bare semver and read back
    // whatever it canonicalized.
    let bare = format_version(&version, "", inputs.prerelease_prefix.as_deref());
    let package_version = npm::set_package_version(&bare)?;
    let formatted = format!("{}{}", inputs.version_prefix, package_version);

    info!(version = %formatted, "Next version resolved");

    let branch = format!("release/{formatted}");
    let commit_message = render_commit_message(&inputs.commit_message, &formatted);

    git::create_release_branch(&branch)?;
    git::stage_all()?;
    git::commit(&commit_message)?;
    git::push_branch("origin", &branch)?;

    let head = {
        let working = Repository::open(".").map_err(ReleaseError::OpenRepository)?;
        git::head_commit_id(&working)?
    };
    debug!(commit = %head, "Creating draft release");

    let notes = with_transport_retry("generate release notes", || {
        generate_release_notes(octocrab, owner, repo, &formatted, previous_tag.as_deref())
    })
    .await
    .context("Failed to generate release notes")?;

    let prerelease = !version.pre.is_empty() || inputs.prerelease_prefix.is_some();
    let draft = with_transport_retry("create draft release", || {
        create_draft_release(octocrab, owner, repo, &formatted, &head, &notes, prerelease)
    })
    .await
    .context("Unable to create draft release")?;

    let attached = match &inputs.artifact_path {
        Some(path) => {
            let artifact = artifact::attach(octocrab, owner, repo, path, draft.id)
                .await
                .context("Failed to attach build artifact")?;
            Some(artifact)
        }
        None => None,
    };

    let meta = ReleaseMeta {
        id: draft.id,
        version: formatted.clone(),
    };
    let pr_body = render_pr_body(&meta, &draft, &notes, &inputs.actor, attached.as_ref());

    let base_ref = inputs.base_branch();
    match open_release_pr(octocrab, owner, repo, &branch, &base_ref, &pr_body).await {
        Ok(pr) => {
            info!(number = pr.number, "Release PR opened");
            Ok(())
        }
        Err(e) => {
            // Leave no orphan branch behind a failed PR.
            if let Err(cleanup) = git::delete_remote_branch("origin", &branch) {
                warn!(branch = %branch, error = %cleanup, "Failed to delete release branch");
            }
            Err(ReleaseError::PullRequestFailed(Box::new(e)).into())
        }
    }
}

/// Resolve the next version per the operator's selection.
///
/// An explicit literal bypasses release lookup and commit analysis entirely;
/// `auto` anchors at the explicit base tag when given, otherwise at the
/// latest published release.
async fn resolve_next_version(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
    inputs: &WorkflowInputs,
) -> Result<(Version, Option<String>)> {
    match VersionSpec::parse(&inputs.semver) {
        VersionSpec::Explicit(literal) => {
            let version = parse_version_input(&literal)?;
            Ok((version, inputs.base_tag.clone()))
        }
        VersionSpec::Auto => {
            let (current, anchor, previous_tag) = match &inputs.base_tag {
                Some(tag) => (
                    parse_base_version(tag)?,
                    HistoryAnchor::Commit(tag.clone()),
                    Some(tag.clone()),
                ),
                None => {
                    let reference = with_transport_retry("locate latest release", || {
                        latest_release(octocrab, owner, repo)
                    })
                    .await
                    .context("An error occurred while fetching the latest release")?
                    .ok_or(VersionError::NoPriorRelease)?;

                    debug!(tag = %reference.tag_name, "Anchoring at latest release");

                    (
                        parse_base_version(&reference.tag_name)?,
                        HistoryAnchor::Since(reference.commit_timestamp),
                        Some(reference.tag_name),
                    )
                }
            };

            let commits = with_transport_retry("fetch commit history", || {
                commit_messages_since(octocrab, owner, repo, &anchor)
            })
            .await
            .context("An error occurred while fetching commits since the last release")?;

            debug!(count = commits.len(), "Commits since release anchor");

            let version = next_version(&current, &commits)?;
            Ok((version, previous_tag))
        }
    }
}
