//! Error types for shipwright modules using thiserror.

use thiserror::Error;

/// Errors from version inference.
///
/// These are structural failures of the bump computation itself. An
/// unparseable individual commit message is never an error: it classifies
/// as no-signal and the run continues.
#[derive(Error, Debug)]
pub enum VersionError {
    #[error("No commits found since last release")]
    NoCommitsSinceRelease,

    #[error("Couldn't find latest release")]
    NoPriorRelease,

    #[error("Invalid base version '{input}': {source}")]
    InvalidBaseVersion {
        input: String,
        #[source]
        source: semver::Error,
    },

    #[error("Invalid version input '{input}': {source}")]
    InvalidVersionInput {
        input: String,
        #[source]
        source: semver::Error,
    },
}

/// Errors from GitHub API operations.
///
/// `Transport` covers collaborator communication failures and is the only
/// variant the retry policy considers retryable. A missing latest release is
/// not an error at all: the locator returns `Ok(None)` for it.
#[derive(Error, Debug)]
pub enum GitHubError {
    #[error(
        "GitHub authentication failed: no valid auth found. Pass --github-token, run 'gh auth login' or set GITHUB_TOKEN"
    )]
    AuthenticationFailed,

    #[error("GitHub API request failed: {0}")]
    Transport(#[source] Box<octocrab::Error>),

    #[error("Rate limited by GitHub API. Resets at: {reset_time}")]
    RateLimited { reset_time: String },

    #[error("Repository not found: {owner}/{repo}")]
    RepositoryNotFound { owner: String, repo: String },

    #[error("Commit reference '{reference}' not found or missing a timestamp")]
    CommitNotFound { reference: String },

    #[error("Failed to parse repository URL")]
    InvalidRepositoryUrl,
}

/// Errors from the release pipeline: git, npm, PR orchestration.
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("npm not found on PATH. The release pipeline needs npm to set the package version")]
    NpmNotInstalled,

    #[error("npm {operation} failed: {stderr}")]
    NpmFailed { operation: String, stderr: String },

    #[error("git {operation} failed: {stderr}")]
    GitFailed { operation: String, stderr: String },

    #[error("Failed to run {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to create the pull request: {0}")]
    PullRequestFailed(#[source] Box<GitHubError>),

    #[error("No open release pull request found")]
    ReleasePrNotFound,

    #[error("Skipping release PR sync: PR base '{pr_base}' differs from pushed branch '{pushed}'")]
    BaseBranchMismatch { pr_base: String, pushed: String },

    #[error("Release PR was closed without merging; nothing to publish")]
    NotMerged,

    #[error("Release metadata missing from pull request body")]
    MissingReleaseMeta,

    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Failed to resolve HEAD commit: {0}")]
    HeadResolution(#[source] git2::Error),
}

/// Errors from artifact archiving and upload.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Artifact path not found: {0}")]
    PathNotFound(String),

    #[error("Failed to archive artifact: {0}")]
    ArchiveFailed(#[source] std::io::Error),

    #[error("Failed to read archive: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Failed to upload release asset: {0}")]
    UploadFailed(#[source] Box<octocrab::Error>),

    #[error("Release asset upload finished in state '{0}', expected 'uploaded'")]
    NotUploaded(String),
}
