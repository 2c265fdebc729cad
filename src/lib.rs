//! shipwright - a release automation bot for CI pipelines.
//!
//! # Overview
//!
//! shipwright infers the next semantic version from the commit history since
//! the latest published release (Conventional Commits + SemVer), opens a
//! release pull request with generated notes and a draft release behind it,
//! keeps that PR in sync with its base branch, and publishes the release
//! once the PR merges.

pub mod artifact;
pub mod error;
pub mod github;
pub mod inputs;
pub mod notify;
pub mod release;
pub mod version;

// Re-export commonly used types
pub use artifact::AttachedArtifact;
pub use error::{ArtifactError, GitHubError, ReleaseError, VersionError};
pub use github::{DraftRelease, ReleasePullRequest, ReleaseReference};
pub use release::ReleaseMeta;
pub use version::{BumpIntent, ChangeSignal, CommitRecord, VersionSpec};
