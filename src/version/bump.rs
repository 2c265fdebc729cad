//! Semver bump calculation from commit history.

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::error::VersionError;
use crate::version::classify::{ChangeSignal, classify};

/// A raw log entry from the commit history since the last release.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    pub message: String,
}

impl CommitRecord {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The version selection supplied by the operator: infer from history, or
/// use a literal version verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSpec {
    Auto,
    Explicit(String),
}

impl VersionSpec {
    pub fn parse(input: &str) -> Self {
        if input.eq_ignore_ascii_case("auto") {
            Self::Auto
        } else {
            Self::Explicit(input.to_string())
        }
    }
}

/// Type of version bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BumpIntent {
    Patch,
    Minor,
    Major,
}

/// Compute the next version from the commits since the last release.
///
/// Folds every message through [`classify`], keeps the highest severity
/// observed, and applies exactly one bump to `current`. The fold is
/// commutative, so commit order never changes the outcome.
///
/// An empty history is [`VersionError::NoCommitsSinceRelease`]: auto-bump
/// cannot proceed without evidence.
pub fn next_version(current: &Version, commits: &[CommitRecord]) -> Result<Version, VersionError> {
    if commits.is_empty() {
        return Err(VersionError::NoCommitsSinceRelease);
    }

    let intent = bump_intent(max_signal(commits), current);
    Ok(apply_bump(current, intent))
}

/// Highest change signal across the whole sequence.
fn max_signal(commits: &[CommitRecord]) -> ChangeSignal {
    let mut highest = ChangeSignal::None;

    for commit in commits {
        let signal = classify(&commit.message);
        if signal == ChangeSignal::Breaking {
            // Nothing outranks a breaking change.
            return ChangeSignal::Breaking;
        }
        if signal > highest {
            highest = signal;
        }
    }

    highest
}

/// Map the folded signal to the bump to apply.
///
/// Per semver, major version zero (0.y.z) is for initial development:
/// breaking changes must not automatically cross into 1.0.0, so the intent
/// is downgraded to a minor bump.
fn bump_intent(signal: ChangeSignal, current: &Version) -> BumpIntent {
    match signal {
        ChangeSignal::Breaking if current.major == 0 => BumpIntent::Minor,
        ChangeSignal::Breaking => BumpIntent::Major,
        ChangeSignal::Feature => BumpIntent::Minor,
        ChangeSignal::Fix | ChangeSignal::None => BumpIntent::Patch,
    }
}

/// Apply exactly one bump, resetting the lower fields to zero.
///
/// Returns a new value; the base version is never mutated. Prerelease and
/// build metadata of the base never survive a bump.
pub fn apply_bump(current: &Version, intent: BumpIntent) -> Version {
    match intent {
        BumpIntent::Major => Version::new(current.major + 1, 0, 0),
        BumpIntent::Minor => Version::new(current.major, current.minor + 1, 0),
        BumpIntent::Patch => Version::new(current.major, current.minor, current.patch + 1),
    }
}

/// Strictly parse the version a release tag points at.
///
/// Handles both "v1.2.3" and "1.2.3" tag formats. A malformed base is fatal:
/// there is nothing safe to bump from.
pub fn parse_base_version(tag: &str) -> Result<Version, VersionError> {
    let raw = tag.strip_prefix('v').unwrap_or(tag);
    Version::parse(raw).map_err(|source| VersionError::InvalidBaseVersion {
        input: tag.to_string(),
        source,
    })
}

/// Strictly parse an explicit version override.
pub fn parse_version_input(input: &str) -> Result<Version, VersionError> {
    let raw = input.strip_prefix('v').unwrap_or(input);
    Version::parse(raw).map_err(|source| VersionError::InvalidVersionInput {
        input: input.to_string(),
        source,
    })
}
