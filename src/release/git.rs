//! Git operations for the release branch pipeline.
//!
//! Branch creation, commit and push shell out to the system `git` binary,
//! inheriting the CI job's existing git config and credentials. Reads go
//! through git2.

use std::process::Command;

use git2::Repository;

use crate::error::ReleaseError;

/// Create and switch to the release branch.
pub fn create_release_branch(branch: &str) -> Result<(), ReleaseError> {
    run_git(&["checkout", "-b", branch], "checkout")
}

/// Stage everything the version-set step touched.
pub fn stage_all() -> Result<(), ReleaseError> {
    run_git(&["add", "-A"], "stage files")
}

/// Create the release commit.
pub fn commit(message: &str) -> Result<(), ReleaseError> {
    run_git(&["commit", "-m", message], "create commit")
}

/// Push the release branch.
pub fn push_branch(remote: &str, branch: &str) -> Result<(), ReleaseError> {
    run_git(&["push", remote, branch], "push")
}

/// Delete a pushed release branch after a failed PR creation.
pub fn delete_remote_branch(remote: &str, branch: &str) -> Result<(), ReleaseError> {
    run_git(&["push", remote, "--delete", branch], "delete remote branch")
}

/// Resolve the commit id HEAD points at, the target for the draft release.
pub fn head_commit_id(repo: &Repository) -> Result<String, ReleaseError> {
    let head = repo.head().map_err(ReleaseError::HeadResolution)?;

    head.target()
        .map(|oid| oid.to_string())
        .ok_or_else(|| ReleaseError::GitFailed {
            operation: "resolve HEAD".to_string(),
            stderr: "HEAD is a symbolic reference with no target".to_string(),
        })
}

/// Run a git command and return success or a descriptive error.
fn run_git(args: &[&str], operation: &str) -> Result<(), ReleaseError> {
    let output = Command::new("git")
        .args(args)
        .output()
        .map_err(|source| ReleaseError::SpawnFailed {
            program: "git".to_string(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ReleaseError::GitFailed {
            operation: operation.to_string(),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(())
}
