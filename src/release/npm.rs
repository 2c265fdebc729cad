//! npm version plumbing.
//!
//! The package version is owned by npm, not by this bot: the pipeline sets
//! it with `npm version` and reads back whatever npm canonicalized.

use std::process::Command;

use which::which;

use crate::error::ReleaseError;

/// Check that npm is available before the pipeline starts mutating state.
pub fn check_npm_installed() -> Result<(), ReleaseError> {
    which("npm")
        .map(|_| ())
        .map_err(|_| ReleaseError::NpmNotInstalled)
}

/// Set the package version without tagging and return the canonical version
/// npm recorded.
pub fn set_package_version(version: &str) -> Result<String, ReleaseError> {
    run_npm(
        &["version", "--no-git-tag-version", version],
        "version",
    )?;

    let reported = run_npm(&["pkg", "get", "version"], "pkg get version")?;

    // `npm pkg get` prints the JSON string literal, quotes included.
    Ok(reported.trim().trim_matches('"').to_string())
}

fn run_npm(args: &[&str], operation: &str) -> Result<String, ReleaseError> {
    let output = Command::new("npm")
        .args(args)
        .output()
        .map_err(|source| ReleaseError::SpawnFailed {
            program: "npm".to_string(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ReleaseError::NpmFailed {
            operation: operation.to_string(),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
