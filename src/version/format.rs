//! Final version-string rendering.

use semver::Version;

/// Render the version string used for tags, branch names and publishing.
///
/// Produces `{prefix}{major}.{minor}.{patch}`, followed by `-{pre}` where
/// `pre` is the version's own prerelease when it carries one (explicit
/// overrides like `2.0.0-beta`), otherwise the configured prerelease prefix.
pub fn format_version(version: &Version, prefix: &str, prerelease_prefix: Option<&str>) -> String {
    let mut out = format!(
        "{}{}.{}.{}",
        prefix, version.major, version.minor, version.patch
    );

    if !version.pre.is_empty() {
        out.push('-');
        out.push_str(version.pre.as_str());
    } else if let Some(pre) = prerelease_prefix.filter(|p| !p.is_empty()) {
        out.push('-');
        out.push_str(pre);
    }

    out
}
