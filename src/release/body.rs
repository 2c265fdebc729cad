//! Release PR text rendering: commit message, PR body, release metadata.

use serde::{Deserialize, Serialize};

use crate::artifact::AttachedArtifact;
use crate::github::DraftRelease;

/// GitHub rejects PR bodies longer than this.
pub const MAX_BODY_LENGTH: usize = 65536;

const META_OPEN: &str = "<!-- <release-meta>";
const META_CLOSE: &str = "</release-meta> -->";
const TRUNCATION_NOTICE: &str = "\n\n_Release notes truncated._";

/// Metadata the publish flow needs to recover from the PR body.
///
/// Strictly non-sensitive data: it is embedded in a public PR body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseMeta {
    pub id: u64,
    pub version: String,
}

/// Substitute `{version}` in the configured release commit message.
pub fn render_commit_message(template: &str, version: &str) -> String {
    template.replace("{version}", version)
}

/// Render the release PR body.
///
/// The metadata comment comes first so truncation can never cut it off.
pub fn render_pr_body(
    meta: &ReleaseMeta,
    draft: &DraftRelease,
    notes: &str,
    author: &str,
    artifact: Option<&AttachedArtifact>,
) -> String {
    let meta_json = serde_json::to_string(meta).unwrap_or_default();

    let mut body = format!(
        "{META_OPEN}{meta_json}{META_CLOSE}\n\n\
         ## Release {version}\n\n\
         This pull request was opened by shipwright on behalf of @{author}.\n\
         Merging it will publish the draft release [{version}]({url}).\n",
        version = meta.version,
        url = draft.html_url,
    );

    if let Some(artifact) = artifact {
        body.push_str(&format!(
            "\nBuild artifact `{}` is attached to the draft release (SHA-256 `{}`).\n",
            artifact.name, artifact.sha256
        ));
    }

    body.push_str("\n### Release notes\n\n");
    body.push_str(notes);
    body.push('\n');

    truncate_to_limit(body)
}

/// Recover the release metadata embedded in a PR body.
pub fn extract_release_meta(body: &str) -> Option<ReleaseMeta> {
    let start = body.find(META_OPEN)? + META_OPEN.len();
    let end = start + body[start..].find(META_CLOSE)?;
    serde_json::from_str(body[start..end].trim()).ok()
}

fn truncate_to_limit(mut body: String) -> String {
    if body.len() <= MAX_BODY_LENGTH {
        return body;
    }

    let mut cut = MAX_BODY_LENGTH - TRUNCATION_NOTICE.len();
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    body.truncate(cut);
    body.push_str(TRUNCATION_NOTICE);
    body
}
