//! Shared test utilities for integration tests.
//!
//! Not all helpers are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use serde_json::{Map, Value, json};
use wiremock::MockServer;

/// Create an octocrab client pointing at a mock server.
pub async fn mock_client(server: &MockServer) -> Octocrab {
    Octocrab::builder()
        .base_uri(server.uri())
        .expect("Failed to set base URI")
        .build()
        .expect("Failed to build octocrab")
}

/// A mock user object with the fields GitHub API responses carry.
pub fn mock_user(login: &str, id: u64) -> Value {
    json!({
        "login": login,
        "id": id,
        "node_id": format!("U_{id}"),
        "avatar_url": format!("https://avatars.githubusercontent.com/u/{id}?v=4"),
        "gravatar_id": "",
        "url": format!("https://api.github.com/users/{login}"),
        "html_url": format!("https://github.com/{login}"),
        "followers_url": format!("https://api.github.com/users/{login}/followers"),
        "following_url": format!("https://api.github.com/users/{login}/following{{/other_user}}"),
        "gists_url": format!("https://api.github.com/users/{login}/gists{{/gist_id}}"),
        "starred_url": format!("https://api.github.com/users/{login}/starred{{/owner}}{{/repo}}"),
        "subscriptions_url": format!("https://api.github.com/users/{login}/subscriptions"),
        "organizations_url": format!("https://api.github.com/users/{login}/orgs"),
        "repos_url": format!("https://api.github.com/users/{login}/repos"),
        "events_url": format!("https://api.github.com/users/{login}/events{{/privacy}}"),
        "received_events_url": format!("https://api.github.com/users/{login}/received_events"),
        "type": "Bot",
        "site_admin": false
    })
}

/// A commit object as returned by the commits list and single-commit
/// endpoints, reduced to what shipwright deserializes.
pub fn mock_commit(sha: &str, message: &str, date: Option<DateTime<Utc>>) -> Value {
    let committer = date.map(|d| {
        json!({
            "name": "Test Committer",
            "email": "committer@example.com",
            "date": d.to_rfc3339(),
        })
    });

    json!({
        "sha": sha,
        "node_id": format!("C_{sha}"),
        "url": format!("https://api.github.com/repos/owner/repo/commits/{sha}"),
        "html_url": format!("https://github.com/owner/repo/commit/{sha}"),
        "commit": {
            "message": message,
            "author": committer.clone(),
            "committer": committer,
            "comment_count": 0,
        }
    })
}

/// A release object complete enough for octocrab's Release model.
pub fn mock_release(id: u64, tag_name: &str, draft: bool, body: Option<&str>) -> Value {
    json!({
        "url": format!("https://api.github.com/repos/owner/repo/releases/{id}"),
        "html_url": format!("https://github.com/owner/repo/releases/tag/{tag_name}"),
        "assets_url": format!("https://api.github.com/repos/owner/repo/releases/{id}/assets"),
        "upload_url": format!("https://uploads.github.com/repos/owner/repo/releases/{id}/assets{{?name,label}}"),
        "tarball_url": format!("https://api.github.com/repos/owner/repo/tarball/{tag_name}"),
        "zipball_url": format!("https://api.github.com/repos/owner/repo/zipball/{tag_name}"),
        "id": id,
        "node_id": format!("R_{id}"),
        "tag_name": tag_name,
        "target_commitish": "main",
        "name": tag_name,
        "body": body,
        "draft": draft,
        "prerelease": false,
        "created_at": "2024-01-01T00:00:00Z",
        "published_at": if draft { Value::Null } else { json!("2024-01-02T00:00:00Z") },
        "author": mock_user("shipwright", 1),
        "assets": []
    })
}

/// A pull request object complete enough for octocrab's PullRequest model.
///
/// Built with a Map to avoid json! macro recursion limits.
pub fn mock_pr(
    number: u64,
    title: &str,
    body: Option<&str>,
    base_ref: &str,
    merged_at: Option<DateTime<Utc>>,
) -> Value {
    let user = mock_user("shipwright", 100);
    let repo = mock_repo();

    let head = json!({
        "label": format!("owner:release/v{number}"),
        "ref": format!("release/v{number}"),
        "sha": "abc123def456789",
        "user": user.clone(),
        "repo": repo.clone()
    });

    let base = json!({
        "label": format!("owner:{base_ref}"),
        "ref": base_ref,
        "sha": "def456abc789",
        "user": mock_user("owner", 1),
        "repo": repo
    });

    let links = json!({
        "self": { "href": format!("https://api.github.com/repos/owner/repo/pulls/{number}") },
        "html": { "href": format!("https://github.com/owner/repo/pull/{number}") },
        "issue": { "href": format!("https://api.github.com/repos/owner/repo/issues/{number}") },
        "comments": { "href": format!("https://api.github.com/repos/owner/repo/issues/{number}/comments") },
        "review_comments": { "href": format!("https://api.github.com/repos/owner/repo/pulls/{number}/comments") },
        "review_comment": { "href": "https://api.github.com/repos/owner/repo/pulls/comments{/number}" },
        "commits": { "href": format!("https://api.github.com/repos/owner/repo/pulls/{number}/commits") },
        "statuses": { "href": "https://api.github.com/repos/owner/repo/statuses/abc123def456789" }
    });

    let mut pr = Map::new();
    pr.insert("url".into(), json!(format!("https://api.github.com/repos/owner/repo/pulls/{number}")));
    pr.insert("id".into(), json!(number * 1000));
    pr.insert("node_id".into(), json!(format!("PR_{number}")));
    pr.insert("html_url".into(), json!(format!("https://github.com/owner/repo/pull/{number}")));
    pr.insert("diff_url".into(), json!(format!("https://github.com/owner/repo/pull/{number}.diff")));
    pr.insert("patch_url".into(), json!(format!("https://github.com/owner/repo/pull/{number}.patch")));
    pr.insert("issue_url".into(), json!(format!("https://api.github.com/repos/owner/repo/issues/{number}")));
    pr.insert("commits_url".into(), json!(format!("https://api.github.com/repos/owner/repo/pulls/{number}/commits")));
    pr.insert("review_comments_url".into(), json!(format!("https://api.github.com/repos/owner/repo/pulls/{number}/comments")));
    pr.insert("review_comment_url".into(), json!("https://api.github.com/repos/owner/repo/pulls/comments{/number}"));
    pr.insert("comments_url".into(), json!(format!("https://api.github.com/repos/owner/repo/issues/{number}/comments")));
    pr.insert("statuses_url".into(), json!("https://api.github.com/repos/owner/repo/statuses/abc123"));
    pr.insert("number".into(), json!(number));
    pr.insert("state".into(), json!(if merged_at.is_some() { "closed" } else { "open" }));
    pr.insert("locked".into(), json!(false));
    pr.insert("title".into(), json!(title));
    pr.insert("body".into(), json!(body));
    pr.insert("user".into(), user);
    pr.insert("labels".into(), json!([]));
    pr.insert("assignee".into(), Value::Null);
    pr.insert("assignees".into(), json!([]));
    pr.insert("requested_reviewers".into(), json!([]));
    pr.insert("requested_teams".into(), json!([]));
    pr.insert("milestone".into(), Value::Null);
    pr.insert("created_at".into(), json!("2024-01-01T00:00:00Z"));
    pr.insert("updated_at".into(), json!("2024-01-15T00:00:00Z"));
    pr.insert("closed_at".into(), json!(merged_at.map(|d| d.to_rfc3339())));
    pr.insert("merged_at".into(), json!(merged_at.map(|d| d.to_rfc3339())));
    pr.insert("merge_commit_sha".into(), json!("abc123def456"));
    pr.insert("head".into(), head);
    pr.insert("base".into(), base);
    pr.insert("draft".into(), json!(false));
    pr.insert("merged".into(), json!(merged_at.is_some()));
    pr.insert("mergeable".into(), json!(true));
    pr.insert("mergeable_state".into(), json!("clean"));
    pr.insert("merged_by".into(), json!(merged_at.map(|_| mock_user("merger", 200))));
    pr.insert("comments".into(), json!(0));
    pr.insert("review_comments".into(), json!(0));
    pr.insert("maintainer_can_modify".into(), json!(true));
    pr.insert("commits".into(), json!(1));
    pr.insert("additions".into(), json!(10));
    pr.insert("deletions".into(), json!(2));
    pr.insert("changed_files".into(), json!(1));
    pr.insert("_links".into(), links);

    Value::Object(pr)
}

/// A repository object with the fields PR payloads embed.
pub fn mock_repo() -> Value {
    json!({
        "id": 1,
        "node_id": "R_1",
        "name": "repo",
        "full_name": "owner/repo",
        "owner": mock_user("owner", 1),
        "private": false,
        "html_url": "https://github.com/owner/repo",
        "description": "Test repository",
        "fork": false,
        "url": "https://api.github.com/repos/owner/repo"
    })
}
