//! Integration tests for linked-issue notification.

mod common;

use common::{mock_client, mock_user};
use serde_json::json;
use shipwright::notify::notify_linked_issues;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mock_comment(id: u64) -> serde_json::Value {
    json!({
        "id": id,
        "node_id": format!("IC_{id}"),
        "url": format!("https://api.github.com/repos/owner/repo/issues/comments/{id}"),
        "html_url": format!("https://github.com/owner/repo/issues/10#issuecomment-{id}"),
        "issue_url": "https://api.github.com/repos/owner/repo/issues/10",
        "body": "comment",
        "user": mock_user("shipwright", 100),
        "created_at": "2024-07-01T10:00:00Z",
        "updated_at": "2024-07-01T10:00:00Z",
        "author_association": "NONE"
    })
}

#[tokio::test]
async fn test_no_linked_issues_posts_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "repository": {
                    "pullRequest": { "closingIssuesReferences": {} }
                }
            }
        })))
        .mount(&server)
        .await;

    // No comment mock mounted: posting would fail the test with a 404 error.
    let notes = "* chore 15 by @people in https://github.com/owner/repo/pull/13";
    let client = mock_client(&server).await;

    let notified = notify_linked_issues(
        &client,
        "owner",
        "repo",
        notes,
        "https://github.com/owner/repo/releases/tag/v1.1.0",
        "v1.1.0",
    )
    .await
    .unwrap();

    assert_eq!(notified, 0);
}

#[tokio::test]
async fn test_comments_on_every_linked_issue() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "repository": {
                    "pullRequest": {
                        "closingIssuesReferences": {
                            "nodes": [{ "number": 10 }, { "number": 15 }]
                        }
                    }
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    for issue in [10u64, 15] {
        Mock::given(method("POST"))
            .and(path(format!("/repos/owner/repo/issues/{issue}/comments")))
            .and(body_partial_json(json!({})))
            .respond_with(ResponseTemplate::new(201).set_body_json(mock_comment(issue * 100)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let notes = "* chore 15 by @people in https://github.com/owner/repo/pull/13";
    let client = mock_client(&server).await;

    let notified = notify_linked_issues(
        &client,
        "owner",
        "repo",
        notes,
        "https://github.com/owner/repo/releases/tag/v1.1.0",
        "v1.1.0",
    )
    .await
    .unwrap();

    assert_eq!(notified, 2);
}

#[tokio::test]
async fn test_no_pr_references_skips_graphql_entirely() {
    let server = MockServer::start().await;

    // Neither /graphql nor the comments endpoints are mocked: any call
    // would error out and fail the run.
    let notes = "**Full Changelog**: https://github.com/owner/repo/compare/v1.0.0...v1.1.0";
    let client = mock_client(&server).await;

    let notified = notify_linked_issues(
        &client,
        "owner",
        "repo",
        notes,
        "https://github.com/owner/repo/releases/tag/v1.1.0",
        "v1.1.0",
    )
    .await
    .unwrap();

    assert_eq!(notified, 0);
}
