//! Issue model and the get/create/edit operations

use chrono::{DateTime, Utc};
use reqwest::header::LOCATION;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::expect_status;
use crate::{Error, GitHubClient, Result};

/// Issue state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
    /// Any state the service adds that this client does not know about
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for IssueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueState::Open => write!(f, "open"),
            IssueState::Closed => write!(f, "closed"),
            IssueState::Unknown => write!(f, "unknown"),
        }
    }
}

/// GitHub issue as exchanged on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue number, unique per repository
    pub number: u64,
    /// Web URL of the issue
    #[serde(default)]
    pub html_url: String,
    /// Issue title
    pub title: String,
    /// Current state
    pub state: IssueState,
    /// Author of the issue
    #[serde(default)]
    pub user: Option<Author>,
    /// Assigned user, if any
    #[serde(default)]
    pub assignee: Option<Assignee>,
    /// When the issue was created
    pub created_at: DateTime<Utc>,
    /// Issue body text
    #[serde(default)]
    pub body: Option<String>,
    /// Label attached to the issue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Issue author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    /// Login name
    pub login: String,
    /// Web URL of the author's profile
    #[serde(default)]
    pub html_url: String,
}

/// Assigned user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignee {
    /// Login name
    pub login: String,
}

/// Fields for a new issue
#[derive(Debug, Clone, Serialize)]
pub struct IssueDraft {
    /// Issue title
    pub title: String,
    /// Issue body text
    pub body: String,
    /// Label to attach, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Fields for a partial issue update
#[derive(Debug, Clone)]
pub struct IssuePatch {
    /// Number of the issue to update
    pub number: u64,
    /// New state, if changing
    pub state: Option<IssueState>,
    /// New label, if changing
    pub label: Option<String>,
}

/// Outgoing PATCH body: the fetched title merged with the caller's changes
#[derive(Debug, Serialize)]
struct EditBody<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<IssueState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,
}

impl GitHubClient {
    /// Fetch a single issue by number
    pub async fn get_issue(&self, number: u64) -> Result<Issue> {
        debug!(number, "fetching issue");

        let url = self.issues_url(Some(number));
        let response = self.send(Method::GET, &url, None).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::IssueNotFound(number));
        }
        let response = expect_status(response, StatusCode::OK).await?;

        let body = response.text().await?;
        let issue = serde_json::from_str(&body)?;
        Ok(issue)
    }

    /// Create an issue and return the URL of the created resource
    ///
    /// The URL comes from the response's `Location` header; the service
    /// does not guarantee a body on creation. A 201 without that header
    /// is a protocol inconsistency and is reported as an error.
    pub async fn create_issue(&self, draft: &IssueDraft) -> Result<String> {
        debug!(title = %draft.title, "creating issue");

        let url = self.issues_url(None);
        let body = serde_json::to_value(draft)?;
        let response = self.send(Method::POST, &url, Some(body)).await?;
        let response = expect_status(response, StatusCode::CREATED).await?;

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or(Error::MissingLocation)?;

        info!(%location, "issue created");
        Ok(location)
    }

    /// Update an issue's state and/or label
    ///
    /// The update protocol requires the title field on every PATCH, so
    /// the current issue is fetched first and its title carried into the
    /// outgoing body. Skipping that step would blank the title on
    /// deployments that treat a missing field as an empty one.
    pub async fn edit_issue(&self, patch: &IssuePatch) -> Result<()> {
        debug!(number = patch.number, "editing issue");

        let current = self.get_issue(patch.number).await?;

        let body = serde_json::to_value(EditBody {
            title: &current.title,
            state: patch.state,
            label: patch.label.as_deref(),
        })?;

        let url = self.issues_url(Some(patch.number));
        let response = self.send(Method::PATCH, &url, Some(body)).await?;
        expect_status(response, StatusCode::OK).await?;

        info!(number = patch.number, "issue updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::json;

    fn issue_json(number: u64, title: &str) -> serde_json::Value {
        json!({
            "number": number,
            "html_url": format!("https://github.com/o/r/issues/{number}"),
            "title": title,
            "state": "open",
            "user": {"login": "alice", "html_url": "https://github.com/alice"},
            "assignee": {"login": "bob"},
            "created_at": "2019-06-01T12:00:00Z",
            "body": "something is broken",
            "label": "bug"
        })
    }

    fn client_for(server: &ServerGuard) -> GitHubClient {
        GitHubClient::with_base_url("o/r", "secret", server.url()).unwrap()
    }

    #[test]
    fn issue_wire_round_trip() {
        let issue: Issue = serde_json::from_value(issue_json(42, "Bug A")).unwrap();
        assert_eq!(issue.number, 42);
        assert_eq!(issue.state, IssueState::Open);
        assert_eq!(issue.user.as_ref().unwrap().login, "alice");
        assert_eq!(issue.assignee.as_ref().unwrap().login, "bob");
        assert_eq!(issue.label.as_deref(), Some("bug"));

        let encoded = serde_json::to_string(&issue).unwrap();
        let decoded: Issue = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, issue);
    }

    #[test]
    fn issue_state_serde() {
        assert_eq!(
            serde_json::from_str::<IssueState>("\"closed\"").unwrap(),
            IssueState::Closed
        );
        assert_eq!(
            serde_json::from_str::<IssueState>("\"reopened\"").unwrap(),
            IssueState::Unknown
        );
        assert_eq!(serde_json::to_string(&IssueState::Open).unwrap(), "\"open\"");
    }

    #[test]
    fn issue_tolerates_null_body_and_assignee() {
        let issue: Issue = serde_json::from_value(json!({
            "number": 1,
            "title": "t",
            "state": "open",
            "created_at": "2019-06-01T12:00:00Z",
            "body": null,
            "assignee": null
        }))
        .unwrap();
        assert!(issue.body.is_none());
        assert!(issue.assignee.is_none());
    }

    #[tokio::test]
    async fn get_issue_decodes_payload() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/o/r/issues/42")
            .match_header("authorization", "token secret")
            .with_status(200)
            .with_body(issue_json(42, "Bug A").to_string())
            .create_async()
            .await;

        let issue = client_for(&server).get_issue(42).await.unwrap();
        assert_eq!(issue.title, "Bug A");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn get_issue_404_is_not_found_even_with_parseable_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/o/r/issues/42")
            .with_status(404)
            .with_body(issue_json(42, "Bug A").to_string())
            .create_async()
            .await;

        let err = client_for(&server).get_issue(42).await.unwrap_err();
        assert!(matches!(err, Error::IssueNotFound(42)));
    }

    #[tokio::test]
    async fn get_issue_unexpected_status_is_api_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/o/r/issues/1")
            .with_status(403)
            .with_body(r#"{"message": "Forbidden"}"#)
            .create_async()
            .await;

        let err = client_for(&server).get_issue(1).await.unwrap_err();
        match err {
            Error::Api { status, detail } => {
                assert_eq!(status, StatusCode::FORBIDDEN);
                assert_eq!(detail.message, "Forbidden");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_issue_malformed_success_body_is_decode_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/o/r/issues/1")
            .with_status(200)
            .with_body(r#"{"unexpected": true}"#)
            .create_async()
            .await;

        let err = client_for(&server).get_issue(1).await.unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn create_issue_returns_location() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/repos/o/r/issues")
            .match_header("authorization", "token secret")
            .match_body(Matcher::PartialJson(json!({
                "title": "Bug A",
                "body": "details"
            })))
            .with_status(201)
            .with_header("location", "https://api.github.com/repos/o/r/issues/43")
            .create_async()
            .await;

        let draft = IssueDraft {
            title: "Bug A".to_string(),
            body: "details".to_string(),
            label: None,
        };
        let url = client_for(&server).create_issue(&draft).await.unwrap();
        assert_eq!(url, "https://api.github.com/repos/o/r/issues/43");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn create_issue_without_location_is_an_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/repos/o/r/issues")
            .with_status(201)
            .create_async()
            .await;

        let draft = IssueDraft {
            title: "Bug A".to_string(),
            body: String::new(),
            label: None,
        };
        let err = client_for(&server).create_issue(&draft).await.unwrap_err();
        assert!(matches!(err, Error::MissingLocation));
    }

    #[tokio::test]
    async fn create_issue_validation_failure_carries_detail() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/repos/o/r/issues")
            .with_status(422)
            .with_body(
                json!({
                    "message": "Validation Failed",
                    "errors": [{"resource": "Issue", "field": "title", "code": "missing_field"}]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let draft = IssueDraft {
            title: String::new(),
            body: String::new(),
            label: None,
        };
        let err = client_for(&server).create_issue(&draft).await.unwrap_err();
        match err {
            Error::Api { status, detail } => {
                assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
                assert_eq!(detail.errors[0].code, "missing_field");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn edit_issue_merges_fetched_title_into_patch() {
        let mut server = Server::new_async().await;
        let get = server
            .mock("GET", "/repos/o/r/issues/42")
            .with_status(200)
            .with_body(issue_json(42, "Bug A").to_string())
            .create_async()
            .await;
        let patch = server
            .mock("PATCH", "/repos/o/r/issues/42")
            .match_body(Matcher::PartialJson(json!({
                "title": "Bug A",
                "state": "closed"
            })))
            .with_status(200)
            .with_body(issue_json(42, "Bug A").to_string())
            .create_async()
            .await;

        client_for(&server)
            .edit_issue(&IssuePatch {
                number: 42,
                state: Some(IssueState::Closed),
                label: None,
            })
            .await
            .unwrap();

        get.assert_async().await;
        patch.assert_async().await;
    }

    #[tokio::test]
    async fn edit_issue_aborts_when_fetch_fails() {
        let mut server = Server::new_async().await;
        let _get = server
            .mock("GET", "/repos/o/r/issues/42")
            .with_status(404)
            .create_async()
            .await;
        let patch = server
            .mock("PATCH", "/repos/o/r/issues/42")
            .expect(0)
            .create_async()
            .await;

        let err = client_for(&server)
            .edit_issue(&IssuePatch {
                number: 42,
                state: Some(IssueState::Closed),
                label: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::IssueNotFound(42)));
        patch.assert_async().await;
    }
}
