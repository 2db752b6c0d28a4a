//! Bearer token issuance
//!
//! The authorizations endpoint predates token auth, so it is the one
//! call made with HTTP Basic credentials instead of a bearer token.
//! The password lives only for the duration of the exchange and is
//! never logged or persisted here.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::expect_status;
use crate::client::GITHUB_API_URL;
use crate::Result;

/// Scopes requested for every issued token
const TOKEN_SCOPES: [&str; 2] = ["repo", "user"];

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    scopes: Vec<&'a str>,
    note: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// Exchange basic credentials for a long-lived bearer token
///
/// `note` is a human-readable reminder attached to the token on the
/// service side. Returns the opaque token string; storing it is the
/// caller's concern.
pub async fn issue_token(username: &str, password: &str, note: &str) -> Result<String> {
    issue_token_at(GITHUB_API_URL, username, password, note).await
}

/// Same as [`issue_token`] against an alternate API endpoint
pub async fn issue_token_at(
    api_base: &str,
    username: &str,
    password: &str,
    note: &str,
) -> Result<String> {
    let url = format!("{}/authorizations", api_base.trim_end_matches('/'));
    debug!(username, note, "requesting token");

    let request = TokenRequest {
        scopes: TOKEN_SCOPES.to_vec(),
        note,
    };

    let response = reqwest::Client::new()
        .post(&url)
        .basic_auth(username, Some(password))
        .json(&request)
        .send()
        .await?;
    let response = expect_status(response, StatusCode::CREATED).await?;

    let body = response.text().await?;
    let decoded: TokenResponse = serde_json::from_str(&body)?;

    info!(note, "token issued");
    Ok(decoded.token)
}
