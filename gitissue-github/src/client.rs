//! GitHub API client built on reqwest

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, Response};
use tracing::{debug, info};

use crate::{Error, Result};

/// Default API endpoint for github.com
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// GitHub API client for issue operations against one repository
///
/// Holds the bearer token for the duration of its life but never
/// persists it; storage is the caller's concern.
pub struct GitHubClient {
    http: reqwest::Client,
    api_base: String,
    owner: String,
    repo: String,
    token: String,
}

impl GitHubClient {
    /// Create a client for the given repository, authenticating with `token`
    ///
    /// Accepted repository formats:
    /// - owner/repo
    /// - https://github.com/owner/repo
    /// - git@github.com:owner/repo.git
    pub fn new(repo_spec: &str, token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(repo_spec, token, GITHUB_API_URL)
    }

    /// Create a client against an alternate API endpoint (GitHub Enterprise)
    pub fn with_base_url(
        repo_spec: &str,
        token: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Result<Self> {
        let (owner, repo) = parse_repo_spec(repo_spec)?;
        let api_base = api_base.into().trim_end_matches('/').to_string();

        info!(owner = %owner, repo = %repo, "created GitHub client");

        Ok(Self {
            http: reqwest::Client::new(),
            api_base,
            owner,
            repo,
            token: token.into(),
        })
    }

    /// Repository owner
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name
    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub(crate) fn api_base(&self) -> &str {
        &self.api_base
    }

    /// URL of the issues collection, or of one issue when `number` is given
    pub(crate) fn issues_url(&self, number: Option<u64>) -> String {
        match number {
            Some(n) => format!(
                "{}/repos/{}/{}/issues/{}",
                self.api_base, self.owner, self.repo, n
            ),
            None => format!("{}/repos/{}/{}/issues", self.api_base, self.owner, self.repo),
        }
    }

    /// Issue one authenticated request and return the raw response
    ///
    /// Attaches the `Authorization: token <t>` header; no retry, no
    /// timeout beyond the client default. Network failures surface as
    /// [`Error::Transport`], never as an API error.
    pub(crate) async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response> {
        debug!(%method, url, "sending request");

        let mut request = self
            .http
            .request(method, url)
            .header(AUTHORIZATION, format!("token {}", self.token));

        if let Some(body) = body {
            request = request.json(&body);
        }

        Ok(request.send().await?)
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_base", &self.api_base)
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}

/// Parse a repository specifier into owner and repo
fn parse_repo_spec(spec: &str) -> Result<(String, String)> {
    // HTTPS URL: https://github.com/owner/repo[.git]
    if spec.starts_with("https://") || spec.starts_with("http://") {
        let url = url::Url::parse(spec).map_err(|e| Error::InvalidRepo(e.to_string()))?;
        let path = url.path().trim_start_matches('/').trim_end_matches(".git");
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() >= 2 && !parts[0].is_empty() && !parts[1].is_empty() {
            return Ok((parts[0].to_string(), parts[1].to_string()));
        }
        return Err(Error::InvalidRepo(spec.to_string()));
    }

    // SSH URL: git@github.com:owner/repo.git
    if spec.starts_with("git@") {
        if let Some(path) = spec.split(':').nth(1) {
            let path = path.trim_end_matches(".git");
            let parts: Vec<&str> = path.split('/').collect();
            if parts.len() >= 2 {
                return Ok((parts[0].to_string(), parts[1].to_string()));
            }
        }
        return Err(Error::InvalidRepo(spec.to_string()));
    }

    // Shorthand: owner/repo
    let parts: Vec<&str> = spec.split('/').collect();
    if parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty() {
        return Ok((
            parts[0].to_string(),
            parts[1].trim_end_matches(".git").to_string(),
        ));
    }

    Err(Error::InvalidRepo(format!(
        "{spec} (expected owner/repo)"
    )))
}
