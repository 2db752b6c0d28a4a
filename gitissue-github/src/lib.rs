//! gitissue-github - GitHub issues API client
//!
//! This crate talks to the GitHub REST API for the gitissue CLI:
//! fetching, creating, editing and searching issues, plus exchanging
//! basic credentials for a bearer token. Search follows the API's
//! `Link`-header pagination and merges all pages into one result.

mod api;
mod auth;
mod client;
mod error;
mod issues;
mod search;

pub use api::{ApiError, FieldError};
pub use auth::{issue_token, issue_token_at};
pub use client::{GitHubClient, GITHUB_API_URL};
pub use error::{Error, Result};
pub use issues::{Assignee, Author, Issue, IssueDraft, IssuePatch, IssueState};
pub use search::SearchResults;
