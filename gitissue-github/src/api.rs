//! Response envelope interpretation
//!
//! GitHub signals failure through the HTTP status code plus a structured
//! JSON error body. Every operation funnels its response through
//! [`expect_status`] so status matching and error decoding happen in one
//! place instead of ad hoc at each call site.

use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Structured error body returned by the API on failure
///
/// The shape is `{message, errors: [{resource, field, code}]}`. An error
/// response whose body fails to parse decodes to the default (empty)
/// value rather than masking the underlying API failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiError {
    /// Human-readable summary
    #[serde(default)]
    pub message: String,
    /// Field-level detail entries
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

/// A single field-level error entry
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FieldError {
    /// Resource the error applies to (e.g. "Issue")
    #[serde(default)]
    pub resource: String,
    /// Offending field name
    #[serde(default)]
    pub field: String,
    /// Error code (e.g. "missing_field")
    #[serde(default)]
    pub code: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.message.is_empty() {
            write!(f, "(no detail)")?;
        } else {
            write!(f, "{}", self.message)?;
        }
        for e in &self.errors {
            write!(f, "; {} {}: {}", e.resource, e.field, e.code)?;
        }
        Ok(())
    }
}

/// Classify a response against the status the operation expects
///
/// On a match the response is handed back for payload decoding. On a
/// mismatch the body is decoded as [`ApiError`] (falling back to an empty
/// one) and the whole thing becomes [`Error::Api`].
pub(crate) async fn expect_status(response: Response, expected: StatusCode) -> Result<Response> {
    let status = response.status();
    if status == expected {
        return Ok(response);
    }

    debug!(%status, %expected, "unexpected API status");
    let detail = response.json::<ApiError>().await.unwrap_or_default();
    Err(Error::Api { status, detail })
}
