// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the feedback API.
//!
//! Provides [`ApiClient`] which handles request construction and response
//! parsing. There are no automatic retries anywhere: submission is not
//! idempotent, and every failure is reported straight back to the caller.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use tellbox_core::{FeedbackRecord, NewFeedback, SortDirection, TellboxError};

/// Request timeout for all API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One page of feedback as returned by GET /feedback.
///
/// `page`, `limit`, and `sort` are the *effective* values the server used
/// after clamping, which may differ from what was requested.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingPage {
    pub data: Vec<FeedbackRecord>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub sort: SortDirection,
}

/// Response body for a successful POST /feedback.
#[derive(Debug, Deserialize)]
struct SubmitResponseBody {
    data: FeedbackRecord,
}

/// Response body for GET /health.
#[derive(Debug, Deserialize)]
struct HealthBody {
    ok: bool,
}

/// Error response body used by the API for 4xx/5xx answers.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// HTTP client for feedback API communication.
///
/// Manages connection pooling and a shared request timeout.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a new API client against the given base URL
    /// (e.g. `http://localhost:4000`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, TellboxError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TellboxError::Http {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submits one feedback record and returns it as persisted.
    ///
    /// Never retried: a repeated submission would be a duplicate record.
    pub async fn submit_feedback(
        &self,
        submission: &NewFeedback,
    ) -> Result<FeedbackRecord, TellboxError> {
        let url = format!("{}/feedback", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(submission)
            .send()
            .await
            .map_err(|e| TellboxError::Http {
                message: format!("request to {url} failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "submit response received");

        if !status.is_success() {
            return Err(api_error(status, response).await);
        }

        let body = response.text().await.map_err(|e| TellboxError::Http {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        let parsed: SubmitResponseBody =
            serde_json::from_str(&body).map_err(|e| TellboxError::Http {
                message: format!("failed to parse submit response: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(parsed.data)
    }

    /// Fetches one page of feedback.
    ///
    /// Values are sent as-is; the server clamps out-of-range paging input
    /// and echoes the effective values in the response.
    pub async fn fetch_feedback(
        &self,
        page: i64,
        limit: i64,
        sort: SortDirection,
    ) -> Result<ListingPage, TellboxError> {
        let url = format!("{}/feedback", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("page", page.to_string()),
                ("limit", limit.to_string()),
                ("sort", sort.to_string()),
            ])
            .send()
            .await
            .map_err(|e| TellboxError::Http {
                message: format!("request to {url} failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "listing response received");

        if !status.is_success() {
            return Err(api_error(status, response).await);
        }

        let body = response.text().await.map_err(|e| TellboxError::Http {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        serde_json::from_str(&body).map_err(|e| TellboxError::Http {
            message: format!("failed to parse listing response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Probes GET /health.
    pub async fn health(&self) -> Result<(), TellboxError> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TellboxError::Http {
                message: format!("request to {url} failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(api_error(status, response).await);
        }

        let body: HealthBody = response.json().await.map_err(|e| TellboxError::Http {
            message: format!("failed to parse health response: {e}"),
            source: Some(Box::new(e)),
        })?;
        if !body.ok {
            return Err(TellboxError::Http {
                message: "service reported itself unhealthy".to_string(),
                source: None,
            });
        }
        Ok(())
    }
}

/// Maps a non-2xx response onto [`TellboxError::Http`], preferring the
/// API's own message when the body parses.
async fn api_error(status: reqwest::StatusCode, response: reqwest::Response) -> TellboxError {
    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(err) => format!("API returned {status}: {}", err.message),
        Err(_) => format!("API returned {status}: {body}"),
    };
    TellboxError::Http {
        message,
        source: None,
    }
}
