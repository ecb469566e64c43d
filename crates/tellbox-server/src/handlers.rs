// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the feedback REST API.
//!
//! Handles GET /, GET /health, POST /feedback, GET /feedback.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use tellbox_core::{FeedbackRecord, SortDirection, TellboxError};

use crate::listing::{self, ListQuery};
use crate::state::AppState;
use crate::submit::{self, SubmitRequest};

/// Response body for GET /.
#[derive(Debug, Serialize)]
pub struct RootResponse {
    /// Service banner.
    pub message: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// Response body for a successful POST /feedback.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    /// The persisted record, including its assigned id and timestamp.
    pub data: FeedbackRecord,
}

/// Response body for GET /feedback.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    /// Records for the requested page.
    pub data: Vec<FeedbackRecord>,
    /// Unfiltered total row count.
    pub total: i64,
    /// Effective page index.
    pub page: i64,
    /// Effective page size.
    pub limit: i64,
    /// Normalized sort direction.
    pub sort: SortDirection,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description safe to show the caller.
    pub message: String,
}

/// Maps [`TellboxError`] onto the wire contract.
///
/// Validation errors surface their message verbatim with status 400.
/// Everything else is logged server-side and collapsed into an opaque 500,
/// so storage internals never leak to the client.
pub struct ApiError(TellboxError);

impl From<TellboxError> for ApiError {
    fn from(err: TellboxError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            TellboxError::Validation { message } => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { message })).into_response()
            }
            other => {
                tracing::error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        message: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

/// GET /
///
/// Service banner for smoke checks.
pub async fn get_root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Feedback API is running".to_string(),
    })
}

/// GET /health
///
/// Liveness probe; reachability of the process is the signal.
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// POST /feedback
///
/// Validates and persists a submission. Returns 201 with the stored record,
/// 400 with the canonical message when a field is absent or blank, and 500
/// when persistence fails.
pub async fn post_feedback(
    State(state): State<AppState>,
    Json(body): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let record = submit::submit(state.store.as_ref(), &body).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { data: record })))
}

/// GET /feedback
///
/// Returns one page of records with the effective paging values echoed back.
pub async fn get_feedback(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>, ApiError> {
    let listing = listing::list(state.store.as_ref(), &query).await?;
    Ok(Json(ListResponse {
        data: listing.items,
        total: listing.total,
        page: listing.page,
        limit: listing.limit,
        sort: listing.sort,
    }))
}
