// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feedback submission service.
//!
//! Validates presence of every field, trims string input, and persists
//! exactly one record per successful call. Range checking of the rating is
//! left to the storage schema.

use serde::Deserialize;

use tellbox_core::{FeedbackRecord, FeedbackStore, NewFeedback, TellboxError};

/// Canonical rejection message for absent or blank fields.
const REQUIRED_MESSAGE: &str = "All fields are required";

/// Request body for POST /feedback.
///
/// Every field is optional at the wire level so that absence and blankness
/// are rejected by the service with the canonical message instead of a
/// deserializer error.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub rating: Option<i64>,
    #[serde(default)]
    pub feedback: Option<String>,
}

/// Returns the trimmed value when present and non-blank.
fn presence(value: Option<&str>) -> Option<&str> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Validate a submission and persist it.
///
/// All string fields must be non-blank after trimming and the rating must
/// be present and non-zero (a zero rating is what an untouched form control
/// submits, so it counts as absent). Validation failures carry the canonical
/// message and are never retried; neither are storage failures, since the
/// insert is not idempotent.
pub async fn submit(
    store: &dyn FeedbackStore,
    request: &SubmitRequest,
) -> Result<FeedbackRecord, TellboxError> {
    let (Some(name), Some(email), Some(phone), Some(feedback)) = (
        presence(request.name.as_deref()),
        presence(request.email.as_deref()),
        presence(request.phone.as_deref()),
        presence(request.feedback.as_deref()),
    ) else {
        return Err(TellboxError::validation(REQUIRED_MESSAGE));
    };

    let rating = match request.rating {
        Some(r) if r != 0 => r,
        _ => return Err(TellboxError::validation(REQUIRED_MESSAGE)),
    };

    let new = NewFeedback {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        rating,
        feedback: feedback.to_string(),
    };

    store.insert(&new).await
}
