// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feedback form controller.
//!
//! Holds field state and per-field validation errors, and drives the
//! submission flow: validate locally, send, then either reset the form on
//! success or keep everything the user typed on failure.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use tellbox_core::{FeedbackRecord, NewFeedback};

use crate::client::ApiClient;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\+?[\d\s\-()]+$").unwrap());

/// Minimum trimmed feedback length.
const MIN_FEEDBACK_CHARS: usize = 10;

/// Notice shown after a successful submission.
pub const SUBMIT_SUCCESS: &str =
    "Thank you for your feedback! Your submission has been received.";

/// Notice shown when the submission could not be delivered.
pub const SUBMIT_FAILURE: &str = "Failed to submit feedback. Please try again.";

/// Per-field validation errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub rating: Option<String>,
    pub feedback: Option<String>,
}

impl FieldErrors {
    /// True when no field has an error.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.rating.is_none()
            && self.feedback.is_none()
    }
}

/// Outcome banner for the submission flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

/// Feedback form state.
///
/// A rating of 0 means "not selected yet". Editing a field clears that
/// field's error; the global notice survives edits until the next
/// submission attempt.
#[derive(Debug, Default)]
pub struct FeedbackForm {
    name: String,
    email: String,
    phone: String,
    rating: i64,
    feedback: String,
    errors: FieldErrors,
    notice: Option<Notice>,
    submitting: bool,
    created: Option<FeedbackRecord>,
}

impl FeedbackForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
        self.errors.name = None;
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
        self.errors.email = None;
    }

    pub fn set_phone(&mut self, value: impl Into<String>) {
        self.phone = value.into();
        self.errors.phone = None;
    }

    pub fn set_rating(&mut self, value: i64) {
        self.rating = value;
        self.errors.rating = None;
    }

    pub fn set_feedback(&mut self, value: impl Into<String>) {
        self.feedback = value.into();
        self.errors.feedback = None;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn rating(&self) -> i64 {
        self.rating
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// The record stored by the most recent successful submission.
    pub fn created(&self) -> Option<&FeedbackRecord> {
        self.created.as_ref()
    }

    /// Validates every field, replacing the previous error set.
    ///
    /// Format checks run against the raw value; only the presence checks
    /// trim first. Returns true when the form is submittable.
    pub fn validate(&mut self) -> bool {
        let mut errors = FieldErrors::default();

        if self.name.trim().is_empty() {
            errors.name = Some("Name is required".to_string());
        }

        if self.email.trim().is_empty() {
            errors.email = Some("Email is required".to_string());
        } else if !EMAIL_PATTERN.is_match(&self.email) {
            errors.email = Some("Invalid email format".to_string());
        }

        if self.phone.trim().is_empty() {
            errors.phone = Some("Phone is required".to_string());
        } else if !PHONE_PATTERN.is_match(&self.phone) {
            errors.phone = Some("Invalid phone format".to_string());
        }

        if self.rating == 0 {
            errors.rating = Some("Rating is required".to_string());
        }

        let feedback = self.feedback.trim();
        if feedback.is_empty() {
            errors.feedback = Some("Feedback is required".to_string());
        } else if feedback.chars().count() < MIN_FEEDBACK_CHARS {
            errors.feedback = Some("Feedback must be at least 10 characters".to_string());
        }

        let valid = errors.is_empty();
        self.errors = errors;
        valid
    }

    /// Attempts to submit the form. Returns true on success.
    ///
    /// No-op while a submission is already in flight. Validation failures
    /// never reach the network. On success every field resets and the
    /// success notice is set; on delivery failure the entered values stay
    /// put so the user can retry.
    pub async fn submit(&mut self, client: &ApiClient) -> bool {
        if self.submitting {
            return false;
        }

        self.notice = None;
        self.created = None;
        if !self.validate() {
            return false;
        }

        let submission = NewFeedback {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            rating: self.rating,
            feedback: self.feedback.trim().to_string(),
        };

        self.submitting = true;
        let result = client.submit_feedback(&submission).await;
        self.submitting = false;

        match result {
            Ok(record) => {
                self.reset_fields();
                self.notice = Some(Notice::Success(SUBMIT_SUCCESS.to_string()));
                self.created = Some(record);
                true
            }
            Err(err) => {
                warn!(error = %err, "feedback submission failed");
                self.notice = Some(Notice::Failure(SUBMIT_FAILURE.to_string()));
                false
            }
        }
    }

    fn reset_fields(&mut self) {
        self.name.clear();
        self.email.clear();
        self.phone.clear();
        self.rating = 0;
        self.feedback.clear();
        self.errors = FieldErrors::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn filled_form() -> FeedbackForm {
        let mut form = FeedbackForm::new();
        form.set_name("Ann");
        form.set_email("ann@example.com");
        form.set_phone("+1 (555) 010-0100");
        form.set_rating(5);
        form.set_feedback("Great service, would come back");
        form
    }

    fn created_response() -> ResponseTemplate {
        ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "data": {
                "id": 1,
                "name": "Ann",
                "email": "ann@example.com",
                "phone": "+1 (555) 010-0100",
                "rating": 5,
                "feedback": "Great service, would come back",
                "created_at": "2026-01-05T15:04:00.000Z"
            }
        }))
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let mut form = FeedbackForm::new();
        assert!(!form.validate());

        let errors = form.errors();
        assert_eq!(errors.name.as_deref(), Some("Name is required"));
        assert_eq!(errors.email.as_deref(), Some("Email is required"));
        assert_eq!(errors.phone.as_deref(), Some("Phone is required"));
        assert_eq!(errors.rating.as_deref(), Some("Rating is required"));
        assert_eq!(errors.feedback.as_deref(), Some("Feedback is required"));
    }

    #[test]
    fn filled_form_validates() {
        let mut form = filled_form();
        assert!(form.validate());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn email_format_is_checked_against_the_raw_value() {
        for bad in [
            "plainaddress",
            "user@example",
            "us er@example.com",
            "user@@example.com",
            " ann@example.com",
        ] {
            let mut form = filled_form();
            form.set_email(bad);
            assert!(!form.validate(), "{bad:?} should be invalid");
            assert_eq!(form.errors().email.as_deref(), Some("Invalid email format"));
        }

        for good in ["ann@example.com", "a@b.co", "first.last@sub.domain.org"] {
            let mut form = filled_form();
            form.set_email(good);
            assert!(form.validate(), "{good:?} should be valid");
        }
    }

    #[test]
    fn phone_format_allows_digits_spaces_and_punctuation() {
        for good in ["+1 (555) 010-0100", "5550100", "555 0100", "(555)0100"] {
            let mut form = filled_form();
            form.set_phone(good);
            assert!(form.validate(), "{good:?} should be valid");
        }

        for bad in ["555-CALL", "+", "phone"] {
            let mut form = filled_form();
            form.set_phone(bad);
            assert!(!form.validate(), "{bad:?} should be invalid");
            assert_eq!(form.errors().phone.as_deref(), Some("Invalid phone format"));
        }
    }

    #[test]
    fn short_feedback_is_rejected() {
        let mut form = filled_form();
        form.set_feedback("too short");
        assert!(!form.validate());
        assert_eq!(
            form.errors().feedback.as_deref(),
            Some("Feedback must be at least 10 characters")
        );

        // Whitespace padding does not count toward the minimum.
        form.set_feedback("        ok");
        assert!(!form.validate());

        form.set_feedback("exactly10!");
        assert!(form.validate());
    }

    #[test]
    fn editing_a_field_clears_only_its_error() {
        let mut form = FeedbackForm::new();
        form.validate();
        assert!(form.errors().name.is_some());
        assert!(form.errors().email.is_some());

        form.set_name("Ann");
        assert!(form.errors().name.is_none());
        assert!(form.errors().email.is_some());
    }

    #[tokio::test]
    async fn successful_submit_resets_fields_and_sets_success_notice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/feedback"))
            .respond_with(created_response())
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let mut form = filled_form();

        assert!(form.submit(&client).await);
        assert_eq!(form.name(), "");
        assert_eq!(form.rating(), 0);
        assert_eq!(form.feedback(), "");
        assert_eq!(
            form.notice(),
            Some(&Notice::Success(SUBMIT_SUCCESS.to_string()))
        );
        assert!(!form.is_submitting());

        let created = form.created().expect("record should be retained");
        assert_eq!(created.id, 1);
        assert_eq!(created.name, "Ann");
    }

    #[tokio::test]
    async fn failed_submit_keeps_fields_and_sets_failure_notice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/feedback"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"message": "Internal server error"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let mut form = filled_form();

        assert!(!form.submit(&client).await);
        assert_eq!(form.name(), "Ann");
        assert_eq!(form.rating(), 5);
        assert_eq!(
            form.notice(),
            Some(&Notice::Failure(SUBMIT_FAILURE.to_string()))
        );
        assert!(form.created().is_none());
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/feedback"))
            .respond_with(created_response())
            .expect(0)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let mut form = filled_form();
        form.set_email("not-an-email");

        assert!(!form.submit(&client).await);
        assert!(form.notice().is_none());
        // MockServer verifies on drop that no request arrived.
    }

    #[tokio::test]
    async fn submit_sends_trimmed_values() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/feedback"))
            .and(body_json(serde_json::json!({
                "name": "Ann",
                "email": "ann@example.com",
                "phone": "555 0100",
                "rating": 5,
                "feedback": "Great service, would come back"
            })))
            .respond_with(created_response())
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let mut form = FeedbackForm::new();
        form.set_name("  Ann  ");
        form.set_email("ann@example.com");
        form.set_phone(" 555 0100 ");
        form.set_rating(5);
        form.set_feedback("  Great service, would come back  ");

        assert!(form.submit(&client).await);
    }
}
