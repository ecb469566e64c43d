// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client-side half of the Tellbox feedback service.
//!
//! Mirrors the browser frontend as plain controllers over the HTTP API:
//! the submission form with local validation, the admin listing with
//! paging state and last-triggered-wins fetching, and a persisted session
//! with a pluggable admin credential gate. Nothing here renders; callers
//! (the CLI, a future UI) read state and draw it.

pub mod auth;
pub mod client;
pub mod form;
pub mod listing;
pub mod session;

pub use auth::{CredentialVerifier, StaticCredentialVerifier};
pub use client::{ApiClient, ListingPage};
pub use form::{FeedbackForm, FieldErrors, Notice};
pub use listing::{FeedbackListing, PendingFetch};
pub use session::{AdminSession, ClientSession, View};
