// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential verification for the admin gate.
//!
//! The gate is client-side: the server trusts no token, and the verifier
//! only controls access to the local admin dashboard. The trait seam keeps
//! the gate swappable for a real backend without touching the session code.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use tellbox_core::TellboxError;

use crate::session::AdminSession;

/// Rejection message for failed logins.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials. Please try again.";

/// Checks credentials and issues admin sessions.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Verifies the pair and issues a session, or fails with a validation
    /// error carrying [`INVALID_CREDENTIALS`].
    async fn verify(&self, username: &str, password: &str) -> Result<AdminSession, TellboxError>;
}

/// Verifier backed by a single configured credential pair.
#[derive(Debug)]
pub struct StaticCredentialVerifier {
    username: String,
    password: SecretString,
}

impl StaticCredentialVerifier {
    /// Creates a verifier for the given credential pair. The password is
    /// held behind [`SecretString`] so debug output never shows it.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

#[async_trait]
impl CredentialVerifier for StaticCredentialVerifier {
    async fn verify(&self, username: &str, password: &str) -> Result<AdminSession, TellboxError> {
        if username == self.username && password == self.password.expose_secret() {
            Ok(AdminSession {
                token: uuid::Uuid::new_v4().to_string(),
                username: username.to_string(),
                issued_at: chrono::Utc::now().to_rfc3339(),
            })
        } else {
            Err(TellboxError::validation(INVALID_CREDENTIALS))
        }
    }
}
