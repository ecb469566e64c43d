// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Tellbox feedback service.

use thiserror::Error;

/// The primary error type used across the Tellbox workspace.
#[derive(Debug, Error)]
pub enum TellboxError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Caller-correctable input defects (missing fields, bad formats).
    ///
    /// The message is safe to surface to the submitter verbatim. Validation
    /// failures are never retried.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Storage backend errors (database connection, constraint violation, query failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// HTTP transport errors (bind/serve failures, connection failures,
    /// timeouts, non-success statuses).
    #[error("http error: {message}")]
    Http {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TellboxError {
    /// Shorthand for a [`TellboxError::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        TellboxError::Validation {
            message: message.into(),
        }
    }

    /// True when the error represents rejected caller input rather than a
    /// system failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, TellboxError::Validation { .. })
    }
}
