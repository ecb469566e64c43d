// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared state for axum request handlers.

use std::sync::Arc;

use tellbox_core::FeedbackStore;

/// Shared state for axum request handlers.
///
/// The store is the only shared resource; request handling itself is
/// stateless.
#[derive(Clone)]
pub struct AppState {
    /// Feedback persistence backend.
    pub store: Arc<dyn FeedbackStore>,
}

impl AppState {
    /// Create a new AppState wrapping the given store.
    pub fn new(store: Arc<dyn FeedbackStore>) -> Self {
        Self { store }
    }
}
