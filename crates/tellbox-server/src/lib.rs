// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Axum HTTP surface for the Tellbox feedback service.
//!
//! Exposes the feedback REST API over any [`tellbox_core::FeedbackStore`]:
//! submission with presence validation, paged listing with clamped
//! parameters, and liveness endpoints. Handlers stay thin; validation and
//! normalization live in the [`submit`] and [`listing`] services so they
//! are testable without a socket.

pub mod handlers;
pub mod listing;
pub mod router;
pub mod state;
pub mod submit;

pub use router::{build_router, start_server, ServerConfig};
pub use state::AppState;
