// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Tellbox feedback service.
//!
//! This crate provides the error type, domain types, the shared listing
//! contract (parameter clamping and offset math), and the storage trait
//! used throughout the Tellbox workspace.

pub mod error;
pub mod paging;
pub mod store;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TellboxError;
pub use paging::ListParams;
pub use store::FeedbackStore;
pub use types::{FeedbackPage, FeedbackRecord, NewFeedback, SortDirection};
