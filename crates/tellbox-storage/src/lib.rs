// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for Tellbox.
//!
//! This crate provides durable storage for feedback records using SQLite
//! in WAL mode behind a single async connection. Schema migrations are
//! embedded in the binary and applied automatically when the database is
//! opened.
//!
//! The main entry point is [`SqliteFeedbackStore`], which implements the
//! [`tellbox_core::FeedbackStore`] trait.

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod store;

pub use database::Database;
pub use models::{FeedbackPage, FeedbackRecord, NewFeedback, SortDirection};
pub use store::SqliteFeedbackStore;
