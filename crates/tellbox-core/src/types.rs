// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Tellbox workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A persisted feedback submission.
///
/// `id` is assigned by the store and is unique, never reused, and
/// monotonically increasing, so it doubles as the insertion sequence.
/// `created_at` is ISO-8601 UTC with millisecond precision; the fixed-width
/// encoding makes lexicographic order equal chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub rating: i64,
    pub feedback: String,
    pub created_at: String,
}

/// A validated feedback submission ready for persistence.
///
/// String fields are expected to be trimmed by the submission service;
/// the store persists them as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFeedback {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub rating: i64,
    pub feedback: String,
}

/// Direction for ordering listings by submission time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
pub enum SortDirection {
    /// Oldest first.
    #[strum(serialize = "asc")]
    #[serde(rename = "asc")]
    Ascending,
    /// Newest first. The system default.
    #[default]
    #[strum(serialize = "desc")]
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    /// Normalizes raw query input: exactly `asc` (case-insensitive) selects
    /// ascending, anything else (absent, malformed, unrecognized) falls back
    /// to descending.
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.eq_ignore_ascii_case("asc") => SortDirection::Ascending,
            _ => SortDirection::Descending,
        }
    }
}

/// One page of feedback records plus the unfiltered total row count.
///
/// `total` is computed in the same serialized storage call as the page,
/// so the pair is mutually consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackPage {
    pub items: Vec<FeedbackRecord>,
    pub total: i64,
}
