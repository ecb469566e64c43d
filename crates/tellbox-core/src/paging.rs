// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The shared listing contract: parameter normalization and offset math.
//!
//! Both the HTTP surface and the client controllers normalize through this
//! module, so the two sides agree on clamping and defaults bit-for-bit.
//! Responses echo the effective (post-clamp) values, letting callers
//! reconcile their own state against what was actually served.

use serde::{Deserialize, Serialize};

use crate::types::SortDirection;

/// Default page index when none is supplied.
pub const DEFAULT_PAGE: i64 = 0;
/// Default page size when none is supplied.
pub const DEFAULT_LIMIT: i64 = 10;
/// Smallest page size ever served.
pub const MIN_LIMIT: i64 = 1;
/// Largest page size ever served.
pub const MAX_LIMIT: i64 = 100;

/// Normalized listing parameters.
///
/// Construct via [`ListParams::from_query`] for raw query-string input or
/// call [`ListParams::clamped`] on hand-built values; either way the
/// invariants `page >= 0` and `MIN_LIMIT <= limit <= MAX_LIMIT` hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    pub page: i64,
    pub limit: i64,
    pub sort: SortDirection,
}

impl Default for ListParams {
    fn default() -> Self {
        ListParams {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort: SortDirection::Descending,
        }
    }
}

impl ListParams {
    /// Parses raw query-string values leniently.
    ///
    /// Unparseable numbers fall back to the defaults rather than erroring;
    /// out-of-range values are clamped. Absent or unrecognized sort values
    /// fall back to descending.
    pub fn from_query(page: Option<&str>, limit: Option<&str>, sort: Option<&str>) -> Self {
        let page = page
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_PAGE);
        let limit = limit
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_LIMIT);
        ListParams {
            page,
            limit,
            sort: SortDirection::from_query(sort),
        }
        .clamped()
    }

    /// Clamps `page` to `>= 0` and `limit` into `[MIN_LIMIT, MAX_LIMIT]`.
    pub fn clamped(self) -> Self {
        ListParams {
            page: self.page.max(0),
            limit: self.limit.clamp(MIN_LIMIT, MAX_LIMIT),
            sort: self.sort,
        }
    }

    /// Number of records skipped before the first item of this page.
    ///
    /// Computed on post-clamp values; saturates rather than overflowing for
    /// absurd page indices (the store then serves an empty page).
    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.limit)
    }
}
