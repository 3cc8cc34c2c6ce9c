//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! Query time range types for the Vantage telemetry gateway

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Time range for queries
///
/// Both endpoints must be present before a query reaches a backend. The
/// ordering of `start` and `end` is not enforced; a reversed range simply
/// selects an empty window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Start time
    pub start: Option<DateTime<Utc>>,

    /// End time
    pub end: Option<DateTime<Utc>>,
}

impl TimeRange {
    /// Create a time range from start to end
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Create a time range for the last N hours
    pub fn last_hours(hours: u64) -> Self {
        let end = Utc::now();
        let start = end - Duration::hours(hours as i64);
        Self::new(start, end)
    }

    /// Get both endpoints, normalized to UTC, when the range is complete
    pub fn bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    /// Whether both endpoints are present
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_range_has_bounds() {
        let range = TimeRange::last_hours(1);
        let (start, end) = range.bounds().unwrap();
        assert!(start < end);
    }

    #[test]
    fn test_partial_range_is_incomplete() {
        let range = TimeRange {
            start: Some(Utc::now()),
            end: None,
        };
        assert!(!range.is_complete());
        assert!(range.bounds().is_none());
    }

    #[test]
    fn test_reversed_range_is_still_complete() {
        let now = Utc::now();
        let range = TimeRange::new(now, now - Duration::hours(1));
        assert!(range.is_complete());
    }
}
