//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! Cost report types for the Vantage telemetry gateway

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::time_range::TimeRange;

/// Billing window for cost aggregation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CostReportQuery {
    /// Aggregation window `[start, end)`; both endpoints required
    pub time_range: TimeRange,
}

impl CostReportQuery {
    /// Create a cost report query over `[start, end)`
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            time_range: TimeRange::new(start, end),
        }
    }
}

/// Per-tenant usage and estimated cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostReportRow {
    /// Organization identifier, `"unknown"` when absent
    pub organization_id: String,

    /// Project identifier, `"unknown"` when absent
    pub project_id: String,

    /// Component identifier, `"unknown"` when absent
    pub component_id: String,

    /// Number of log rows in the window
    pub log_count: u64,

    /// Estimated raw storage in bytes
    pub estimated_storage_bytes: f64,

    /// Estimated cost in USD
    pub estimated_cost_usd: f64,
}

/// Cost rows aggregated over a billing window
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostReport {
    /// Window start (inclusive)
    pub start: DateTime<Utc>,

    /// Window end (exclusive)
    pub end: DateTime<Utc>,

    /// Ordered cost rows
    pub rows: Vec<CostReportRow>,

    /// Running total across all rows in USD
    #[serde(rename = "totalCostUsd")]
    pub total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_report_query_window() {
        let start = Utc::now();
        let end = start + chrono::Duration::days(31);
        let query = CostReportQuery::new(start, end);
        assert_eq!(query.time_range.bounds(), Some((start, end)));
    }
}
