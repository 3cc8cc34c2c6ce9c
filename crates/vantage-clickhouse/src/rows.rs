//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! Result row shapes for ClickHouse queries
//!
//! Field order must match the column order of the statements assembled by
//! the builder; the driver decodes positionally.

use chrono::{DateTime, Utc};
use clickhouse::Row;
use serde::Deserialize;

/// One log row as returned by the log statements
#[derive(Debug, Clone, Row, Deserialize)]
pub struct LogRow {
    #[serde(with = "clickhouse::serde::chrono::datetime64::millis")]
    pub timestamp: DateTime<Utc>,
    pub log: String,
    pub log_level: String,
    pub component_id: String,
    pub environment_id: String,
    pub project_id: String,
    pub version: String,
    pub version_id: String,
    pub namespace: String,
    pub pod_id: String,
    pub container_name: String,
    pub labels_json: String,
    pub total_count: u64,
}

/// One span row as returned by the trace statement
#[derive(Debug, Clone, Row, Deserialize)]
pub struct TraceRow {
    #[serde(with = "clickhouse::serde::chrono::datetime64::millis")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "clickhouse::serde::chrono::datetime64::millis")]
    pub end_time: DateTime<Utc>,
    pub span_name: String,
    pub span_id: String,
    pub trace_id: String,
    pub duration_in_nanos: i64,
    pub total_count: u64,
}

/// One aggregation row as returned by the cost statement
#[derive(Debug, Clone, Row, Deserialize)]
pub struct CostRow {
    pub organization_id: String,
    pub project_id: String,
    pub component_id: String,
    pub log_count: u64,
    pub raw_bytes: u64,
}
