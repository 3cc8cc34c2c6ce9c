//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! Canonical result types for the Vantage telemetry gateway
//!
//! Both backends normalize into these shapes; callers never observe which
//! backend served a request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One normalized log row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    /// Row timestamp
    pub timestamp: DateTime<Utc>,

    /// Log line payload
    pub log: String,

    /// Log level
    pub log_level: String,

    /// Component identifier
    pub component_id: String,

    /// Environment identifier
    pub environment_id: String,

    /// Project identifier
    pub project_id: String,

    /// Version
    pub version: String,

    /// Version identifier
    pub version_id: String,

    /// Namespace
    pub namespace: String,

    /// Pod identifier
    pub pod_id: String,

    /// Container name
    pub container_name: String,

    /// Open label map
    pub labels: HashMap<String, String>,
}

/// One normalized span row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceRecord {
    /// Span duration in nanoseconds
    pub duration_in_nanos: i64,

    /// Span end time
    pub end_time: DateTime<Utc>,

    /// Span name
    pub name: String,

    /// Span identifier
    pub span_id: String,

    /// Span start time
    pub start_time: DateTime<Utc>,

    /// Trace identifier
    pub trace_id: String,
}

/// Log rows along with windowed total and timing metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogResult {
    /// Ordered log rows
    pub logs: Vec<LogRecord>,

    /// Total rows matching the filter, independent of the page size
    pub total_count: u64,

    /// Elapsed wall-clock milliseconds
    pub took_ms: u64,
}

/// Span rows along with windowed total and timing metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceResult {
    /// Ordered span rows
    pub spans: Vec<TraceRecord>,

    /// Total rows matching the filter, independent of the page size
    pub total_count: u64,

    /// Elapsed wall-clock milliseconds
    pub took_ms: u64,
}
