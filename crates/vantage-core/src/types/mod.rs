//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! Type definitions for the Vantage telemetry gateway

pub mod queries;

// Re-export query types
pub use queries::{
    BaseLogQuery, ComponentLogQuery, ComponentTraceQuery, CostReport, CostReportQuery,
    CostReportRow, GatewayLogQuery, LogRecord, LogResult, OrganizationLogQuery, ProjectLogQuery,
    SortOrder, TimeRange, TraceRecord, TraceResult,
};
