//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! Query types for the Vantage telemetry gateway
//!
//! This module provides the parameter model for every query shape the
//! gateway supports, the canonical record and result shapes both backends
//! normalize into, and the cost report types.

pub mod cost;
pub mod queries;
pub mod results;
pub mod time_range;

// Re-export commonly used types
pub use cost::{CostReport, CostReportQuery, CostReportRow};
pub use queries::{
    BaseLogQuery, ComponentLogQuery, ComponentTraceQuery, GatewayLogQuery, OrganizationLogQuery,
    ProjectLogQuery, SortOrder,
};
pub use results::{LogRecord, LogResult, TraceRecord, TraceResult};
pub use time_range::TimeRange;
