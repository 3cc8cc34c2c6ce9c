//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! Vantage Telemetry Gateway Core
//!
//! This crate provides the shared foundation of the Vantage telemetry query
//! gateway: the typed query parameter model, canonical record and result
//! shapes, the error taxonomy, the storage and legacy-search capability
//! traits, and configuration types for both backends.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::{
    ClickHouseConfig, CompressionMethod, EmbedLinkConfig, ObserverConfig, SearchConfig,
    TelemetryBackend, TelemetryConfig,
};
pub use error::{ErrorContext, GatewayError, GatewayResult};
pub use traits::{
    SearchClient, SearchHit, SearchHits, SearchQueryPlanner, SearchResponse, SearchTotal,
    TelemetryStore,
};
pub use types::{
    BaseLogQuery, ComponentLogQuery, ComponentTraceQuery, CostReport, CostReportQuery,
    CostReportRow, GatewayLogQuery, LogRecord, LogResult, OrganizationLogQuery, ProjectLogQuery,
    SortOrder, TimeRange, TraceRecord, TraceResult,
};

/// Gateway version information
pub const GATEWAY_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Gateway name
pub const GATEWAY_NAME: &str = "vantage";
