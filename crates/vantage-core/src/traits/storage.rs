//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! Storage capability trait for telemetry backends
//!
//! Every backend the dispatcher can route to implements this trait. Calls
//! are bounded by the implementation's own timeout discipline; dropping the
//! returned future cancels the in-flight operation.

use async_trait::async_trait;

use crate::error::GatewayResult;
use crate::types::{
    ComponentLogQuery, ComponentTraceQuery, CostReport, CostReportQuery, GatewayLogQuery,
    LogResult, OrganizationLogQuery, ProjectLogQuery, TraceResult,
};

/// Telemetry storage backend capability
#[async_trait]
pub trait TelemetryStore: Send + Sync {
    /// Query logs for a single component
    async fn get_component_logs(&self, query: ComponentLogQuery) -> GatewayResult<LogResult>;

    /// Query logs across a project
    async fn get_project_logs(&self, query: ProjectLogQuery) -> GatewayResult<LogResult>;

    /// Query gateway traffic logs for an organization
    async fn get_gateway_logs(&self, query: GatewayLogQuery) -> GatewayResult<LogResult>;

    /// Query logs across an organization
    async fn get_organization_logs(&self, query: OrganizationLogQuery) -> GatewayResult<LogResult>;

    /// Query spans for a component service
    async fn get_component_traces(&self, query: ComponentTraceQuery)
        -> GatewayResult<TraceResult>;

    /// Aggregate usage into per-tenant cost rows
    async fn get_cost_report(&self, query: CostReportQuery) -> GatewayResult<CostReport>;

    /// Lightweight connectivity probe
    async fn health_check(&self) -> GatewayResult<()>;
}
