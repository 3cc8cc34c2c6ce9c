//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! Legacy search backend adapter
//!
//! Implements the storage capability over the external document-search
//! contract: a planner builds the per-shape query body and index list, the
//! client executes it, and the normalizer maps the hit shape into canonical
//! results. Cost reporting is not supported by this backend.

use std::sync::Arc;

use async_trait::async_trait;

use vantage_core::error::{GatewayError, GatewayResult};
use vantage_core::traits::{SearchClient, SearchQueryPlanner, TelemetryStore};
use vantage_core::types::{
    ComponentLogQuery, ComponentTraceQuery, CostReport, CostReportQuery, GatewayLogQuery,
    LogResult, OrganizationLogQuery, ProjectLogQuery, TraceResult,
};

use crate::normalize;

/// Telemetry storage adapter over the legacy document-search engine
pub struct SearchStore {
    client: Arc<dyn SearchClient>,
    planner: Arc<dyn SearchQueryPlanner>,
}

impl SearchStore {
    /// Create a new adapter instance
    pub fn new(client: Arc<dyn SearchClient>, planner: Arc<dyn SearchQueryPlanner>) -> Self {
        Self { client, planner }
    }
}

#[async_trait]
impl TelemetryStore for SearchStore {
    async fn get_component_logs(&self, query: ComponentLogQuery) -> GatewayResult<LogResult> {
        let indices = self.planner.log_indices(&query.base.time_range)?;
        let body = self.planner.component_logs(&query)?;
        let response = self.client.search(&indices, body).await?;
        Ok(normalize::log_result_from_search(&response))
    }

    async fn get_project_logs(&self, query: ProjectLogQuery) -> GatewayResult<LogResult> {
        let indices = self.planner.log_indices(&query.base.time_range)?;
        let body = self.planner.project_logs(&query)?;
        let response = self.client.search(&indices, body).await?;
        Ok(normalize::log_result_from_search(&response))
    }

    async fn get_gateway_logs(&self, query: GatewayLogQuery) -> GatewayResult<LogResult> {
        let indices = self.planner.log_indices(&query.base.time_range)?;
        let body = self.planner.gateway_logs(&query)?;
        let response = self.client.search(&indices, body).await?;
        Ok(normalize::log_result_from_search(&response))
    }

    async fn get_organization_logs(&self, query: OrganizationLogQuery) -> GatewayResult<LogResult> {
        let indices = self.planner.log_indices(&query.base.time_range)?;
        let body = self.planner.organization_logs(&query)?;
        let response = self.client.search(&indices, body).await?;
        Ok(normalize::log_result_from_search(&response))
    }

    async fn get_component_traces(
        &self,
        query: ComponentTraceQuery,
    ) -> GatewayResult<TraceResult> {
        let indices = self.planner.trace_indices();
        let body = self.planner.component_traces(&query)?;
        let response = self.client.search(&indices, body).await?;
        Ok(normalize::trace_result_from_search(&response))
    }

    async fn get_cost_report(&self, _query: CostReportQuery) -> GatewayResult<CostReport> {
        Err(GatewayError::configuration(
            "cost reporting is not supported by the search backend",
        ))
    }

    async fn health_check(&self) -> GatewayResult<()> {
        self.client.health_check().await
    }
}
