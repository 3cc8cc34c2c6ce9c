//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! Telemetry dispatcher service
//!
//! Routes each logical operation to the backend selected once at
//! construction, optionally fires a sampled shadow read against the other
//! backend, and reconciles the two results. The caller's response is always
//! the primary result unchanged; shadow errors and mismatches are logged
//! and counted, never surfaced.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use vantage_core::config::{TelemetryBackend, TelemetryConfig};
use vantage_core::error::{GatewayError, GatewayResult};
use vantage_core::traits::TelemetryStore;
use vantage_core::types::{
    ComponentLogQuery, ComponentTraceQuery, CostReport, CostReportQuery, GatewayLogQuery,
    LogResult, OrganizationLogQuery, ProjectLogQuery, TraceResult,
};
use vantage_core::utils::time::month_range;

use crate::cost;
use crate::sampler::DualReadSampler;
use crate::signer::EmbedLinkSigner;

/// Health probe budget for the whole service
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Dual-read outcome counters
#[derive(Debug, Default)]
pub struct DualReadStats {
    reads: AtomicU64,
    mismatches: AtomicU64,
    failures: AtomicU64,
}

/// Point-in-time view of the dual-read counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DualReadSnapshot {
    /// Shadow reads attempted
    pub reads: u64,

    /// Count or length discrepancies observed
    pub mismatches: u64,

    /// Shadow reads that failed outright
    pub failures: u64,
}

/// Log export selector for CSV downloads
#[derive(Debug, Clone)]
pub enum LogExportQuery {
    /// Export project scoped logs
    Project(ProjectLogQuery),

    /// Export organization scoped logs
    Organization(OrganizationLogQuery),
}

/// Telemetry query dispatcher
pub struct TelemetryService {
    backend: TelemetryBackend,
    primary: Arc<dyn TelemetryStore>,
    shadow: Option<Arc<dyn TelemetryStore>>,
    sampler: DualReadSampler,
    signer: Option<EmbedLinkSigner>,
    stats: DualReadStats,
}

impl std::fmt::Debug for TelemetryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryService")
            .field("backend", &self.backend)
            .field("has_shadow", &self.shadow.is_some())
            .field("has_signer", &self.signer.is_some())
            .field("stats", &self.stats)
            .finish()
    }
}

impl TelemetryService {
    /// Create a new dispatcher
    ///
    /// The backend is resolved exactly once here. With the columnar backend
    /// selected, the search store (when present and dual-read is enabled)
    /// becomes the shadow target; with the search backend selected,
    /// dual-read never triggers.
    pub fn new(
        cfg: &TelemetryConfig,
        columnar: Option<Arc<dyn TelemetryStore>>,
        search: Option<Arc<dyn TelemetryStore>>,
    ) -> GatewayResult<Self> {
        let (primary, shadow) = match cfg.backend {
            TelemetryBackend::ClickHouse => {
                let primary = columnar.ok_or_else(|| {
                    GatewayError::configuration(
                        "clickhouse backend selected but no columnar store provided",
                    )
                })?;
                let shadow = if cfg.dual_read { search } else { None };
                (primary, shadow)
            }
            TelemetryBackend::OpenSearch => {
                let primary = search.ok_or_else(|| {
                    GatewayError::configuration(
                        "opensearch backend selected but no search store provided",
                    )
                })?;
                (primary, None)
            }
        };

        Ok(Self {
            backend: cfg.backend,
            primary,
            shadow,
            sampler: DualReadSampler::new(cfg),
            signer: EmbedLinkSigner::from_config(&cfg.embed),
            stats: DualReadStats::default(),
        })
    }

    /// Replace the sampling gate, e.g. with a deterministic generator
    pub fn with_sampler(mut self, sampler: DualReadSampler) -> Self {
        self.sampler = sampler;
        self
    }

    /// Retrieve logs for a specific component
    pub async fn get_component_logs(&self, query: ComponentLogQuery) -> GatewayResult<LogResult> {
        info!(
            component_id = %query.component_id,
            environment_id = %query.environment_id,
            "getting component logs"
        );
        let primary = self.primary.get_component_logs(query.clone()).await?;
        if let Some(shadow) = self.shadow_store() {
            let outcome = shadow.get_component_logs(query).await;
            self.reconcile(
                "component",
                primary.total_count,
                primary.logs.len(),
                outcome.map(|r| (r.total_count, r.logs.len())),
            );
        }
        Ok(primary)
    }

    /// Retrieve logs for a specific project
    pub async fn get_project_logs(&self, query: ProjectLogQuery) -> GatewayResult<LogResult> {
        info!(project_id = %query.project_id, "getting project logs");
        let primary = self.primary.get_project_logs(query.clone()).await?;
        if let Some(shadow) = self.shadow_store() {
            let outcome = shadow.get_project_logs(query).await;
            self.reconcile(
                "project",
                primary.total_count,
                primary.logs.len(),
                outcome.map(|r| (r.total_count, r.logs.len())),
            );
        }
        Ok(primary)
    }

    /// Retrieve gateway traffic logs
    pub async fn get_gateway_logs(&self, query: GatewayLogQuery) -> GatewayResult<LogResult> {
        info!(organization_id = %query.organization_id, "getting gateway logs");
        let primary = self.primary.get_gateway_logs(query.clone()).await?;
        if let Some(shadow) = self.shadow_store() {
            let outcome = shadow.get_gateway_logs(query).await;
            self.reconcile(
                "gateway",
                primary.total_count,
                primary.logs.len(),
                outcome.map(|r| (r.total_count, r.logs.len())),
            );
        }
        Ok(primary)
    }

    /// Retrieve logs for an organization
    pub async fn get_organization_logs(
        &self,
        query: OrganizationLogQuery,
    ) -> GatewayResult<LogResult> {
        info!(organization_id = %query.organization_id, "getting organization logs");
        let primary = self.primary.get_organization_logs(query.clone()).await?;
        if let Some(shadow) = self.shadow_store() {
            let outcome = shadow.get_organization_logs(query).await;
            self.reconcile(
                "organization",
                primary.total_count,
                primary.logs.len(),
                outcome.map(|r| (r.total_count, r.logs.len())),
            );
        }
        Ok(primary)
    }

    /// Retrieve spans for a component service
    pub async fn get_component_traces(
        &self,
        query: ComponentTraceQuery,
    ) -> GatewayResult<TraceResult> {
        info!(service_name = %query.service_name, "getting component traces");
        let primary = self.primary.get_component_traces(query.clone()).await?;
        if let Some(shadow) = self.shadow_store() {
            let outcome = shadow.get_component_traces(query).await;
            self.reconcile(
                "traces",
                primary.total_count,
                primary.spans.len(),
                outcome.map(|r| (r.total_count, r.spans.len())),
            );
        }
        Ok(primary)
    }

    /// Aggregate usage into a cost report; columnar backend only
    pub async fn get_cost_report(&self, query: CostReportQuery) -> GatewayResult<CostReport> {
        if self.backend != TelemetryBackend::ClickHouse {
            return Err(GatewayError::configuration(
                "cost reporting requires the clickhouse telemetry backend",
            ));
        }
        self.primary.get_cost_report(query).await
    }

    /// Aggregate usage and render it as CSV
    pub async fn generate_cost_report_csv(&self, query: CostReportQuery) -> GatewayResult<String> {
        let report = self.get_cost_report(query).await?;
        cost::render_cost_report_csv(&report)
    }

    /// Render the cost report for a `"YYYY-MM"` month token
    ///
    /// An absent token defaults to the current UTC month.
    pub async fn generate_monthly_cost_report_csv(
        &self,
        month: Option<&str>,
    ) -> GatewayResult<String> {
        let (start, end) = month_range(month)?;
        self.generate_cost_report_csv(CostReportQuery::new(start, end))
            .await
    }

    /// Retrieve logs for the export selector and render them as CSV
    pub async fn export_logs_csv(&self, export: LogExportQuery) -> GatewayResult<Vec<u8>> {
        let result = match export {
            LogExportQuery::Project(query) => self.get_project_logs(query).await?,
            LogExportQuery::Organization(query) => self.get_organization_logs(query).await?,
        };
        cost::render_logs_csv(&result.logs)
    }

    /// Return a signed dashboard URL if signing is configured
    pub fn generate_embed_link(
        &self,
        path: &str,
        params: &HashMap<String, String>,
    ) -> GatewayResult<String> {
        let signer = self.signer.as_ref().ok_or_else(|| {
            GatewayError::configuration("embed link signing is not configured")
        })?;
        signer.generate(path, params)
    }

    /// Probe the primary backend; the shadow backend only warns on failure
    pub async fn health_check(&self) -> GatewayResult<()> {
        tokio::time::timeout(HEALTH_CHECK_TIMEOUT, async {
            if let Err(e) = self.primary.health_check().await {
                error!(error = %e, "primary backend health check failed");
                return Err(GatewayError::execution_with_source(
                    "primary backend health check failed",
                    e,
                ));
            }
            if let Some(shadow) = &self.shadow {
                if let Err(e) = shadow.health_check().await {
                    warn!(error = %e, "shadow backend health check failed");
                }
            }
            Ok(())
        })
        .await
        .map_err(|_| GatewayError::execution("health check timed out"))?
    }

    /// Current dual-read counters
    pub fn dual_read_stats(&self) -> DualReadSnapshot {
        DualReadSnapshot {
            reads: self.stats.reads.load(Ordering::Relaxed),
            mismatches: self.stats.mismatches.load(Ordering::Relaxed),
            failures: self.stats.failures.load(Ordering::Relaxed),
        }
    }

    fn shadow_store(&self) -> Option<&Arc<dyn TelemetryStore>> {
        match &self.shadow {
            Some(shadow) if self.sampler.should_sample() => Some(shadow),
            _ => None,
        }
    }

    fn reconcile(
        &self,
        scope: &str,
        primary_total: u64,
        primary_len: usize,
        shadow: GatewayResult<(u64, usize)>,
    ) {
        self.stats.reads.fetch_add(1, Ordering::Relaxed);
        match shadow {
            Err(e) => {
                warn!(scope, error = %e, "dual-read shadow fetch failed");
                self.stats.failures.fetch_add(1, Ordering::Relaxed);
            }
            Ok((shadow_total, shadow_len)) => {
                if shadow_total != primary_total || shadow_len != primary_len {
                    warn!(
                        scope,
                        primary_total,
                        shadow_total,
                        primary_len,
                        shadow_len,
                        "dual-read mismatch"
                    );
                    self.stats.mismatches.fetch_add(1, Ordering::Relaxed);
                }
            }
        }
    }
}
