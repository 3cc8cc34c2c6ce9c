//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! Dispatcher integration tests
//!
//! Exercises backend selection, dual-read reconciliation, and the
//! non-blocking shadow failure semantics against mock storage backends.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use vantage_core::config::{TelemetryBackend, TelemetryConfig};
use vantage_core::error::{GatewayError, GatewayResult};
use vantage_core::traits::TelemetryStore;
use vantage_core::types::{
    BaseLogQuery, ComponentLogQuery, ComponentTraceQuery, CostReport, CostReportQuery,
    GatewayLogQuery, LogRecord, LogResult, OrganizationLogQuery, ProjectLogQuery, TimeRange,
    TraceResult,
};
use vantage_observer::{LogExportQuery, TelemetryService};

/// Mock storage backend with canned results and a call counter
#[derive(Default)]
struct MockStore {
    logs: Option<LogResult>,
    traces: Option<TraceResult>,
    cost: Option<CostReport>,
    fail: bool,
    calls: AtomicU64,
}

impl MockStore {
    fn with_logs(count: usize, total: u64) -> Self {
        Self {
            logs: Some(make_log_result(count, total)),
            ..Default::default()
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    fn respond<T: Clone + Default>(&self, value: &Option<T>) -> GatewayResult<T> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if self.fail {
            return Err(GatewayError::execution("mock store failure"));
        }
        Ok(value.clone().unwrap_or_default())
    }
}

#[async_trait]
impl TelemetryStore for MockStore {
    async fn get_component_logs(&self, _query: ComponentLogQuery) -> GatewayResult<LogResult> {
        self.respond(&self.logs)
    }

    async fn get_project_logs(&self, _query: ProjectLogQuery) -> GatewayResult<LogResult> {
        self.respond(&self.logs)
    }

    async fn get_gateway_logs(&self, _query: GatewayLogQuery) -> GatewayResult<LogResult> {
        self.respond(&self.logs)
    }

    async fn get_organization_logs(
        &self,
        _query: OrganizationLogQuery,
    ) -> GatewayResult<LogResult> {
        self.respond(&self.logs)
    }

    async fn get_component_traces(
        &self,
        _query: ComponentTraceQuery,
    ) -> GatewayResult<TraceResult> {
        self.respond(&self.traces)
    }

    async fn get_cost_report(&self, query: CostReportQuery) -> GatewayResult<CostReport> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if self.fail {
            return Err(GatewayError::execution("mock store failure"));
        }
        Ok(self.cost.clone().unwrap_or_else(|| empty_report(&query)))
    }

    async fn health_check(&self) -> GatewayResult<()> {
        if self.fail {
            return Err(GatewayError::execution("mock store failure"));
        }
        Ok(())
    }
}

fn make_log_result(count: usize, total: u64) -> LogResult {
    let record = LogRecord {
        timestamp: Utc::now(),
        log: "request handled".to_string(),
        log_level: "INFO".to_string(),
        component_id: "comp-1".to_string(),
        environment_id: "dev".to_string(),
        project_id: "proj-1".to_string(),
        version: String::new(),
        version_id: String::new(),
        namespace: "default".to_string(),
        pod_id: "pod-a".to_string(),
        container_name: "app".to_string(),
        labels: HashMap::new(),
    };
    LogResult {
        logs: vec![record; count],
        total_count: total,
        took_ms: 5,
    }
}

fn empty_report(query: &CostReportQuery) -> CostReport {
    let (start, end) = query
        .time_range
        .bounds()
        .unwrap_or((DateTime::<Utc>::UNIX_EPOCH, DateTime::<Utc>::UNIX_EPOCH));
    CostReport {
        start,
        end,
        rows: Vec::new(),
        total: 0.0,
    }
}

fn dual_read_config(rate: f64) -> TelemetryConfig {
    TelemetryConfig {
        backend: TelemetryBackend::ClickHouse,
        dual_read: true,
        dual_sample_rate: rate,
        ..Default::default()
    }
}

fn component_query() -> ComponentLogQuery {
    let end = Utc::now();
    ComponentLogQuery {
        base: BaseLogQuery::new(TimeRange::new(end - Duration::hours(1), end)),
        component_id: "comp-1".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_dual_read_mismatch_never_changes_primary_result() {
    let columnar = Arc::new(MockStore::with_logs(10, 10));
    let shadow = Arc::new(MockStore::with_logs(8, 8));
    let service = TelemetryService::new(
        &dual_read_config(1.0),
        Some(columnar.clone()),
        Some(shadow.clone()),
    )
    .unwrap();

    let result = service.get_component_logs(component_query()).await.unwrap();

    assert_eq!(result.logs.len(), 10);
    assert_eq!(result.total_count, 10);
    assert_eq!(shadow.calls(), 1);

    let stats = service.dual_read_stats();
    assert_eq!(stats.reads, 1);
    assert_eq!(stats.mismatches, 1);
    assert_eq!(stats.failures, 0);
}

#[tokio::test]
async fn test_dual_read_agreement_records_no_mismatch() {
    let columnar = Arc::new(MockStore::with_logs(10, 10));
    let shadow = Arc::new(MockStore::with_logs(10, 10));
    let service =
        TelemetryService::new(&dual_read_config(1.0), Some(columnar), Some(shadow)).unwrap();

    service.get_component_logs(component_query()).await.unwrap();

    let stats = service.dual_read_stats();
    assert_eq!(stats.reads, 1);
    assert_eq!(stats.mismatches, 0);
    assert_eq!(stats.failures, 0);
}

#[tokio::test]
async fn test_shadow_failure_is_logged_and_discarded() {
    let columnar = Arc::new(MockStore::with_logs(3, 3));
    let shadow = Arc::new(MockStore::failing());
    let service =
        TelemetryService::new(&dual_read_config(1.0), Some(columnar), Some(shadow)).unwrap();

    let result = service.get_component_logs(component_query()).await.unwrap();

    assert_eq!(result.logs.len(), 3);
    let stats = service.dual_read_stats();
    assert_eq!(stats.reads, 1);
    assert_eq!(stats.failures, 1);
    assert_eq!(stats.mismatches, 0);
}

#[tokio::test]
async fn test_primary_failure_propagates_without_shadow_read() {
    let columnar = Arc::new(MockStore::failing());
    let shadow = Arc::new(MockStore::with_logs(5, 5));
    let service = TelemetryService::new(
        &dual_read_config(1.0),
        Some(columnar),
        Some(shadow.clone()),
    )
    .unwrap();

    let err = service
        .get_component_logs(component_query())
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Execution { .. }));
    assert_eq!(shadow.calls(), 0);
    assert_eq!(service.dual_read_stats().reads, 0);
}

#[tokio::test]
async fn test_zero_sample_rate_never_shadows() {
    let columnar = Arc::new(MockStore::with_logs(2, 2));
    let shadow = Arc::new(MockStore::with_logs(1, 1));
    let service = TelemetryService::new(
        &dual_read_config(0.0),
        Some(columnar),
        Some(shadow.clone()),
    )
    .unwrap();

    for _ in 0..50 {
        service.get_component_logs(component_query()).await.unwrap();
    }
    assert_eq!(shadow.calls(), 0);
}

#[tokio::test]
async fn test_search_backend_never_dual_reads() {
    let columnar = Arc::new(MockStore::with_logs(9, 9));
    let search = Arc::new(MockStore::with_logs(4, 4));
    let cfg = TelemetryConfig {
        backend: TelemetryBackend::OpenSearch,
        dual_read: true,
        dual_sample_rate: 1.0,
        ..Default::default()
    };
    let service =
        TelemetryService::new(&cfg, Some(columnar.clone()), Some(search.clone())).unwrap();

    let result = service.get_component_logs(component_query()).await.unwrap();

    // The search store is primary; the columnar store is never consulted.
    assert_eq!(result.logs.len(), 4);
    assert_eq!(columnar.calls(), 0);
    assert_eq!(service.dual_read_stats().reads, 0);
}

#[tokio::test]
async fn test_backend_selection_requires_matching_store() {
    let cfg = TelemetryConfig {
        backend: TelemetryBackend::ClickHouse,
        ..Default::default()
    };
    let err = TelemetryService::new(&cfg, None, Some(Arc::new(MockStore::default()))).unwrap_err();
    assert!(matches!(err, GatewayError::Configuration { .. }));
}

#[tokio::test]
async fn test_cost_report_requires_columnar_backend() {
    let cfg = TelemetryConfig {
        backend: TelemetryBackend::OpenSearch,
        ..Default::default()
    };
    let service =
        TelemetryService::new(&cfg, None, Some(Arc::new(MockStore::default()))).unwrap();

    let end = Utc::now();
    let err = service
        .get_cost_report(CostReportQuery::new(end - Duration::days(30), end))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Configuration { .. }));
}

#[tokio::test]
async fn test_empty_cost_report_renders_header_only_csv() {
    let cfg = TelemetryConfig {
        backend: TelemetryBackend::ClickHouse,
        ..Default::default()
    };
    let service =
        TelemetryService::new(&cfg, Some(Arc::new(MockStore::default())), None).unwrap();

    let csv = service
        .generate_monthly_cost_report_csv(Some("2025-01"))
        .await
        .unwrap();
    assert_eq!(csv.lines().count(), 1);
    assert!(csv.starts_with("organization_id,project_id,component_id"));
}

#[tokio::test]
async fn test_export_logs_csv_renders_records() {
    let cfg = TelemetryConfig {
        backend: TelemetryBackend::ClickHouse,
        ..Default::default()
    };
    let service =
        TelemetryService::new(&cfg, Some(Arc::new(MockStore::with_logs(2, 2))), None).unwrap();

    let end = Utc::now();
    let export = LogExportQuery::Project(ProjectLogQuery {
        base: BaseLogQuery::new(TimeRange::new(end - Duration::hours(1), end)),
        project_id: "proj-1".to_string(),
        ..Default::default()
    });
    let bytes = service.export_logs_csv(export).await.unwrap();
    let text = String::from_utf8(bytes).unwrap();
    // Header plus two records.
    assert_eq!(text.lines().count(), 3);
    assert!(text.contains("comp-1"));
}

#[tokio::test]
async fn test_embed_link_requires_signing_configuration() {
    let cfg = TelemetryConfig {
        backend: TelemetryBackend::ClickHouse,
        ..Default::default()
    };
    let service =
        TelemetryService::new(&cfg, Some(Arc::new(MockStore::default())), None).unwrap();

    let err = service
        .generate_embed_link("/embed", &HashMap::new())
        .unwrap_err();
    assert!(matches!(err, GatewayError::Configuration { .. }));
}

#[tokio::test]
async fn test_health_check_ignores_shadow_failure() {
    let columnar = Arc::new(MockStore::with_logs(1, 1));
    let shadow = Arc::new(MockStore::failing());
    let service =
        TelemetryService::new(&dual_read_config(1.0), Some(columnar), Some(shadow)).unwrap();
    assert!(service.health_check().await.is_ok());
}

#[tokio::test]
async fn test_health_check_fails_on_primary_failure() {
    let cfg = TelemetryConfig {
        backend: TelemetryBackend::ClickHouse,
        ..Default::default()
    };
    let service =
        TelemetryService::new(&cfg, Some(Arc::new(MockStore::failing())), None).unwrap();
    assert!(service.health_check().await.is_err());
}
