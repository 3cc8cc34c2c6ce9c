//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! ClickHouse execution engine for the Vantage telemetry gateway
//!
//! Every query acquires a permit bounding concurrent in-flight statements,
//! runs under its own timeout racing the caller's cancellation (dropping the
//! future aborts the call), and decodes rows into the canonical shapes.
//! Label decode failures are recovered per row, never escalated.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use clickhouse::{Client, Compression};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use vantage_core::config::{ClickHouseConfig, CompressionMethod};
use vantage_core::error::{GatewayError, GatewayResult};
use vantage_core::traits::TelemetryStore;
use vantage_core::types::{
    ComponentLogQuery, ComponentTraceQuery, CostReport, CostReportQuery, CostReportRow,
    GatewayLogQuery, LogRecord, LogResult, OrganizationLogQuery, ProjectLogQuery, TraceRecord,
    TraceResult,
};

use crate::builder::QueryBuilder;
use crate::rows::{CostRow, LogRow, TraceRow};
use crate::value::SqlValue;

/// Storage cost per terabyte-month in USD
const STORAGE_COST_PER_TB_USD: f64 = 0.50;

/// Processing cost per million log rows in USD
const LOG_PROCESSING_COST_PER_MILLION_USD: f64 = 2.0;

/// Fallback per-query timeout
const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Health probe timeout, independent of query timeouts
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Bind timestamps in a form ClickHouse coerces in DateTime comparisons
const BIND_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Telemetry storage provider backed by ClickHouse
pub struct ClickHouseProvider {
    client: Client,
    builder: QueryBuilder,
    query_timeout: Duration,
    permits: Arc<Semaphore>,
}

impl ClickHouseProvider {
    /// Connect to ClickHouse and verify connectivity
    pub async fn connect(cfg: ClickHouseConfig) -> GatewayResult<Self> {
        let host = cfg
            .hosts
            .first()
            .ok_or_else(|| GatewayError::configuration("clickhouse hosts are required"))?;
        let scheme = if cfg.secure { "https" } else { "http" };

        let compression = match cfg.compression {
            CompressionMethod::Lz4 => Compression::Lz4,
            CompressionMethod::None => Compression::None,
            CompressionMethod::Zstd => {
                warn!("zstd compression is not supported by the driver, using lz4");
                Compression::Lz4
            }
        };

        let client = Client::default()
            .with_url(format!("{scheme}://{host}"))
            .with_database(cfg.database.as_str())
            .with_user(cfg.username.as_str())
            .with_password(cfg.password.as_str())
            .with_compression(compression);

        let query_timeout = if cfg.query_timeout_secs > 0 {
            Duration::from_secs(cfg.query_timeout_secs)
        } else {
            DEFAULT_QUERY_TIMEOUT
        };
        let max_in_flight = if cfg.max_open_conns > 0 {
            cfg.max_open_conns as usize
        } else {
            Semaphore::MAX_PERMITS
        };

        let provider = Self {
            client,
            builder: QueryBuilder::new(&cfg),
            query_timeout,
            permits: Arc::new(Semaphore::new(max_in_flight)),
        };

        let connect_timeout = Duration::from_secs(cfg.connect_timeout_secs.max(1));
        tokio::time::timeout(connect_timeout, provider.ping())
            .await
            .map_err(|_| GatewayError::execution("connect to clickhouse timed out"))??;

        debug!(host = %host, "connected to clickhouse");
        Ok(provider)
    }

    async fn ping(&self) -> GatewayResult<()> {
        self.client
            .query("SELECT 1")
            .fetch_one::<u8>()
            .await
            .map(|_| ())
            .map_err(|e| GatewayError::execution_with_source("clickhouse ping failed", e))
    }

    fn bind_args(&self, sql: &str, args: &[SqlValue]) -> clickhouse::query::Query {
        let mut query = self.client.query(sql);
        for arg in args {
            query = match arg {
                SqlValue::Text(value) => query.bind(value.as_str()),
                SqlValue::UInt(value) => query.bind(*value),
                SqlValue::DateTime(value) => {
                    query.bind(value.format(BIND_DATETIME_FORMAT).to_string())
                }
            };
        }
        query
    }

    async fn execute_log_query(
        &self,
        sql: String,
        args: Vec<SqlValue>,
    ) -> GatewayResult<LogResult> {
        let _permit = self.acquire_permit().await?;
        let started = Instant::now();

        let rows = tokio::time::timeout(
            self.query_timeout,
            self.bind_args(&sql, &args).fetch_all::<LogRow>(),
        )
        .await
        .map_err(|_| GatewayError::execution("clickhouse log query timed out"))?
        .map_err(|e| GatewayError::execution_with_source("clickhouse log query failed", e))?;

        let mut result = LogResult {
            logs: Vec::with_capacity(rows.len()),
            total_count: 0,
            took_ms: 0,
        };

        for row in rows {
            result.total_count = row.total_count;
            result.logs.push(log_record_from_row(row));
        }

        result.took_ms = started.elapsed().as_millis() as u64;
        Ok(result)
    }

    async fn execute_trace_query(
        &self,
        sql: String,
        args: Vec<SqlValue>,
    ) -> GatewayResult<TraceResult> {
        let _permit = self.acquire_permit().await?;
        let started = Instant::now();

        let rows = tokio::time::timeout(
            self.query_timeout,
            self.bind_args(&sql, &args).fetch_all::<TraceRow>(),
        )
        .await
        .map_err(|_| GatewayError::execution("clickhouse trace query timed out"))?
        .map_err(|e| GatewayError::execution_with_source("clickhouse trace query failed", e))?;

        let mut result = TraceResult {
            spans: Vec::with_capacity(rows.len()),
            total_count: 0,
            took_ms: 0,
        };

        for row in rows {
            result.total_count = row.total_count;
            result.spans.push(TraceRecord {
                duration_in_nanos: row.duration_in_nanos,
                end_time: row.end_time,
                name: row.span_name,
                span_id: row.span_id,
                start_time: row.start_time,
                trace_id: row.trace_id,
            });
        }

        result.took_ms = started.elapsed().as_millis() as u64;
        Ok(result)
    }

    async fn acquire_permit(&self) -> GatewayResult<tokio::sync::SemaphorePermit<'_>> {
        self.permits
            .acquire()
            .await
            .map_err(|e| GatewayError::internal_with_source("query permit pool is closed", e))
    }
}

#[async_trait]
impl TelemetryStore for ClickHouseProvider {
    async fn get_component_logs(&self, query: ComponentLogQuery) -> GatewayResult<LogResult> {
        let (sql, args) = self.builder.component_logs(&query)?;
        self.execute_log_query(sql, args).await
    }

    async fn get_project_logs(&self, query: ProjectLogQuery) -> GatewayResult<LogResult> {
        let (sql, args) = self.builder.project_logs(&query)?;
        self.execute_log_query(sql, args).await
    }

    async fn get_gateway_logs(&self, query: GatewayLogQuery) -> GatewayResult<LogResult> {
        let (sql, args) = self.builder.gateway_logs(&query)?;
        self.execute_log_query(sql, args).await
    }

    async fn get_organization_logs(&self, query: OrganizationLogQuery) -> GatewayResult<LogResult> {
        let (sql, args) = self.builder.organization_logs(&query)?;
        self.execute_log_query(sql, args).await
    }

    async fn get_component_traces(
        &self,
        query: ComponentTraceQuery,
    ) -> GatewayResult<TraceResult> {
        let (sql, args) = self.builder.component_traces(&query)?;
        self.execute_trace_query(sql, args).await
    }

    async fn get_cost_report(&self, query: CostReportQuery) -> GatewayResult<CostReport> {
        let (sql, args) = self.builder.cost_report(&query)?;
        let (start, end) = query
            .time_range
            .bounds()
            .ok_or_else(|| GatewayError::validation("cost report requires start and end time"))?;

        let _permit = self.acquire_permit().await?;
        let rows = tokio::time::timeout(
            self.query_timeout,
            self.bind_args(&sql, &args).fetch_all::<CostRow>(),
        )
        .await
        .map_err(|_| GatewayError::execution("clickhouse cost report query timed out"))?
        .map_err(|e| {
            GatewayError::execution_with_source("clickhouse cost report query failed", e)
        })?;

        let mut report = CostReport {
            start,
            end,
            rows: Vec::with_capacity(rows.len()),
            total: 0.0,
        };

        for row in rows {
            let raw_bytes = row.raw_bytes as f64;
            let cost = estimate_row_cost(row.log_count, raw_bytes);
            report.rows.push(CostReportRow {
                organization_id: or_unknown(row.organization_id),
                project_id: or_unknown(row.project_id),
                component_id: or_unknown(row.component_id),
                log_count: row.log_count,
                estimated_storage_bytes: raw_bytes,
                estimated_cost_usd: cost,
            });
            report.total += cost;
        }

        Ok(report)
    }

    async fn health_check(&self) -> GatewayResult<()> {
        tokio::time::timeout(HEALTH_CHECK_TIMEOUT, self.ping())
            .await
            .map_err(|_| GatewayError::execution("clickhouse health check timed out"))?
    }
}

fn log_record_from_row(row: LogRow) -> LogRecord {
    LogRecord {
        timestamp: row.timestamp,
        log: row.log,
        log_level: row.log_level,
        component_id: row.component_id,
        environment_id: row.environment_id,
        project_id: row.project_id,
        version: row.version,
        version_id: row.version_id,
        namespace: row.namespace,
        pod_id: row.pod_id,
        container_name: row.container_name,
        labels: decode_labels(&row.labels_json),
    }
}

/// Decode the label payload of one row; failures yield an empty map
fn decode_labels(labels_json: &str) -> HashMap<String, String> {
    if labels_json.is_empty() {
        return HashMap::new();
    }
    match serde_json::from_str(labels_json) {
        Ok(labels) => labels,
        Err(e) => {
            warn!(error = %e, "failed to decode labels JSON, substituting empty map");
            HashMap::new()
        }
    }
}

/// Estimate the cost of one aggregation row in USD
fn estimate_row_cost(log_count: u64, raw_bytes: f64) -> f64 {
    let storage_tb = raw_bytes / (1024.0 * 1024.0 * 1024.0 * 1024.0);
    let storage_cost = storage_tb * STORAGE_COST_PER_TB_USD;
    let processing_cost = log_count as f64 / 1_000_000.0 * LOG_PROCESSING_COST_PER_MILLION_USD;
    storage_cost + processing_cost
}

fn or_unknown(value: String) -> String {
    if value.is_empty() {
        "unknown".to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_decode_labels_recovers_from_bad_payloads() {
        assert!(decode_labels("").is_empty());
        assert!(decode_labels("{not json").is_empty());
        assert!(decode_labels("[1, 2]").is_empty());

        let labels = decode_labels(r#"{"app":"checkout","zone":"us-east"}"#);
        assert_eq!(labels.get("app").map(String::as_str), Some("checkout"));
        assert_eq!(labels.len(), 2);
    }

    #[test]
    fn test_estimate_row_cost() {
        // One full terabyte costs exactly the storage rate.
        let one_tb = 1024.0 * 1024.0 * 1024.0 * 1024.0;
        assert!((estimate_row_cost(0, one_tb) - 0.50).abs() < 1e-9);

        // One million rows cost exactly the processing rate.
        assert!((estimate_row_cost(1_000_000, 0.0) - 2.0).abs() < 1e-9);

        // Components add.
        let combined = estimate_row_cost(1_000_000, one_tb);
        assert!((combined - 2.5).abs() < 1e-9);

        assert_eq!(estimate_row_cost(0, 0.0), 0.0);
    }

    #[test]
    fn test_or_unknown() {
        assert_eq!(or_unknown(String::new()), "unknown");
        assert_eq!(or_unknown("org-1".to_string()), "org-1");
    }

    #[test]
    fn test_bind_datetime_format_is_utc_and_sortable() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 1, 10, 30, 0).unwrap();
        assert_eq!(
            ts.format(BIND_DATETIME_FORMAT).to_string(),
            "2025-03-01 10:30:00.000"
        );
    }
}
