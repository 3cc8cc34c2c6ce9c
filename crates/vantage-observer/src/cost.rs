//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! CSV rendering for cost reports and log exports

use chrono::SecondsFormat;

use vantage_core::error::{GatewayError, GatewayResult};
use vantage_core::types::{CostReport, LogRecord};

/// Render a cost report as CSV with the fixed six-column header
///
/// A report with zero rows yields a header-only CSV, not an error.
pub fn render_cost_report_csv(report: &CostReport) -> GatewayResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record([
            "organization_id",
            "project_id",
            "component_id",
            "log_count",
            "estimated_storage_bytes",
            "estimated_cost_usd",
        ])
        .map_err(|e| GatewayError::serialization_with_source("failed to write CSV header", e))?;

    for row in &report.rows {
        writer
            .write_record([
                row.organization_id.as_str(),
                row.project_id.as_str(),
                row.component_id.as_str(),
                &row.log_count.to_string(),
                &format!("{:.0}", row.estimated_storage_bytes),
                &format!("{:.4}", row.estimated_cost_usd),
            ])
            .map_err(|e| GatewayError::serialization_with_source("failed to write CSV row", e))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| GatewayError::serialization_with_source("failed to flush CSV writer", e))?;
    String::from_utf8(bytes)
        .map_err(|e| GatewayError::serialization_with_source("CSV output is not UTF-8", e))
}

/// Render log records as CSV for export
pub fn render_logs_csv(logs: &[LogRecord]) -> GatewayResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record([
            "Timestamp",
            "LogLevel",
            "ComponentID",
            "EnvironmentID",
            "ProjectID",
            "Namespace",
            "PodID",
            "ContainerName",
            "Log",
        ])
        .map_err(|e| GatewayError::serialization_with_source("failed to write CSV header", e))?;

    for record in logs {
        writer
            .write_record([
                &record
                    .timestamp
                    .to_rfc3339_opts(SecondsFormat::Secs, true),
                record.log_level.as_str(),
                record.component_id.as_str(),
                record.environment_id.as_str(),
                record.project_id.as_str(),
                record.namespace.as_str(),
                record.pod_id.as_str(),
                record.container_name.as_str(),
                record.log.as_str(),
            ])
            .map_err(|e| GatewayError::serialization_with_source("failed to write CSV row", e))?;
    }

    writer
        .into_inner()
        .map_err(|e| GatewayError::serialization_with_source("failed to flush CSV writer", e))
}
