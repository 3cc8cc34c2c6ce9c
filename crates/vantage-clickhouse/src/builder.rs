//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! ClickHouse SQL builder for the Vantage telemetry gateway
//!
//! Five query shapes plus the cost aggregation are translated into
//! parameterized SQL. Statement text is deterministic: map-backed filters
//! are emitted in lexicographic key order, so semantically identical inputs
//! always produce byte-identical SQL regardless of map iteration order.

use std::collections::HashMap;

use vantage_core::config::ClickHouseConfig;
use vantage_core::error::{GatewayError, GatewayResult};
use vantage_core::types::{
    BaseLogQuery, ComponentLogQuery, ComponentTraceQuery, CostReportQuery, GatewayLogQuery,
    OrganizationLogQuery, ProjectLogQuery, SortOrder,
};

use crate::value::SqlValue;

/// Default limit for log queries when the caller supplies none
pub const DEFAULT_LOG_LIMIT: i64 = 100;

/// Default limit for trace queries when the caller supplies none
pub const DEFAULT_TRACE_LIMIT: i64 = 500;

/// Floor for the limit ceiling, regardless of pool size
const DEFAULT_MAX_LIMIT: i64 = 2000;

/// Builds ClickHouse SQL statements for telemetry queries
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    log_table: String,
    trace_table: String,
    max_limit: i64,
}

impl QueryBuilder {
    /// Create a new builder instance
    pub fn new(cfg: &ClickHouseConfig) -> Self {
        let pool_limit = i64::from(cfg.max_open_conns) * 100;
        let max_limit = if pool_limit > DEFAULT_MAX_LIMIT {
            pool_limit
        } else {
            DEFAULT_MAX_LIMIT
        };
        Self {
            log_table: cfg.logs_table.clone(),
            trace_table: cfg.traces_table.clone(),
            max_limit,
        }
    }

    /// Build the SQL for component log queries
    pub fn component_logs(
        &self,
        params: &ComponentLogQuery,
    ) -> GatewayResult<(String, Vec<SqlValue>)> {
        if params.component_id.is_empty() {
            return Err(GatewayError::validation("component id is required"));
        }

        let mut cb = ConditionBuilder::new();
        self.apply_base_filters(&mut cb, &params.base)?;

        cb.add("component_id = ?", vec![params.component_id.as_str().into()]);
        if !params.environment_id.is_empty() {
            cb.add(
                "environment_id = ?",
                vec![params.environment_id.as_str().into()],
            );
        }
        if !params.build_id.is_empty() {
            cb.add("build_id = ?", vec![params.build_id.as_str().into()]);
        }
        if !params.build_uuid.is_empty() {
            cb.add("build_uuid = ?", vec![params.build_uuid.as_str().into()]);
        }

        self.assemble_log_query(
            cb,
            params.base.sort_order,
            self.resolve_limit(params.base.limit, DEFAULT_LOG_LIMIT),
        )
    }

    /// Build the SQL for project level log queries
    pub fn project_logs(&self, params: &ProjectLogQuery) -> GatewayResult<(String, Vec<SqlValue>)> {
        if params.project_id.is_empty() {
            return Err(GatewayError::validation("project id is required"));
        }

        let mut cb = ConditionBuilder::new();
        self.apply_base_filters(&mut cb, &params.base)?;
        cb.add("project_id = ?", vec![params.project_id.as_str().into()]);

        if !params.environment_id.is_empty() {
            cb.add(
                "environment_id = ?",
                vec![params.environment_id.as_str().into()],
            );
        }

        if !params.component_ids.is_empty() {
            add_in_clause(&mut cb, "component_id", &params.component_ids);
        }

        self.assemble_log_query(
            cb,
            params.base.sort_order,
            self.resolve_limit(params.base.limit, DEFAULT_LOG_LIMIT),
        )
    }

    /// Build the SQL for gateway traffic queries
    pub fn gateway_logs(&self, params: &GatewayLogQuery) -> GatewayResult<(String, Vec<SqlValue>)> {
        if params.organization_id.is_empty() {
            return Err(GatewayError::validation("organization id is required"));
        }

        let mut cb = ConditionBuilder::new();
        self.apply_base_filters(&mut cb, &params.base)?;
        cb.add(
            "organization_id = ?",
            vec![params.organization_id.as_str().into()],
        );
        if !params.gateway_vhosts.is_empty() {
            add_in_clause(&mut cb, "gateway_vhost", &params.gateway_vhosts);
        }

        if !params.api_id_to_version.is_empty() {
            let mut clauses = Vec::new();
            let mut args = Vec::new();
            for api_id in sorted_keys(&params.api_id_to_version) {
                let version = &params.api_id_to_version[api_id];
                if version.is_empty() {
                    clauses.push("(api_id = ?)".to_string());
                    args.push(api_id.as_str().into());
                } else {
                    clauses.push("(api_id = ? AND api_version = ?)".to_string());
                    args.push(api_id.as_str().into());
                    args.push(version.as_str().into());
                }
            }
            cb.add(&format!("({})", clauses.join(" OR ")), args);
        }

        self.assemble_log_query(
            cb,
            params.base.sort_order,
            self.resolve_limit(params.base.limit, DEFAULT_LOG_LIMIT),
        )
    }

    /// Build the SQL for organization-wide queries
    pub fn organization_logs(
        &self,
        params: &OrganizationLogQuery,
    ) -> GatewayResult<(String, Vec<SqlValue>)> {
        if params.organization_id.is_empty() {
            return Err(GatewayError::validation("organization id is required"));
        }

        let mut cb = ConditionBuilder::new();
        self.apply_base_filters(&mut cb, &params.base)?;
        cb.add(
            "organization_id = ?",
            vec![params.organization_id.as_str().into()],
        );
        if !params.environment_id.is_empty() {
            cb.add(
                "environment_id = ?",
                vec![params.environment_id.as_str().into()],
            );
        }

        if !params.pod_labels.is_empty() {
            // The label key lands inside the JSON path expression, not a bind
            // parameter; quotes and backslashes are escaped but keys from
            // untrusted input remain an injection-sensitive surface.
            for key in sorted_keys(&params.pod_labels) {
                let value = &params.pod_labels[key];
                cb.add(
                    &format!(
                        "JSONExtractString(labels_json, '{}') = ?",
                        escape_json_path(key)
                    ),
                    vec![value.as_str().into()],
                );
            }
        }

        self.assemble_log_query(
            cb,
            params.base.sort_order,
            self.resolve_limit(params.base.limit, DEFAULT_LOG_LIMIT),
        )
    }

    /// Build the SQL for component trace queries
    pub fn component_traces(
        &self,
        params: &ComponentTraceQuery,
    ) -> GatewayResult<(String, Vec<SqlValue>)> {
        if params.service_name.is_empty() {
            return Err(GatewayError::validation("service name is required"));
        }
        let (start, end) = params
            .time_range
            .bounds()
            .ok_or_else(|| GatewayError::validation("time range is required"))?;
        if self.trace_table.is_empty() {
            return Err(GatewayError::configuration("trace table is not configured"));
        }

        let limit = self.resolve_limit(params.limit, DEFAULT_TRACE_LIMIT);

        let sql = format!(
            "SELECT\n    start_time,\n    end_time,\n    span_name,\n    span_id,\n    trace_id,\n    duration_in_nanos,\n    count() OVER () AS total_count\nFROM {}\nWHERE service_name = ?\n  AND start_time BETWEEN ? AND ?\nORDER BY start_time DESC\nLIMIT ?",
            self.trace_table
        );

        let args = vec![
            params.service_name.as_str().into(),
            start.into(),
            end.into(),
            SqlValue::UInt(limit as u64),
        ];

        Ok((sql, args))
    }

    /// Build the SQL for the cost aggregation
    pub fn cost_report(&self, params: &CostReportQuery) -> GatewayResult<(String, Vec<SqlValue>)> {
        if self.log_table.is_empty() {
            return Err(GatewayError::configuration("log table is not configured"));
        }
        let (start, end) = params
            .time_range
            .bounds()
            .ok_or_else(|| GatewayError::validation("cost report requires start and end time"))?;

        let sql = format!(
            "SELECT\n    coalesce(JSONExtractString(labels_json, 'organization-name'), 'unknown') AS organization_id,\n    coalesce(project_id, 'unknown') AS project_id,\n    coalesce(component_id, 'unknown') AS component_id,\n    count() AS log_count,\n    sum(lengthUTF8(log)) AS raw_bytes\nFROM {}\nWHERE timestamp BETWEEN ? AND ?\nGROUP BY organization_id, project_id, component_id\nORDER BY organization_id, project_id, component_id",
            self.log_table
        );

        Ok((sql, vec![start.into(), end.into()]))
    }

    fn apply_base_filters(
        &self,
        cb: &mut ConditionBuilder,
        base: &BaseLogQuery,
    ) -> GatewayResult<()> {
        let (start, end) = base
            .time_range
            .bounds()
            .ok_or_else(|| GatewayError::validation("time range is required"))?;

        cb.add("timestamp BETWEEN ? AND ?", vec![start.into(), end.into()]);

        if !base.search_phrase.is_empty() {
            cb.add(
                "positionCaseInsensitive(log, ?) > 0",
                vec![base.search_phrase.as_str().into()],
            );
        }

        if !base.log_levels.is_empty() {
            add_in_clause(cb, "log_level", &base.log_levels);
        }

        if !base.namespace.is_empty() {
            cb.add("namespace = ?", vec![base.namespace.as_str().into()]);
        }

        if !base.versions.is_empty() {
            add_in_clause(cb, "version", &base.versions);
        }

        if !base.version_ids.is_empty() {
            add_in_clause(cb, "version_id", &base.version_ids);
        }

        if !base.log_type.is_empty() {
            cb.add("log_type = ?", vec![base.log_type.as_str().into()]);
        }

        Ok(())
    }

    fn assemble_log_query(
        &self,
        cb: ConditionBuilder,
        order: SortOrder,
        limit: i64,
    ) -> GatewayResult<(String, Vec<SqlValue>)> {
        if self.log_table.is_empty() {
            return Err(GatewayError::configuration("log table is not configured"));
        }

        let sql = format!(
            "SELECT\n    timestamp,\n    log,\n    log_level,\n    component_id,\n    environment_id,\n    project_id,\n    version,\n    version_id,\n    namespace,\n    pod_id,\n    container_name,\n    labels_json,\n    count() OVER () AS total_count\nFROM {}\nWHERE {}\nORDER BY timestamp {}\nLIMIT ?",
            self.log_table,
            cb.where_clause(),
            order.as_sql()
        );

        let mut args = cb.into_args();
        args.push(SqlValue::UInt(limit as u64));
        Ok((sql, args))
    }

    /// Resolve a requested limit into `[1, max_limit]`
    ///
    /// Values of zero or below fall back to `default`; values above the
    /// ceiling are clamped to it. The function is idempotent.
    pub fn resolve_limit(&self, requested: i64, default: i64) -> i64 {
        let limit = if requested <= 0 { default } else { requested };
        if limit > self.max_limit {
            self.max_limit
        } else {
            limit
        }
    }

    /// The limit ceiling derived from the connection pool size
    pub fn max_limit(&self) -> i64 {
        self.max_limit
    }
}

/// Accumulates AND-joined WHERE clauses and their positional arguments
struct ConditionBuilder {
    clauses: Vec<String>,
    args: Vec<SqlValue>,
}

impl ConditionBuilder {
    fn new() -> Self {
        Self {
            clauses: Vec::new(),
            args: Vec::new(),
        }
    }

    fn add(&mut self, clause: &str, args: Vec<SqlValue>) {
        if clause.is_empty() {
            return;
        }
        self.clauses.push(clause.to_string());
        self.args.extend(args);
    }

    fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            "1=1".to_string()
        } else {
            self.clauses.join(" AND ")
        }
    }

    fn into_args(self) -> Vec<SqlValue> {
        self.args
    }
}

fn add_in_clause(cb: &mut ConditionBuilder, column: &str, values: &[String]) {
    if values.is_empty() {
        return;
    }
    let clause = format!("{} IN ({})", column, placeholders(values.len()));
    let args = values.iter().map(|v| v.as_str().into()).collect();
    cb.add(&clause, args);
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

/// Map keys in lexicographic order, for deterministic clause emission
fn sorted_keys<V>(map: &HashMap<String, V>) -> Vec<&String> {
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();
    keys
}

/// Escape a label key for interpolation into a JSON path literal
fn escape_json_path(key: &str) -> String {
    key.replace('\\', "\\\\").replace('\'', "\\'")
}
