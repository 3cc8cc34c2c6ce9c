//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! Query parameter types for the Vantage telemetry gateway

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::time_range::TimeRange;

/// Sort direction for log queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending timestamp order
    Asc,

    /// Descending timestamp order (default)
    #[default]
    Desc,
}

impl SortOrder {
    /// Resolve a caller-supplied order string; `asc` matches
    /// case-insensitively, anything else resolves to descending
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("asc") {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }

    /// SQL keyword for this order
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Shared filters embedded by every log query variant
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaseLogQuery {
    /// Time window; both endpoints required before any SQL is built
    pub time_range: TimeRange,

    /// Free-text search phrase (case-insensitive substring match)
    pub search_phrase: String,

    /// Log level filter set
    pub log_levels: Vec<String>,

    /// Result limit; values <= 0 resolve to the per-shape default
    pub limit: i64,

    /// Sort order
    pub sort_order: SortOrder,

    /// Namespace filter
    pub namespace: String,

    /// Version filter set
    pub versions: Vec<String>,

    /// Version ID filter set
    pub version_ids: Vec<String>,

    /// Log type tag filter
    pub log_type: String,
}

impl BaseLogQuery {
    /// Create a base query over a time window
    pub fn new(time_range: TimeRange) -> Self {
        Self {
            time_range,
            ..Default::default()
        }
    }

    /// Set the search phrase
    pub fn with_search_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.search_phrase = phrase.into();
        self
    }

    /// Set the log level filter set
    pub fn with_log_levels(mut self, levels: Vec<String>) -> Self {
        self.log_levels = levels;
        self
    }

    /// Set the result limit
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// Set the sort order
    pub fn with_sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = order;
        self
    }

    /// Set the namespace filter
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the log type tag filter
    pub fn with_log_type(mut self, log_type: impl Into<String>) -> Self {
        self.log_type = log_type.into();
        self
    }
}

/// Component level log query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentLogQuery {
    /// Shared filters
    pub base: BaseLogQuery,

    /// Component identifier (required)
    pub component_id: String,

    /// Environment filter
    pub environment_id: String,

    /// Build identifier filter
    pub build_id: String,

    /// Build UUID filter
    pub build_uuid: String,
}

/// Project level log query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectLogQuery {
    /// Shared filters
    pub base: BaseLogQuery,

    /// Project identifier (required)
    pub project_id: String,

    /// Component identifier filter set
    pub component_ids: Vec<String>,

    /// Environment filter
    pub environment_id: String,
}

/// Organization wide log query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationLogQuery {
    /// Shared filters
    pub base: BaseLogQuery,

    /// Organization identifier (required)
    pub organization_id: String,

    /// Environment filter
    pub environment_id: String,

    /// Pod label selectors; keys are emitted in lexicographic order
    pub pod_labels: HashMap<String, String>,
}

/// Gateway traffic log query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayLogQuery {
    /// Shared filters
    pub base: BaseLogQuery,

    /// Organization identifier (required)
    pub organization_id: String,

    /// API id to version map; an empty version matches every version
    pub api_id_to_version: HashMap<String, String>,

    /// Gateway virtual host filter set
    pub gateway_vhosts: Vec<String>,
}

/// Component trace query; independent of the shared log filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentTraceQuery {
    /// Service name (required)
    pub service_name: String,

    /// Time window; both endpoints required
    pub time_range: TimeRange,

    /// Result limit; values <= 0 resolve to the trace default
    pub limit: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_parse_is_case_insensitive() {
        assert_eq!(SortOrder::parse("asc"), SortOrder::Asc);
        assert_eq!(SortOrder::parse("ASC"), SortOrder::Asc);
        assert_eq!(SortOrder::parse("Asc"), SortOrder::Asc);
    }

    #[test]
    fn test_sort_order_parse_defaults_to_desc() {
        assert_eq!(SortOrder::parse("desc"), SortOrder::Desc);
        assert_eq!(SortOrder::parse("descending"), SortOrder::Desc);
        assert_eq!(SortOrder::parse(""), SortOrder::Desc);
        assert_eq!(SortOrder::default(), SortOrder::Desc);
    }

    #[test]
    fn test_base_query_builder_methods() {
        let query = BaseLogQuery::new(TimeRange::last_hours(1))
            .with_search_phrase("timeout")
            .with_limit(25)
            .with_sort_order(SortOrder::Asc)
            .with_namespace("default");
        assert_eq!(query.search_phrase, "timeout");
        assert_eq!(query.limit, 25);
        assert_eq!(query.sort_order, SortOrder::Asc);
        assert_eq!(query.namespace, "default");
    }
}
