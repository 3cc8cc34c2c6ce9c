//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! Legacy document-search contracts
//!
//! The gateway does not reimplement the legacy search client or its query
//! body construction; it only issues a body per query shape and parses the
//! hit/total/took response shape. Both sides of that contract are modeled
//! here so the dispatcher can be exercised against mocks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GatewayResult;
use crate::types::{
    ComponentLogQuery, ComponentTraceQuery, GatewayLogQuery, OrganizationLogQuery,
    ProjectLogQuery, TimeRange,
};

/// Document-search client capability (external collaborator)
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Execute a query body against a set of indices
    async fn search(&self, indices: &[String], body: Value) -> GatewayResult<SearchResponse>;

    /// Fetch the field mapping of an index
    async fn get_index_mapping(&self, index: &str) -> GatewayResult<Value>;

    /// Lightweight connectivity probe
    async fn health_check(&self) -> GatewayResult<()>;
}

/// Per-shape query body construction (external collaborator)
///
/// Body construction is owned by the legacy stack; the gateway only needs a
/// body and an index list for each query shape it dispatches.
pub trait SearchQueryPlanner: Send + Sync {
    /// Index list covering a log time window
    fn log_indices(&self, range: &TimeRange) -> GatewayResult<Vec<String>>;

    /// Index list covering trace queries
    fn trace_indices(&self) -> Vec<String>;

    /// Body for a component log query
    fn component_logs(&self, query: &ComponentLogQuery) -> GatewayResult<Value>;

    /// Body for a project log query
    fn project_logs(&self, query: &ProjectLogQuery) -> GatewayResult<Value>;

    /// Body for a gateway log query
    fn gateway_logs(&self, query: &GatewayLogQuery) -> GatewayResult<Value>;

    /// Body for an organization log query
    fn organization_logs(&self, query: &OrganizationLogQuery) -> GatewayResult<Value>;

    /// Body for a component trace query
    fn component_traces(&self, query: &ComponentTraceQuery) -> GatewayResult<Value>;
}

/// Search response envelope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Elapsed milliseconds reported by the engine
    #[serde(default)]
    pub took: u64,

    /// Result hits
    #[serde(default)]
    pub hits: SearchHits,
}

/// Hit collection with windowed total
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchHits {
    /// Total matching documents
    #[serde(default)]
    pub total: SearchTotal,

    /// Returned documents
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

/// Windowed total count
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchTotal {
    /// Total value
    #[serde(default)]
    pub value: u64,
}

/// One search hit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchHit {
    /// Document identifier
    #[serde(rename = "_id", default)]
    pub id: String,

    /// Document payload
    #[serde(rename = "_source", default)]
    pub source: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_parses_engine_shape() {
        let raw = serde_json::json!({
            "took": 12,
            "hits": {
                "total": { "value": 3 },
                "hits": [
                    { "_id": "a", "_source": { "log": "hello" } }
                ]
            }
        });
        let response: SearchResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.took, 12);
        assert_eq!(response.hits.total.value, 3);
        assert_eq!(response.hits.hits.len(), 1);
        assert_eq!(response.hits.hits[0].source["log"], "hello");
    }

    #[test]
    fn test_search_response_tolerates_missing_fields() {
        let response: SearchResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(response.hits.total.value, 0);
        assert!(response.hits.hits.is_empty());
    }
}
