//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! Result normalization for the legacy search backend
//!
//! Pure mapping functions from the document-search hit shape into the
//! canonical record shapes. Field names differ at the source; the canonical
//! shape is backend-agnostic. Malformed documents are replaced by default
//! records rather than dropped so result lengths stay faithful to the hit
//! count. No side effects, no I/O.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::warn;

use vantage_core::traits::SearchResponse;
use vantage_core::types::{LogRecord, LogResult, TraceRecord, TraceResult};

/// Log document shape as stored in the search indices
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchLogDocument {
    #[serde(rename = "@timestamp")]
    timestamp: Option<DateTime<Utc>>,
    log: String,
    #[serde(rename = "logLevel")]
    log_level: String,
    #[serde(rename = "componentId")]
    component_id: String,
    #[serde(rename = "environmentId")]
    environment_id: String,
    #[serde(rename = "projectId")]
    project_id: String,
    version: String,
    #[serde(rename = "versionId")]
    version_id: String,
    namespace: String,
    #[serde(rename = "podId")]
    pod_id: String,
    #[serde(rename = "containerName")]
    container_name: String,
    labels: HashMap<String, String>,
}

/// Span document shape as stored in the trace indices
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchSpanDocument {
    #[serde(rename = "startTime")]
    start_time: Option<DateTime<Utc>>,
    #[serde(rename = "endTime")]
    end_time: Option<DateTime<Utc>>,
    name: String,
    #[serde(rename = "spanId")]
    span_id: String,
    #[serde(rename = "traceId")]
    trace_id: String,
    #[serde(rename = "durationInNanos")]
    duration_in_nanos: i64,
}

/// Map a search response into the canonical log result shape
pub fn log_result_from_search(response: &SearchResponse) -> LogResult {
    let logs = response
        .hits
        .hits
        .iter()
        .map(|hit| {
            let doc: SearchLogDocument = serde_json::from_value(hit.source.clone())
                .unwrap_or_else(|e| {
                    warn!(hit = %hit.id, error = %e, "malformed log document, substituting default");
                    SearchLogDocument::default()
                });
            LogRecord {
                timestamp: doc.timestamp.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
                log: doc.log,
                log_level: doc.log_level,
                component_id: doc.component_id,
                environment_id: doc.environment_id,
                project_id: doc.project_id,
                version: doc.version,
                version_id: doc.version_id,
                namespace: doc.namespace,
                pod_id: doc.pod_id,
                container_name: doc.container_name,
                labels: doc.labels,
            }
        })
        .collect();

    LogResult {
        logs,
        total_count: response.hits.total.value,
        took_ms: response.took,
    }
}

/// Map a search response into the canonical trace result shape
pub fn trace_result_from_search(response: &SearchResponse) -> TraceResult {
    let spans = response
        .hits
        .hits
        .iter()
        .map(|hit| {
            let doc: SearchSpanDocument = serde_json::from_value(hit.source.clone())
                .unwrap_or_else(|e| {
                    warn!(hit = %hit.id, error = %e, "malformed span document, substituting default");
                    SearchSpanDocument::default()
                });
            TraceRecord {
                duration_in_nanos: doc.duration_in_nanos,
                end_time: doc.end_time.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
                name: doc.name,
                span_id: doc.span_id,
                start_time: doc.start_time.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
                trace_id: doc.trace_id,
            }
        })
        .collect();

    TraceResult {
        spans,
        total_count: response.hits.total.value,
        took_ms: response.took,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(hits: Vec<serde_json::Value>, total: u64, took: u64) -> SearchResponse {
        serde_json::from_value(json!({
            "took": took,
            "hits": {
                "total": { "value": total },
                "hits": hits,
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_log_documents_map_to_canonical_records() {
        let response = response(
            vec![json!({
                "_id": "h1",
                "_source": {
                    "@timestamp": "2025-03-01T10:00:00Z",
                    "log": "request handled",
                    "logLevel": "INFO",
                    "componentId": "comp-1",
                    "environmentId": "dev",
                    "projectId": "proj-1",
                    "namespace": "default",
                    "podId": "pod-a",
                    "containerName": "app",
                    "labels": { "app": "checkout" }
                }
            })],
            27,
            13,
        );

        let result = log_result_from_search(&response);
        assert_eq!(result.total_count, 27);
        assert_eq!(result.took_ms, 13);
        assert_eq!(result.logs.len(), 1);

        let record = &result.logs[0];
        assert_eq!(record.log, "request handled");
        assert_eq!(record.log_level, "INFO");
        assert_eq!(record.component_id, "comp-1");
        assert_eq!(record.timestamp.to_rfc3339(), "2025-03-01T10:00:00+00:00");
        assert_eq!(record.labels.get("app").map(String::as_str), Some("checkout"));
    }

    #[test]
    fn test_malformed_documents_keep_result_length() {
        let response = response(
            vec![
                json!({ "_id": "good", "_source": { "log": "ok" } }),
                json!({ "_id": "bad", "_source": { "log": 42 } }),
            ],
            2,
            1,
        );
        let result = log_result_from_search(&response);
        assert_eq!(result.logs.len(), 2);
        assert_eq!(result.logs[0].log, "ok");
        assert_eq!(result.logs[1].log, "");
    }

    #[test]
    fn test_span_documents_map_to_canonical_records() {
        let response = response(
            vec![json!({
                "_id": "s1",
                "_source": {
                    "startTime": "2025-03-01T10:00:00Z",
                    "endTime": "2025-03-01T10:00:01Z",
                    "name": "GET /orders",
                    "spanId": "span-1",
                    "traceId": "trace-1",
                    "durationInNanos": 1_000_000_000u64,
                }
            })],
            1,
            4,
        );
        let result = trace_result_from_search(&response);
        assert_eq!(result.total_count, 1);
        let span = &result.spans[0];
        assert_eq!(span.name, "GET /orders");
        assert_eq!(span.duration_in_nanos, 1_000_000_000);
        assert!(span.end_time > span.start_time);
    }

    #[test]
    fn test_empty_response_yields_empty_result() {
        let result = log_result_from_search(&SearchResponse::default());
        assert!(result.logs.is_empty());
        assert_eq!(result.total_count, 0);
    }
}
