//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! Columnar store configuration for the Vantage telemetry gateway

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{GatewayError, GatewayResult};

/// Payload compression negotiated with the columnar store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionMethod {
    /// LZ4 block compression (default)
    #[default]
    Lz4,

    /// Zstandard compression
    Zstd,

    /// No compression
    None,
}

impl CompressionMethod {
    /// Resolve a caller-supplied method name; unrecognized values resolve
    /// to LZ4
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "zstd" => CompressionMethod::Zstd,
            "none" => CompressionMethod::None,
            _ => CompressionMethod::Lz4,
        }
    }
}

/// ClickHouse connection configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClickHouseConfig {
    /// Server hosts (`host:port`); the first reachable host is used
    #[validate(length(min = 1))]
    pub hosts: Vec<String>,

    /// Database name
    pub database: String,

    /// Username
    pub username: String,

    /// Password
    pub password: String,

    /// Connect over HTTPS
    pub secure: bool,

    /// CA certificate path; loaded by the deployment layer
    pub ca_cert: Option<String>,

    /// Client certificate path; loaded by the deployment layer
    pub client_cert: Option<String>,

    /// Client key path; loaded by the deployment layer
    pub client_key: Option<String>,

    /// Connect timeout in seconds
    #[validate(range(min = 1))]
    pub connect_timeout_secs: u64,

    /// Per-query timeout in seconds
    pub query_timeout_secs: u64,

    /// Fully qualified logs table name
    pub logs_table: String,

    /// Fully qualified traces table name
    pub traces_table: String,

    /// Maximum concurrent in-flight queries
    pub max_open_conns: u32,

    /// Maximum idle pooled connections
    pub max_idle_conns: u32,

    /// Maximum pooled connection lifetime in seconds
    pub conn_max_lifetime_secs: u64,

    /// Payload compression method
    pub compression: CompressionMethod,
}

impl Default for ClickHouseConfig {
    fn default() -> Self {
        Self {
            hosts: vec!["localhost:8123".to_string()],
            database: "telemetry".to_string(),
            username: "default".to_string(),
            password: String::new(),
            secure: false,
            ca_cert: None,
            client_cert: None,
            client_key: None,
            connect_timeout_secs: 30,
            query_timeout_secs: 10,
            logs_table: "telemetry.logs_mv".to_string(),
            traces_table: "telemetry.traces_mv".to_string(),
            max_open_conns: 10,
            max_idle_conns: 5,
            conn_max_lifetime_secs: 300,
            compression: CompressionMethod::Lz4,
        }
    }
}

impl ClickHouseConfig {
    /// Require both table names; queries cannot be assembled without them
    pub fn validate_tables(&self) -> GatewayResult<()> {
        if self.logs_table.is_empty() || self.traces_table.is_empty() {
            return Err(GatewayError::configuration(
                "clickhouse logs and traces table names are required",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_parse_falls_back_to_lz4() {
        assert_eq!(CompressionMethod::parse("zstd"), CompressionMethod::Zstd);
        assert_eq!(CompressionMethod::parse("NONE"), CompressionMethod::None);
        assert_eq!(CompressionMethod::parse("snappy"), CompressionMethod::Lz4);
        assert_eq!(CompressionMethod::parse(""), CompressionMethod::Lz4);
    }

    #[test]
    fn test_default_config_has_tables() {
        let cfg = ClickHouseConfig::default();
        assert!(cfg.validate_tables().is_ok());
        assert_eq!(cfg.query_timeout_secs, 10);
    }
}
