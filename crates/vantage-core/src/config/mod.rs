//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! Configuration for the Vantage telemetry gateway
//!
//! This module provides typed configuration for both storage backends and
//! the dispatcher. Environment-variable mapping beyond the standard
//! `VANTAGE_` overlay is owned by the deployment layer.

pub mod clickhouse;
pub mod search;
pub mod telemetry;

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::error::{GatewayError, GatewayResult};

// Re-export commonly used types
pub use clickhouse::{ClickHouseConfig, CompressionMethod};
pub use search::SearchConfig;
pub use telemetry::{EmbedLinkConfig, TelemetryBackend, TelemetryConfig};

/// Top-level observer configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ObserverConfig {
    /// Backend selection and dual-read settings
    #[validate]
    pub telemetry: TelemetryConfig,

    /// Columnar store connection settings
    #[validate]
    pub clickhouse: ClickHouseConfig,

    /// Legacy document-search connection settings
    #[validate]
    pub search: SearchConfig,
}

impl ObserverConfig {
    /// Load configuration from a file with a `VANTAGE_` environment overlay
    pub fn from_file(path: &Path) -> GatewayResult<Self> {
        let raw = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("VANTAGE").separator("__"))
            .build()
            .map_err(|e| {
                GatewayError::configuration_with_source("Failed to load configuration", e)
            })?;

        let cfg: ObserverConfig = raw.try_deserialize().map_err(|e| {
            GatewayError::configuration_with_source("Failed to deserialize configuration", e)
        })?;

        cfg.validate_config()?;
        Ok(cfg)
    }

    /// Validate the configuration, including cross-field rules
    pub fn validate_config(&self) -> GatewayResult<()> {
        self.validate().map_err(|e| {
            GatewayError::configuration_with_source("Configuration validation failed", e)
        })?;

        if self.telemetry.backend == TelemetryBackend::ClickHouse {
            self.clickhouse.validate_tables()?;
        }
        self.telemetry.validate_embed()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let cfg = ObserverConfig::default();
        // The default backend is the search engine, so table names are not
        // required yet.
        assert!(cfg.validate_config().is_ok());
    }

    #[test]
    fn test_columnar_backend_requires_tables() {
        let mut cfg = ObserverConfig::default();
        cfg.telemetry.backend = TelemetryBackend::ClickHouse;
        cfg.clickhouse.logs_table = String::new();
        assert!(cfg.validate_config().is_err());
    }

    #[test]
    fn test_sample_rate_range_is_enforced() {
        let mut cfg = ObserverConfig::default();
        cfg.telemetry.dual_sample_rate = 1.5;
        assert!(cfg.validate_config().is_err());
    }
}
