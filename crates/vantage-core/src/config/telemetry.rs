//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! Backend selection and dual-read configuration

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;

use crate::error::{GatewayError, GatewayResult};

/// Telemetry backend selection
///
/// Resolved once at service construction; the dispatcher routes through a
/// capability trait rather than re-deriving the backend per call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TelemetryBackend {
    /// Columnar analytics store
    ClickHouse,

    /// Legacy document-search engine (default)
    #[default]
    OpenSearch,
}

impl FromStr for TelemetryBackend {
    type Err = GatewayError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "clickhouse" => Ok(TelemetryBackend::ClickHouse),
            "opensearch" => Ok(TelemetryBackend::OpenSearch),
            other => Err(GatewayError::configuration(format!(
                "unknown telemetry backend: {other}"
            ))),
        }
    }
}

/// Embed-link signing configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EmbedLinkConfig {
    /// Dashboard base URL; trailing slashes are trimmed
    pub base_url: String,

    /// HMAC signing key; signing is disabled while empty
    pub signing_key: String,

    /// Link time-to-live in seconds; non-positive values fall back to the
    /// 15 minute default
    pub ttl_secs: i64,
}

/// Backend selection and dual-read settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TelemetryConfig {
    /// Selected backend
    pub backend: TelemetryBackend,

    /// Enable sampled shadow reads against the non-primary backend
    pub dual_read: bool,

    /// Probability that a request also issues a shadow read
    #[validate(range(min = 0.0, max = 1.0))]
    pub dual_sample_rate: f64,

    /// Embed-link signing settings
    #[validate]
    pub embed: EmbedLinkConfig,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            backend: TelemetryBackend::default(),
            dual_read: false,
            dual_sample_rate: 0.05,
            embed: EmbedLinkConfig::default(),
        }
    }
}

impl TelemetryConfig {
    /// Cross-field validation for the embed-link settings
    pub fn validate_embed(&self) -> GatewayResult<()> {
        if !self.embed.signing_key.is_empty() && self.embed.base_url.is_empty() {
            return Err(GatewayError::configuration(
                "embed base url is required when signing is enabled",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_str_is_case_insensitive() {
        assert_eq!(
            "ClickHouse".parse::<TelemetryBackend>().unwrap(),
            TelemetryBackend::ClickHouse
        );
        assert_eq!(
            "OPENSEARCH".parse::<TelemetryBackend>().unwrap(),
            TelemetryBackend::OpenSearch
        );
        assert!("elastic".parse::<TelemetryBackend>().is_err());
    }

    #[test]
    fn test_signing_key_requires_base_url() {
        let cfg = TelemetryConfig {
            embed: EmbedLinkConfig {
                signing_key: "secret".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(cfg.validate_embed().is_err());
    }
}
