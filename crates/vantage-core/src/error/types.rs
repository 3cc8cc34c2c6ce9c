//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! Error types for the Vantage telemetry gateway
//!
//! This module provides the main error type and structures used throughout
//! the gateway. Each variant carries a message and an optional boxed source
//! so logging can report both without losing the original failure detail.

use std::error::Error as StdError;
use thiserror::Error;

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Missing or malformed caller input; no backend call is attempted
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Required table, backend, or signing material not configured
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Backend connectivity, query, or timeout failure
    #[error("Execution error: {message}")]
    Execution {
        message: String,
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Malformed per-row payload; recovered locally, never escalated
    #[error("Decode error: {message}")]
    Decode {
        message: String,
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Internal errors
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

impl GatewayError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        GatewayError::Validation {
            message: message.into(),
            source: None,
        }
    }

    /// Create a validation error with source
    pub fn validation_with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        GatewayError::Validation {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        GatewayError::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        GatewayError::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an execution error
    pub fn execution(message: impl Into<String>) -> Self {
        GatewayError::Execution {
            message: message.into(),
            source: None,
        }
    }

    /// Create an execution error with source
    pub fn execution_with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        GatewayError::Execution {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        GatewayError::Decode {
            message: message.into(),
            source: None,
        }
    }

    /// Create a decode error with source
    pub fn decode_with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        GatewayError::Decode {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        GatewayError::Serialization {
            message: message.into(),
            source: None,
        }
    }

    /// Create a serialization error with source
    pub fn serialization_with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        GatewayError::Serialization {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        GatewayError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Create an internal error with source
    pub fn internal_with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        GatewayError::Internal {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_message() {
        let err = GatewayError::validation("time range is required");
        assert_eq!(err.to_string(), "Validation error: time range is required");
    }

    #[test]
    fn test_error_with_source_preserves_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::TimedOut, "deadline exceeded");
        let err = GatewayError::execution_with_source("clickhouse query failed", cause);
        match err {
            GatewayError::Execution { source, .. } => assert!(source.is_some()),
            _ => panic!("expected execution error"),
        }
    }
}
