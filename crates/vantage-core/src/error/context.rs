//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! Error context for the Vantage telemetry gateway
//!
//! This module provides error context structures and utilities for logging
//! and monitoring error information.

use std::fmt;

use super::types::GatewayError;

/// Error context for logging and monitoring
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub error_type: &'static str,
    pub retryable: bool,
    pub transient: bool,
    pub permanent: bool,
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ErrorContext {{ type: {}, retryable: {}, transient: {}, permanent: {} }}",
            self.error_type, self.retryable, self.transient, self.permanent
        )
    }
}

impl GatewayError {
    /// Get the error context for this error
    pub fn context(&self) -> ErrorContext {
        match self {
            GatewayError::Validation { .. } => ErrorContext {
                error_type: "validation",
                retryable: false,
                transient: false,
                permanent: true,
            },
            GatewayError::Configuration { .. } => ErrorContext {
                error_type: "configuration",
                retryable: false,
                transient: false,
                permanent: true,
            },
            GatewayError::Execution { .. } => ErrorContext {
                error_type: "execution",
                retryable: true,
                transient: true,
                permanent: false,
            },
            GatewayError::Decode { .. } => ErrorContext {
                error_type: "decode",
                retryable: false,
                transient: false,
                permanent: true,
            },
            GatewayError::Serialization { .. } => ErrorContext {
                error_type: "serialization",
                retryable: false,
                transient: false,
                permanent: true,
            },
            GatewayError::Internal { .. } => ErrorContext {
                error_type: "internal",
                retryable: false,
                transient: true,
                permanent: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_errors_are_retryable() {
        let ctx = GatewayError::execution("connection refused").context();
        assert_eq!(ctx.error_type, "execution");
        assert!(ctx.retryable);
        assert!(ctx.transient);
    }

    #[test]
    fn test_validation_errors_are_permanent() {
        let ctx = GatewayError::validation("component id is required").context();
        assert_eq!(ctx.error_type, "validation");
        assert!(!ctx.retryable);
        assert!(ctx.permanent);
    }
}
