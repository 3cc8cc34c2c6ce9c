//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! Error handling for the Vantage telemetry gateway
//!
//! This module provides structured error types with a kind tag and an
//! optional underlying cause for all components of the gateway.

pub mod context;
pub mod types;

// Re-export commonly used types
pub use context::ErrorContext;
pub use types::{GatewayError, GatewayResult};
