//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! Capability traits for the Vantage telemetry gateway
//!
//! This module provides the storage capability trait implemented by telemetry
//! backends, and the contracts the gateway consumes from the legacy
//! document-search stack.

pub mod search;
pub mod storage;

// Re-export commonly used types
pub use search::{
    SearchClient, SearchHit, SearchHits, SearchQueryPlanner, SearchResponse, SearchTotal,
};
pub use storage::TelemetryStore;
