//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! ClickHouse backend for the Vantage telemetry gateway
//!
//! This crate turns the gateway's typed query shapes into parameterized
//! ClickHouse SQL, executes the statements under timeout discipline, and
//! decodes result rows into the canonical record shapes.

pub mod builder;
pub mod provider;
pub mod rows;
pub mod value;

// Re-export commonly used types
pub use builder::QueryBuilder;
pub use provider::ClickHouseProvider;
pub use value::SqlValue;
