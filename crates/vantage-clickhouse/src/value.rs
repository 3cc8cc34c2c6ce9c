//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! Typed positional arguments for generated SQL
//!
//! The builder emits these instead of driver-level bind values so statement
//! generation stays pure and its output can be asserted in tests without a
//! live connection.

use chrono::{DateTime, Utc};

/// One positional SQL argument
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// String argument
    Text(String),

    /// Unsigned integer argument (limits, counts)
    UInt(u64),

    /// UTC timestamp argument
    DateTime(DateTime<Utc>),
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<u64> for SqlValue {
    fn from(value: u64) -> Self {
        SqlValue::UInt(value)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(value: DateTime<Utc>) -> Self {
        SqlValue::DateTime(value)
    }
}
