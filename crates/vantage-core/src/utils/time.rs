//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! Time utilities for the Vantage telemetry gateway

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};

use crate::error::{GatewayError, GatewayResult};

/// Accepted timestamp layouts, tried in order
const TIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%:z",
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M:%SZ",
];

/// Parse an RFC 3339 style timestamp, normalized to UTC
pub fn parse_timestamp(value: &str) -> GatewayResult<DateTime<Utc>> {
    for layout in TIME_LAYOUTS {
        if let Ok(ts) = DateTime::parse_from_str(value, layout) {
            return Ok(ts.with_timezone(&Utc));
        }
        if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(value, layout) {
            return Ok(naive.and_utc());
        }
    }
    Err(GatewayError::validation(format!(
        "cannot parse timestamp {value:?}"
    )))
}

/// Resolve a `"YYYY-MM"` month token into `[first_of_month, first_of_next_month)`
///
/// An absent or empty token defaults to the current UTC month.
pub fn month_range(token: Option<&str>) -> GatewayResult<(DateTime<Utc>, DateTime<Utc>)> {
    let first = match token.map(str::trim) {
        None | Some("") => {
            let now = Utc::now();
            NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
                .ok_or_else(|| GatewayError::internal("current month is unrepresentable"))?
        }
        Some(value) => NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d")
            .map_err(|_| GatewayError::validation("invalid month format, expected YYYY-MM"))?,
    };

    let next = first
        .checked_add_months(Months::new(1))
        .ok_or_else(|| GatewayError::validation("month is out of range"))?;

    let to_utc = |date: NaiveDate| -> GatewayResult<DateTime<Utc>> {
        date.and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc())
            .ok_or_else(|| GatewayError::internal("midnight is unrepresentable"))
    };

    Ok((to_utc(first)?, to_utc(next)?))
}
