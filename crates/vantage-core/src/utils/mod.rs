//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! Utility functions for the Vantage telemetry gateway

pub mod time;
