//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! Legacy document-search configuration

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Document-search connection configuration
///
/// Only the settings the gateway itself consults live here; the client is
/// an external collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchConfig {
    /// Engine address
    #[validate(length(min = 1))]
    pub address: String,

    /// Username
    pub username: String,

    /// Password
    pub password: String,

    /// Request timeout in seconds
    #[validate(range(min = 1))]
    pub timeout_secs: u64,

    /// Index name prefix for time-partitioned log indices
    pub index_prefix: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            address: "http://localhost:9200".to_string(),
            username: "admin".to_string(),
            password: "admin".to_string(),
            timeout_secs: 180,
            index_prefix: "kubernetes-".to_string(),
        }
    }
}
