//! SPDX-FileCopyrightText: © 2025 The Vantage Authors
//! SPDX-License-Identifier: Apache-2.0
//!

//! Embed-link signer
//!
//! Produces expiring, tamper-evident dashboard URLs. The signature is an
//! HMAC-SHA-256 over a canonical string (the path followed by `|key=value`
//! for every parameter in lexicographic key order), encoded as URL-safe
//! base64 without padding. Identical (path, params, expiry) always yield
//! the identical signature.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::{BTreeMap, HashMap};

use vantage_core::config::EmbedLinkConfig;
use vantage_core::error::{GatewayError, GatewayResult};

type HmacSha256 = Hmac<Sha256>;

/// Default link time-to-live
const DEFAULT_TTL_SECS: i64 = 15 * 60;

/// Parameter name carrying the expiry timestamp
const EXPIRES_PARAM: &str = "expires";

/// Parameter name carrying the signature
const SIGNATURE_PARAM: &str = "signature";

/// Signs dashboard embed URLs
#[derive(Debug, Clone)]
pub struct EmbedLinkSigner {
    base_url: String,
    key: Vec<u8>,
    ttl: Duration,
}

impl EmbedLinkSigner {
    /// Create a signer when both the signing key and base URL are configured
    pub fn from_config(cfg: &EmbedLinkConfig) -> Option<Self> {
        if cfg.signing_key.is_empty() || cfg.base_url.is_empty() {
            return None;
        }
        let ttl_secs = if cfg.ttl_secs > 0 {
            cfg.ttl_secs
        } else {
            DEFAULT_TTL_SECS
        };
        Some(Self {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            key: cfg.signing_key.as_bytes().to_vec(),
            ttl: Duration::seconds(ttl_secs),
        })
    }

    /// Build a signed URL for the provided path and query parameters
    pub fn generate(&self, path: &str, params: &HashMap<String, String>) -> GatewayResult<String> {
        let expires = (Utc::now() + self.ttl).timestamp();
        self.generate_at(path, params, expires)
    }

    /// Build a signed URL with an explicit expiry timestamp
    pub fn generate_at(
        &self,
        path: &str,
        params: &HashMap<String, String>,
        expires: i64,
    ) -> GatewayResult<String> {
        let path = normalize_path(path);

        let mut query: BTreeMap<String, String> = params.clone().into_iter().collect();
        query.insert(EXPIRES_PARAM.to_string(), expires.to_string());

        let signature = self.sign(&path, &query)?;
        query.insert(SIGNATURE_PARAM.to_string(), signature);

        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &query {
            serializer.append_pair(key, value);
        }

        Ok(format!("{}{}?{}", self.base_url, path, serializer.finish()))
    }

    /// Verify a presented parameter set against its embedded signature
    ///
    /// Returns `Ok(true)` only when the signature matches the canonical
    /// recomputation and the link has not expired.
    pub fn verify(&self, path: &str, params: &HashMap<String, String>) -> GatewayResult<bool> {
        let path = normalize_path(path);

        let presented = params
            .get(SIGNATURE_PARAM)
            .ok_or_else(|| GatewayError::validation("signature parameter is required"))?;
        let expires: i64 = params
            .get(EXPIRES_PARAM)
            .ok_or_else(|| GatewayError::validation("expires parameter is required"))?
            .parse()
            .map_err(|_| GatewayError::validation("expires parameter is not a timestamp"))?;

        if expires < Utc::now().timestamp() {
            return Ok(false);
        }

        let query: BTreeMap<String, String> = params
            .iter()
            .filter(|(key, _)| key.as_str() != SIGNATURE_PARAM)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let mut mac = self.mac()?;
        mac.update(canonical_string(&path, &query).as_bytes());
        let decoded = URL_SAFE_NO_PAD
            .decode(presented)
            .map_err(|_| GatewayError::validation("signature is not valid base64"))?;
        Ok(mac.verify_slice(&decoded).is_ok())
    }

    fn sign(&self, path: &str, query: &BTreeMap<String, String>) -> GatewayResult<String> {
        let mut mac = self.mac()?;
        mac.update(canonical_string(path, query).as_bytes());
        Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
    }

    fn mac(&self) -> GatewayResult<HmacSha256> {
        HmacSha256::new_from_slice(&self.key)
            .map_err(|e| GatewayError::internal_with_source("invalid signing key", e))
    }
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

fn canonical_string(path: &str, query: &BTreeMap<String, String>) -> String {
    let mut canonical = String::from(path);
    for (key, value) in query {
        canonical.push('|');
        canonical.push_str(key);
        canonical.push('=');
        canonical.push_str(value);
    }
    canonical
}
