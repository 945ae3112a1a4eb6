/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! JWKS (JSON Web Key Set) cache with rate-limited refresh.
//!
//! Only P-256 keys usable with ES256 are retained; anything else published
//! by the provider is ignored.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use jsonwebtoken::DecodingKey;
use serde::Deserialize;
use tokio::sync::{Mutex, RwLock};

use crate::error::AuthError;

/// Minimum interval between JWKS refreshes (5 minutes).
const JWKS_REFRESH_INTERVAL_SECS: u64 = 300;

/// Upper bound on a single JWKS fetch.
const JWKS_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// A JWK entry from the JWKS endpoint.
#[derive(Debug, Deserialize)]
struct JwkEntry {
    kid: Option<String>,
    kty: String,
    #[serde(default)]
    alg: Option<String>,
    #[serde(default, rename = "use")]
    key_use: Option<String>,
    #[serde(default)]
    crv: Option<String>,
    #[serde(default)]
    x: Option<String>,
    #[serde(default)]
    y: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JwksDocument {
    keys: Vec<JwkEntry>,
}

/// Caches ES256 verification keys fetched from the provider, with
/// rate-limited refresh.
pub struct JwksCache {
    /// Keys indexed by `kid`. Keys published without a `kid` are stored
    /// under a generated `#<index>` name so they are still candidates for
    /// tokens that omit `kid`.
    keys: RwLock<HashMap<String, DecodingKey>>,
    jwks_url: String,
    http: reqwest::Client,
    last_refresh: RwLock<Instant>,
    /// Serializes fetches so concurrent misses share one request.
    refresh_lock: Mutex<()>,
}

impl JwksCache {
    /// Create a test-only JwksCache with pre-loaded keys (no HTTP fetching).
    #[cfg(test)]
    pub fn with_keys(keys: HashMap<String, DecodingKey>) -> Arc<Self> {
        Arc::new(Self {
            keys: RwLock::new(keys),
            jwks_url: String::new(),
            http: reqwest::Client::new(),
            last_refresh: RwLock::new(Instant::now()),
            refresh_lock: Mutex::new(()),
        })
    }

    /// Create a test-only JwksCache holding `keys` whose rate limit has
    /// already elapsed, so the next refresh fetches from `jwks_url`.
    #[cfg(test)]
    pub fn stale_with_keys(jwks_url: String, keys: HashMap<String, DecodingKey>) -> Arc<Self> {
        Arc::new(Self {
            keys: RwLock::new(keys),
            jwks_url,
            http: reqwest::Client::new(),
            last_refresh: RwLock::new(stale_instant()),
            refresh_lock: Mutex::new(()),
        })
    }

    pub fn new(jwks_url: String) -> Arc<Self> {
        Arc::new(Self {
            keys: RwLock::new(HashMap::new()),
            jwks_url,
            http: reqwest::Client::new(),
            last_refresh: RwLock::new(stale_instant()),
            refresh_lock: Mutex::new(()),
        })
    }

    /// Get the candidate decoding keys for an assertion.
    ///
    /// With a `kid`, at most one key is returned. Without one, every cached
    /// key is a candidate. Refreshes the cache when nothing matches
    /// (rate-limited to once per 5 minutes).
    pub async fn keys_for(&self, kid: Option<&str>) -> Result<Vec<DecodingKey>, AuthError> {
        {
            let keys = self.keys.read().await;
            let found = select(&keys, kid);
            if !found.is_empty() {
                return Ok(found);
            }
        }

        self.refresh().await?;

        let keys = self.keys.read().await;
        let found = select(&keys, kid);
        if found.is_empty() {
            return Err(AuthError::InvalidAssertion(match kid {
                Some(kid) => format!("no ES256 key published for kid: {kid}"),
                None => "no ES256 key published".to_string(),
            }));
        }
        Ok(found)
    }

    /// Fetch the JWKS document and update the cache. Rate-limited.
    ///
    /// Also called by the verifier when every candidate key rejects a
    /// signature, so a rotated provider key is picked up without a restart.
    pub(super) async fn refresh(&self) -> Result<(), AuthError> {
        let _guard = self.refresh_lock.lock().await;
        {
            // Re-checked under the lock: a concurrent caller may have just
            // finished a fetch.
            let last = self.last_refresh.read().await;
            if last.elapsed().as_secs() < JWKS_REFRESH_INTERVAL_SECS {
                return Ok(());
            }
        }

        tracing::debug!("Refreshing JWKS from {}", self.jwks_url);

        let resp = self
            .http
            .get(&self.jwks_url)
            .timeout(JWKS_FETCH_TIMEOUT)
            .send()
            .await
            .map_err(|e| AuthError::KeySetUnavailable(format!("JWKS fetch failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            return Err(AuthError::KeySetUnavailable(format!(
                "JWKS fetch returned HTTP {status}"
            )));
        }

        let doc: JwksDocument = resp
            .json()
            .await
            .map_err(|e| AuthError::KeySetUnavailable(format!("Failed to parse JWKS: {e}")))?;

        let mut new_keys = HashMap::new();
        for (index, jwk) in doc.keys.iter().enumerate() {
            if !is_es256_signing_key(jwk) {
                continue;
            }
            let (Some(x), Some(y)) = (jwk.x.as_deref(), jwk.y.as_deref()) else {
                continue;
            };
            let decoding_key = match DecodingKey::from_ec_components(x, y) {
                Ok(key) => key,
                Err(e) => {
                    tracing::warn!("Skipping invalid EC JWK: {e}");
                    continue;
                }
            };
            let name = jwk.kid.clone().unwrap_or_else(|| format!("#{index}"));
            new_keys.insert(name, decoding_key);
        }

        tracing::info!("Loaded {} ES256 key(s) from JWKS", new_keys.len());

        *self.keys.write().await = new_keys;
        *self.last_refresh.write().await = Instant::now();
        Ok(())
    }
}

/// An instant far enough in the past that the first lookup triggers a refresh.
fn stale_instant() -> Instant {
    let age = Duration::from_secs(JWKS_REFRESH_INTERVAL_SECS + 1);
    Instant::now().checked_sub(age).unwrap_or_else(Instant::now)
}

fn select(keys: &HashMap<String, DecodingKey>, kid: Option<&str>) -> Vec<DecodingKey> {
    match kid {
        Some(kid) => keys.get(kid).cloned().into_iter().collect(),
        None => keys.values().cloned().collect(),
    }
}

/// Whether a JWK can verify ES256 signatures.
fn is_es256_signing_key(jwk: &JwkEntry) -> bool {
    jwk.kty == "EC"
        && jwk.crv.as_deref().is_none_or(|crv| crv == "P-256")
        && jwk.alg.as_deref().is_none_or(|alg| alg == "ES256")
        && jwk.key_use.as_deref().is_none_or(|u| u == "sig")
}
