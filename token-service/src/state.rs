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

//! Shared application state passed to every Axum handler via `State`.

use std::sync::Arc;

use crate::config::Config;
use crate::identity::JwksCache;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// API key used to sign access tokens.
    pub api_key: String,
    /// Token time-to-live in seconds.
    pub token_ttl_secs: i64,
    /// Cached verification keys of the identity provider.
    pub jwks: Arc<JwksCache>,
    /// Expected assertion audience, if pinned.
    pub identity_audience: Option<String>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            api_key: config.api_key.clone(),
            token_ttl_secs: config.token_ttl_secs,
            jwks: JwksCache::new(config.jwks_url.clone()),
            identity_audience: config.identity_audience.clone(),
        }
    }
}
