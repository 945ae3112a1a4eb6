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

//! Application configuration loaded from environment variables.

use std::env;

/// Published key set of the wallet identity provider.
pub const DEFAULT_JWKS_URL: &str = "https://api-auth.web3auth.io/jwks";

/// Longest accepted access token lifetime (30 days).
pub const MAX_TOKEN_TTL_SECS: i64 = 30 * 24 * 60 * 60;

/// Configuration for the Token Service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP server (e.g. "0.0.0.0:8080").
    pub listen_addr: String,
    /// API key used to sign room access tokens (HMAC-SHA256).
    pub api_key: String,
    /// Token time-to-live in seconds (default: 3600 = 1 hour).
    pub token_ttl_secs: i64,
    /// JWKS endpoint used to verify identity assertions.
    pub jwks_url: String,
    /// Expected `aud` of identity assertions. `None` skips the audience check.
    pub identity_audience: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Required
    /// - `API_KEY`
    ///
    /// # Optional
    /// - `LISTEN_ADDR` (default: `"0.0.0.0:8080"`)
    /// - `TOKEN_TTL_SECS` (default: `"3600"`, at most [`MAX_TOKEN_TTL_SECS`])
    /// - `JWKS_URL` (default: [`DEFAULT_JWKS_URL`])
    /// - `IDENTITY_AUDIENCE`
    pub fn from_env() -> Result<Self, String> {
        let api_key = env::var("API_KEY")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or("API_KEY environment variable is required")?;

        let listen_addr = env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let token_ttl_secs = env::var("TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse::<i64>()
            .map_err(|_| "TOKEN_TTL_SECS must be a valid integer")?;
        if token_ttl_secs <= 0 {
            return Err("TOKEN_TTL_SECS must be positive".to_string());
        }
        if token_ttl_secs > MAX_TOKEN_TTL_SECS {
            return Err(format!(
                "TOKEN_TTL_SECS must not exceed {MAX_TOKEN_TTL_SECS}"
            ));
        }
        let jwks_url = env::var("JWKS_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_JWKS_URL.to_string());
        let identity_audience = env::var("IDENTITY_AUDIENCE").ok().filter(|s| !s.is_empty());

        Ok(Self {
            listen_addr,
            api_key,
            token_ttl_secs,
            jwks_url,
            identity_audience,
        })
    }
}
