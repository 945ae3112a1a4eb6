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

//! Axum extractor that pulls the identity assertion from `Authorization: Bearer`.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::error::{AppError, AuthError};

/// Extractor that resolves the caller's identity assertion from the
/// `Authorization` header.
///
/// Rejects with 401 when the header is absent, uses another scheme, or
/// carries an empty token. Place it before any body extractor so a missing
/// credential is refused before the body is read.
///
/// Usage in a handler:
/// ```ignore
/// async fn my_handler(BearerToken(assertion): BearerToken) { ... }
/// ```
#[derive(Debug)]
pub struct BearerToken(pub String);

impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_bearer)
            .map(|token| BearerToken(token.to_string()))
            .ok_or_else(|| AuthError::MissingCredential.into())
    }
}

/// Return the token of a `Bearer <token>` header value.
fn parse_bearer(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
