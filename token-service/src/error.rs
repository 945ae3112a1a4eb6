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

//! Error types for the Token Service.
//!
//! Every authorization failure collapses to one opaque `401 Unauthorized`
//! plain-text response; which check failed is only visible in the server log.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Reasons an identity assertion is refused.
#[derive(Debug)]
pub enum AuthError {
    /// No bearer assertion was presented.
    MissingCredential,
    /// The assertion failed header parsing, signature, algorithm, or claim checks.
    InvalidAssertion(String),
    /// The identity provider's key set could not be fetched or parsed.
    KeySetUnavailable(String),
    /// The claimed public key does not match the verified wallet key.
    KeyMismatch,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingCredential => write!(f, "bearer assertion is required"),
            AuthError::InvalidAssertion(msg) => write!(f, "invalid assertion: {msg}"),
            AuthError::KeySetUnavailable(msg) => write!(f, "key set unavailable: {msg}"),
            AuthError::KeyMismatch => {
                write!(f, "claimed public key does not match the verified wallet key")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// Application-level error: an HTTP status code and a plain-text body.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub body: &'static str,
}

impl AppError {
    pub fn new(status: StatusCode, body: &'static str) -> Self {
        Self { status, body }
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized")
    }

    pub fn bad_request(detail: &str) -> Self {
        tracing::debug!("Rejected malformed token request: {detail}");
        Self::new(StatusCode::BAD_REQUEST, "Bad Request")
    }

    pub fn internal(detail: &str) -> Self {
        tracing::error!("Internal error: {detail}");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, self.body).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        tracing::warn!("Token request unauthorized: {err}");
        Self::unauthorized()
    }
}
