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

//! Error types for the room authorization client.

use thiserror::Error;

/// Errors returned by [`TokenServiceClient`](crate::TokenServiceClient) methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The Token Service refused the assertion (HTTP 401).
    #[error("Not authenticated. Please log in again.")]
    NotAuthenticated,

    /// A server error with status code and body.
    #[error("Server error ({status}): {body}")]
    ServerError { status: u16, body: String },

    /// A network or transport error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A configuration error (e.g. missing base URL).
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failures deriving the application-scoped public key.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("private key is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("private key is not a valid secp256k1 scalar: {0}")]
    InvalidSecretKey(#[from] secp256k1::Error),
}

/// An error reported by the external identity provider.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ProviderError(pub String);

/// A failure reported by the external room/media platform.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct RoomError(pub String);

/// Errors surfaced by the join flow.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The identity session is not connected; no assertion exists yet.
    #[error("identity session is not connected")]
    NotConnected,

    /// The identity provider failed before producing an assertion.
    #[error("identity provider error: {0}")]
    IdentityProvider(#[from] ProviderError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("room platform error: {0}")]
    Room(#[from] RoomError),

    /// The requested transition is not allowed from the current state.
    #[error("cannot {action} while {state}")]
    InvalidState { action: &'static str, state: String },
}
