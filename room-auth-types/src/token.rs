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

//! Room access token (JWT) claims.
//!
//! The room access token is a signed JWT (HMAC-SHA256, keyed with the
//! deployment's API key) that admits a client into one room with a fixed role
//! and permission set. The Token Service signs it; the room/media platform
//! validates the signature and enforces the grants.

use serde::{Deserialize, Serialize};

/// Role granted inside the room.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Host,
    CoHost,
    Speaker,
    Listener,
    Guest,
}

/// Media sources a participant may publish.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProduceSources {
    pub cam: bool,
    pub mic: bool,
    pub screen: bool,
}

/// Capabilities granted by the token.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    pub admin: bool,
    pub can_consume: bool,
    pub can_produce: bool,
    pub can_produce_sources: ProduceSources,
    pub can_send_data: bool,
    pub can_recv_data: bool,
    pub can_update_metadata: bool,
}

impl Permissions {
    /// Every capability enabled, including admin.
    pub fn full() -> Self {
        Self {
            admin: true,
            can_consume: true,
            can_produce: true,
            can_produce_sources: ProduceSources {
                cam: true,
                mic: true,
                screen: true,
            },
            can_send_data: true,
            can_recv_data: true,
            can_update_metadata: true,
        }
    }
}

/// Per-session metadata surfaced to other peers.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadata {
    pub display_name: String,
}

/// JWT payload for a room access token.
///
/// # Example payload
///
/// ```json
/// {
///   "sub": "03ab...",
///   "roomId": "room-42",
///   "role": "host",
///   "permissions": {
///     "admin": true,
///     "canConsume": true,
///     "canProduce": true,
///     "canProduceSources": { "cam": true, "mic": true, "screen": true },
///     "canSendData": true,
///     "canRecvData": true,
///     "canUpdateMetadata": true
///   },
///   "metadata": { "displayName": "Alice" },
///   "iat": 1707001200,
///   "exp": 1707004800,
///   "iss": "room-token-service"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenClaims {
    /// Verified wallet public key of the participant.
    pub sub: String,

    /// The room the participant is authorized to join.
    pub room_id: String,

    pub role: Role,

    pub permissions: Permissions,

    pub metadata: TokenMetadata,

    /// Issued-at timestamp (Unix seconds).
    pub iat: i64,

    /// Expiration timestamp (Unix seconds).
    pub exp: i64,

    /// Issuer identifier. Always [`AccessTokenClaims::ISSUER`].
    pub iss: String,
}

impl AccessTokenClaims {
    /// The expected issuer value for tokens produced by the Token Service.
    pub const ISSUER: &'static str = "room-token-service";
}
