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

//! JWT room access token generation.
//!
//! The Token Service signs tokens with the deployment's API key; the room/media
//! platform validates the signature and enforces the embedded grants.

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use room_auth_types::{AccessTokenClaims, Permissions, Role, TokenMetadata};

use crate::error::AppError;

/// Sign a room access token for a verified participant.
pub fn generate_access_token(
    api_key: &str,
    ttl_secs: i64,
    subject: &str,
    room_id: &str,
    role: Role,
    permissions: Permissions,
    display_name: &str,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = now
        .checked_add(ttl_secs)
        .ok_or_else(|| AppError::internal(&format!("token TTL {ttl_secs}s overflows expiry")))?;
    let claims = AccessTokenClaims {
        sub: subject.to_string(),
        room_id: room_id.to_string(),
        role,
        permissions,
        metadata: TokenMetadata {
            display_name: display_name.to_string(),
        },
        iat: now,
        exp,
        iss: AccessTokenClaims::ISSUER.to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(api_key.as_bytes()),
    )
    .map_err(|e| AppError::internal(&format!("failed to sign access token: {e}")))
}
