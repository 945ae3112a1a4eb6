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

//! The room-join authorization pipeline.
//!
//! `Unverified → Verified | Rejected → Authorized | Rejected`. Each call is
//! independent; nothing is persisted.

use room_auth_types::{IdentityClaims, Permissions, Role};

use crate::error::{AppError, AuthError};
use crate::identity::verify_assertion;
use crate::state::AppState;
use crate::token::generate_access_token;

/// Role granted to every verified participant.
pub const GRANTED_ROLE: Role = Role::Host;

/// Verify `assertion`, cross-check `claimed_pub_key` against its first wallet
/// key, and mint an access token for `room_id`.
pub async fn issue_access_token(
    state: &AppState,
    room_id: &str,
    claimed_pub_key: &str,
    assertion: &str,
) -> Result<String, AppError> {
    if assertion.is_empty() {
        return Err(AuthError::MissingCredential.into());
    }

    let claims = verify_assertion(
        &state.jwks,
        assertion,
        state.identity_audience.as_deref(),
    )
    .await?;

    let wallet_key = match_wallet_key(&claims, claimed_pub_key)?;

    let token = generate_access_token(
        &state.api_key,
        state.token_ttl_secs,
        wallet_key,
        room_id,
        GRANTED_ROLE,
        Permissions::full(),
        claims.display_name(),
    )?;

    tracing::info!(
        "Issued access token for room {room_id} (verifier_id: {})",
        claims.verifier_id.as_deref().unwrap_or("-")
    );

    Ok(token)
}

/// Exact, case-sensitive comparison against the first attested wallet key.
pub fn match_wallet_key<'a>(
    claims: &'a IdentityClaims,
    claimed_pub_key: &str,
) -> Result<&'a str, AuthError> {
    match claims.primary_wallet_key() {
        Some(key) if key == claimed_pub_key => Ok(key),
        _ => Err(AuthError::KeyMismatch),
    }
}
