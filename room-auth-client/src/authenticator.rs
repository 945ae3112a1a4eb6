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

//! Client side of the room-join authorization exchange.

use crate::error::AuthError;
use crate::keys::scoped_public_key;
use crate::session::{IdentityProvider, ProviderSession};
use crate::TokenServiceClient;

/// Presents the connected user's identity assertion and scoped public key to
/// the Token Service.
#[derive(Debug, Clone)]
pub struct ClientAuthenticator {
    client: TokenServiceClient,
}

impl ClientAuthenticator {
    pub fn new(client: TokenServiceClient) -> Self {
        Self { client }
    }

    /// Obtain a room access token for `room_id`.
    ///
    /// The session must already be connected. A 401 from the service comes
    /// back as [`ApiError::NotAuthenticated`](crate::ApiError::NotAuthenticated)
    /// and the caller must not proceed to join.
    pub async fn authenticate<P: IdentityProvider>(
        &self,
        session: &ProviderSession<P>,
        room_id: &str,
    ) -> Result<String, AuthError> {
        if !session.is_connected() {
            return Err(AuthError::NotConnected);
        }

        let info = session.user_info().await?;
        let app_pub_key = scoped_public_key(&session.private_key().await?)?;

        log::debug!(
            "requesting access token for room {room_id} as {}",
            info.name.as_deref().unwrap_or("guest")
        );

        let token = self
            .client
            .request_access_token(room_id, &app_pub_key, &info.id_token)
            .await
            .inspect_err(|e| log::warn!("token request for room {room_id} failed: {e}"))?;

        Ok(token)
    }
}
