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

//! Client authenticator for the wallet room token service.
//!
//! Obtains a wallet-derived identity assertion from an external identity
//! provider, derives the application-scoped public key, and exchanges both
//! for a room access token at the Token Service.
//!
//! # Example
//!
//! ```no_run
//! use room_auth_client::{ClientConfig, TokenServiceClient};
//!
//! # async fn example() -> Result<(), room_auth_client::ApiError> {
//! let config = ClientConfig::new("http://localhost:8080", "BPi5PB_UiIZ...")?;
//! let client = TokenServiceClient::from_config(&config);
//!
//! let token = client
//!     .request_access_token("room-42", "03ab...", "eyJ...")
//!     .await?;
//! println!("room token: {token}");
//! # Ok(())
//! # }
//! ```

pub mod authenticator;
pub mod error;
pub mod flow;
pub mod keys;
pub mod session;

pub use authenticator::ClientAuthenticator;
pub use error::{ApiError, AuthError, KeyError, ProviderError, RoomError};
pub use flow::{JoinFlow, JoinState, RoomConnector};
pub use room_auth_types;
pub use session::{IdentityProvider, ProviderSession, SessionEvent, SessionStatus, UserInfo};

use reqwest::Client;
use room_auth_types::requests::{JoinRequest, TokenQuery};

/// Deployment settings for the client side of the flow.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Token Service, e.g. `"https://rooms.example.com"`.
    pub token_service_url: String,
    /// Public client identifier registered with the identity provider.
    ///
    /// Not sent to the Token Service. [`IdentityProvider`] implementations
    /// initialize their SDK with it, and the provider stamps it into the
    /// assertion's `aud`.
    pub client_id: String,
}

impl ClientConfig {
    pub fn new(token_service_url: &str, client_id: &str) -> Result<Self, ApiError> {
        if token_service_url.trim().is_empty() {
            return Err(ApiError::Config("token service URL is not set".to_string()));
        }
        if client_id.trim().is_empty() {
            return Err(ApiError::Config(
                "identity provider client id is not set".to_string(),
            ));
        }
        Ok(Self {
            token_service_url: token_service_url.to_string(),
            client_id: client_id.to_string(),
        })
    }
}

/// A typed HTTP client for the Token Service.
#[derive(Debug, Clone)]
pub struct TokenServiceClient {
    base_url: String,
    http: Client,
}

impl TokenServiceClient {
    /// Create a new client pointing at the given Token Service base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.token_service_url)
    }

    /// Exchange an identity assertion for a room access token.
    ///
    /// Calls `POST /token?roomId=<room_id>` with body `{ roomId, appPubKey }`
    /// and the assertion as `Authorization: Bearer`.
    pub async fn request_access_token(
        &self,
        room_id: &str,
        app_pub_key: &str,
        id_token: &str,
    ) -> Result<String, ApiError> {
        let query = TokenQuery {
            room_id: Some(room_id.to_string()),
        };
        let body = JoinRequest {
            room_id: room_id.to_string(),
            app_pub_key: app_pub_key.to_string(),
        };
        let response = self
            .http
            .post(format!("{}/token", self.base_url))
            .query(&query)
            .bearer_auth(id_token)
            .json(&body)
            .send()
            .await?;
        parse_token_response(response).await
    }
}

/// Map a `POST /token` response to the token text or an [`ApiError`].
pub(crate) async fn parse_token_response(response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status().as_u16();
    match status {
        200 => {
            let token = response.text().await?;
            if token.is_empty() {
                return Err(ApiError::ServerError {
                    status,
                    body: "empty token in response".to_string(),
                });
            }
            Ok(token)
        }
        401 => Err(ApiError::NotAuthenticated),
        _ => {
            let text = response.text().await.unwrap_or_default();
            Err(ApiError::ServerError { status, body: text })
        }
    }
}
