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

//! Claims carried by the identity provider's signed assertion (ID token).
//!
//! The identity provider signs these with ES256 and publishes the
//! verification keys as a JWKS. Only `wallets` and `name` drive
//! authorization; the remaining fields are kept for logging and for
//! optional audience pinning.

use serde::{Deserialize, Deserializer, Serialize};

/// Display name used when the assertion carries no `name`.
pub const GUEST_DISPLAY_NAME: &str = "guest";

/// A wallet public key attested by the identity provider.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct WalletKey {
    /// Hex-encoded compressed public key. External wallets list an
    /// `address` instead and carry no key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,

    /// Key kind, e.g. `"web3auth_app_key"`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub key_type: Option<String>,

    /// Curve name, e.g. `"secp256k1"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<String>,
}

/// `aud` may be a single string or an array.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Many(Vec<String>),
}

/// Payload of a verified identity assertion.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct IdentityClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,

    /// Login method used with the identity provider (e.g. `"torus"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verifier: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verifier_id: Option<String>,

    /// Wallet keys bound to this identity. Order is significant: the first
    /// entry is the application-scoped key.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub wallets: Vec<WalletKey>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,

    /// Issued-at time (Unix seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,

    /// Expiration time (Unix seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

impl IdentityClaims {
    /// The first attested wallet public key, if any.
    pub fn primary_wallet_key(&self) -> Option<&str> {
        self.wallets.first().and_then(|w| w.public_key.as_deref())
    }

    /// The asserted name, or [`GUEST_DISPLAY_NAME`] when absent or empty.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(GUEST_DISPLAY_NAME)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<WalletKey>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<WalletKey>>::deserialize(deserializer)?.unwrap_or_default())
}
