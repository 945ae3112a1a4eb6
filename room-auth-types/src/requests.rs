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

//! Request types for the Token Service.
//!
//! Used by the server for deserialization and by clients for serialization.

use serde::{Deserialize, Serialize};

/// Request body for `POST /token`.
///
/// The identity assertion itself travels in the `Authorization: Bearer`
/// header, not in the body.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    /// Room the caller wants to join.
    pub room_id: String,

    /// Hex-encoded compressed secp256k1 public key derived from the
    /// application-scoped wallet key.
    pub app_pub_key: String,
}

/// Query string for `POST /token?roomId=<id>`.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TokenQuery {
    #[serde(default)]
    pub room_id: Option<String>,
}
