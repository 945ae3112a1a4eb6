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

//! Shared types for the wallet room authorization flow.
//!
//! This crate defines the contract between the Token Service and its
//! consumers (the client authenticator and integration tests).
//! It is intentionally framework-agnostic — no axum, no HTTP client types.

pub mod identity;
pub mod requests;
pub mod token;

pub use identity::{IdentityClaims, WalletKey};
pub use requests::JoinRequest;
pub use token::{AccessTokenClaims, Permissions, ProduceSources, Role, TokenMetadata};
