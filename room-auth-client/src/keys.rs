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

//! Application-scoped public key derivation.
//!
//! The identity provider hands the client a per-application secp256k1 private
//! key. Only the compressed public key leaves the device; the Token Service
//! compares it against the wallet key attested in the identity assertion.

use secp256k1::{PublicKey, Secp256k1, SecretKey};

use crate::error::KeyError;

/// Derive the hex-encoded compressed (33-byte) public key for a hex-encoded
/// secp256k1 private key.
///
/// Accepts an optional `0x` prefix and restores leading zeros some providers
/// drop from the hex form.
pub fn scoped_public_key(private_key_hex: &str) -> Result<String, KeyError> {
    let trimmed = private_key_hex.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let padded = format!("{digits:0>64}");

    let bytes = hex::decode(padded)?;
    let secret = SecretKey::from_slice(&bytes)?;
    let public = PublicKey::from_secret_key(&Secp256k1::signing_only(), &secret);

    Ok(hex::encode(public.serialize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: &str = "0000000000000000000000000000000000000000000000000000000000000001";

    #[test]
    fn generator_point_for_key_one() {
        assert_eq!(
            scoped_public_key(ONE).unwrap(),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
    }

    #[test]
    fn double_generator_for_key_two() {
        assert_eq!(
            scoped_public_key("2").unwrap(),
            "02c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5"
        );
    }

    #[test]
    fn prefix_and_short_forms_agree() {
        let full = scoped_public_key(ONE).unwrap();
        assert_eq!(scoped_public_key("0x1").unwrap(), full);
        assert_eq!(scoped_public_key("01").unwrap(), full);
    }

    #[test]
    fn output_is_33_bytes_lowercase_hex() {
        let key = scoped_public_key(
            "c9afa9d845ba75166b5c215767b1d6934e50c3db36e89b127b8a622b120f6721",
        )
        .unwrap();
        assert_eq!(key.len(), 66);
        assert!(key.starts_with("02") || key.starts_with("03"));
        assert_eq!(key, key.to_lowercase());
    }

    #[test]
    fn non_hex_is_rejected() {
        assert!(matches!(
            scoped_public_key("zz"),
            Err(KeyError::InvalidHex(_))
        ));
    }

    #[test]
    fn zero_scalar_is_rejected() {
        assert!(matches!(
            scoped_public_key("0"),
            Err(KeyError::InvalidSecretKey(_))
        ));
    }

    #[test]
    fn oversized_key_is_rejected() {
        let too_long = "01".repeat(33);
        assert!(scoped_public_key(&too_long).is_err());
    }
}
