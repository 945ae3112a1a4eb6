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

//! ES256 signature verification of identity assertions.

use std::collections::HashSet;

use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use room_auth_types::IdentityClaims;

use crate::error::AuthError;

use super::jwks::JwksCache;

/// The only algorithm the identity provider signs assertions with.
pub const ASSERTION_ALGORITHM: Algorithm = Algorithm::ES256;

/// Verify an identity assertion's signature and time claims, returning the
/// decoded claims.
///
/// Validates: header algorithm is ES256, signature against the provider's
/// JWKS, `exp`/`nbf` when present, and `aud` == `audience` when one is given.
/// There is no unverified fallback.
///
/// When no cached key accepts the signature, the key set is refreshed
/// (subject to its rate limit) and the candidates are tried once more.
pub async fn verify_assertion(
    jwks: &JwksCache,
    assertion: &str,
    audience: Option<&str>,
) -> Result<IdentityClaims, AuthError> {
    let header = decode_header(assertion)
        .map_err(|e| AuthError::InvalidAssertion(format!("Invalid JWT header: {e}")))?;

    if header.alg != ASSERTION_ALGORITHM {
        return Err(AuthError::InvalidAssertion(format!(
            "unexpected algorithm {:?}",
            header.alg
        )));
    }

    let kid = header.kid.as_deref();
    let validation = assertion_validation(audience);

    let keys = jwks.keys_for(kid).await?;
    let err = match decode_with_any(assertion, &keys, &validation) {
        Ok(claims) => return Ok(claims),
        Err(err) => err,
    };

    if !is_signature_failure(&err) {
        return Err(validation_failed(err));
    }

    tracing::debug!("No cached key accepted the assertion signature; refreshing JWKS");
    jwks.refresh().await?;
    let keys = jwks.keys_for(kid).await?;
    decode_with_any(assertion, &keys, &validation).map_err(validation_failed)
}

/// Try each candidate key. A claims error from a key that did verify the
/// signature takes precedence over signature mismatches from the others.
fn decode_with_any(
    assertion: &str,
    keys: &[DecodingKey],
    validation: &Validation,
) -> Result<IdentityClaims, Option<JwtError>> {
    let mut last_err: Option<JwtError> = None;
    for key in keys {
        match decode::<IdentityClaims>(assertion, key, validation) {
            Ok(data) => return Ok(data.claims),
            Err(e) => {
                if last_err.as_ref().is_none_or(is_signature_error) {
                    last_err = Some(e);
                }
            }
        }
    }
    Err(last_err)
}

fn is_signature_error(err: &JwtError) -> bool {
    matches!(err.kind(), ErrorKind::InvalidSignature)
}

fn is_signature_failure(err: &Option<JwtError>) -> bool {
    err.as_ref().is_none_or(is_signature_error)
}

fn validation_failed(err: Option<JwtError>) -> AuthError {
    AuthError::InvalidAssertion(match err {
        Some(e) => format!("JWT validation failed: {e}"),
        None => "no candidate key".to_string(),
    })
}

fn assertion_validation(audience: Option<&str>) -> Validation {
    let mut validation = Validation::new(ASSERTION_ALGORITHM);
    // Don't require exp, but still validate it if present.
    validation.required_spec_claims = HashSet::new();
    validation.validate_exp = true;
    validation.validate_nbf = true;
    match audience {
        Some(aud) => validation.set_audience(&[aud]),
        None => validation.validate_aud = false,
    }
    validation
}
