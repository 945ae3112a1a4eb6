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

//! Identity assertion verification: JWKS caching and ES256 signature checks.

pub mod jwks;
pub mod verify;

pub use jwks::JwksCache;
pub use verify::verify_assertion;
