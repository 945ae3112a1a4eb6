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

//! Axum router configuration for the Token Service.

pub mod token;

use axum::{routing::post, Router};

use crate::state::AppState;

/// Build the application router.
///
/// Only the verified `POST /token` flow is exposed; other methods on
/// `/token` answer 405.
pub fn router() -> Router<AppState> {
    Router::new().route("/token", post(token::issue_token))
}
