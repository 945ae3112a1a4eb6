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

//! Handler for `POST /token`.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use room_auth_types::requests::{JoinRequest, TokenQuery};

use crate::auth::BearerToken;
use crate::error::AppError;
use crate::issue::issue_access_token;
use crate::state::AppState;

/// POST /token?roomId=<id>
///
/// Body `{ "roomId", "appPubKey" }`, header `Authorization: Bearer <assertion>`.
/// Responds with the signed access token as plain text, or 401 `Unauthorized`.
pub async fn issue_token(
    State(state): State<AppState>,
    BearerToken(assertion): BearerToken,
    Query(query): Query<TokenQuery>,
    body: Result<Json<JoinRequest>, JsonRejection>,
) -> Result<String, AppError> {
    let Json(request) = body.map_err(|e| AppError::bad_request(&e.body_text()))?;
    let room_id = resolve_room_id(query.room_id.as_deref(), &request.room_id)?;

    issue_access_token(&state, room_id, &request.app_pub_key, &assertion).await
}

/// The body's `roomId` is authoritative; a query `roomId`, when given, must agree.
fn resolve_room_id<'a>(query_room: Option<&str>, body_room: &'a str) -> Result<&'a str, AppError> {
    if body_room.is_empty() {
        return Err(AppError::bad_request("roomId is empty"));
    }
    match query_room {
        Some(q) if q != body_room => Err(AppError::bad_request(&format!(
            "query roomId '{q}' does not match body roomId '{body_room}'"
        ))),
        _ => Ok(body_room),
    }
}
