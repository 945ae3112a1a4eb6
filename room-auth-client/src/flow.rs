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

//! The join sequence as an explicit async state machine.
//!
//! `Idle → Authenticating → Verified → Joining → Connected → Left`, with any
//! failure landing in `Failed`. Each step is an awaited call, so the whole
//! sequence can be driven and tested without simulating provider events.
//! Nothing is retried automatically; from `Failed` or `Left` the user starts
//! over with another [`JoinFlow::join`].

use std::fmt;

use crate::authenticator::ClientAuthenticator;
use crate::error::{AuthError, RoomError};
use crate::session::{IdentityProvider, ProviderSession};

/// The external room/media platform that consumes access tokens.
#[allow(async_fn_in_trait)]
pub trait RoomConnector {
    async fn join_room(&mut self, room_id: &str, token: &str) -> Result<(), RoomError>;

    async fn leave_room(&mut self) -> Result<(), RoomError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinState {
    Idle,
    Authenticating,
    Verified,
    Joining,
    Connected,
    Left,
    Failed,
}

impl fmt::Display for JoinState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JoinState::Idle => "idle",
            JoinState::Authenticating => "authenticating",
            JoinState::Verified => "verified",
            JoinState::Joining => "joining",
            JoinState::Connected => "connected",
            JoinState::Left => "left",
            JoinState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Drives one user's attempt to join one room.
pub struct JoinFlow<P: IdentityProvider, R: RoomConnector> {
    room_id: String,
    session: ProviderSession<P>,
    room: R,
    authenticator: ClientAuthenticator,
    state: JoinState,
    history: Vec<JoinState>,
}

impl<P: IdentityProvider, R: RoomConnector> JoinFlow<P, R> {
    pub fn new(
        room_id: &str,
        session: ProviderSession<P>,
        room: R,
        authenticator: ClientAuthenticator,
    ) -> Self {
        Self {
            room_id: room_id.to_string(),
            session,
            room,
            authenticator,
            state: JoinState::Idle,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> JoinState {
        self.state
    }

    /// Every state entered so far, oldest first. `Idle` is not recorded.
    pub fn history(&self) -> &[JoinState] {
        &self.history
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn session(&self) -> &ProviderSession<P> {
        &self.session
    }

    pub fn room(&self) -> &R {
        &self.room
    }

    /// Log in, obtain an access token, and join the room.
    pub async fn join(&mut self) -> Result<(), AuthError> {
        if !matches!(
            self.state,
            JoinState::Idle | JoinState::Left | JoinState::Failed
        ) {
            return Err(self.invalid("join"));
        }

        let result = self.run_join().await;
        if let Err(err) = &result {
            log::warn!("joining room {} failed: {err}", self.room_id);
            self.transition(JoinState::Failed);
        }
        result
    }

    async fn run_join(&mut self) -> Result<(), AuthError> {
        self.transition(JoinState::Authenticating);
        self.session.connect().await?;
        let token = self
            .authenticator
            .authenticate(&self.session, &self.room_id)
            .await?;

        self.transition(JoinState::Verified);

        self.transition(JoinState::Joining);
        self.room.join_room(&self.room_id, &token).await?;

        self.transition(JoinState::Connected);
        Ok(())
    }

    /// Leave the room and log the identity session out.
    pub async fn leave(&mut self) -> Result<(), AuthError> {
        if self.state != JoinState::Connected {
            return Err(self.invalid("leave"));
        }

        let left = self.room.leave_room().await;
        let logged_out = self.session.disconnect().await;
        self.transition(JoinState::Left);

        left?;
        logged_out
    }

    fn transition(&mut self, next: JoinState) {
        log::debug!("room {}: {} -> {next}", self.room_id, self.state);
        self.state = next;
        self.history.push(next);
    }

    fn invalid(&self, action: &'static str) -> AuthError {
        AuthError::InvalidState {
            action,
            state: self.state.to_string(),
        }
    }
}
