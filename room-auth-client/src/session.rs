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

//! Identity provider session handle.
//!
//! The session is constructed explicitly and passed to whoever needs it;
//! lifecycle changes are published on a per-session broadcast channel.
//!
//! # Example
//!
//! ```ignore
//! let mut session = ProviderSession::new(provider);
//! let mut events = session.subscribe();
//! session.connect().await?;
//! assert_eq!(events.recv().await?, SessionEvent::Connected);
//! ```

use async_broadcast::{broadcast, InactiveReceiver, Receiver, Sender};

use crate::error::{AuthError, ProviderError};

/// Capacity of the session event channel.
const EVENT_CAPACITY: usize = 16;

/// Profile returned by the identity provider once connected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    /// Signed identity assertion (ES256 JWT).
    pub id_token: String,
}

/// The external wallet identity provider.
///
/// Implementations wrap a concrete provider SDK. The session drives them;
/// callers should not invoke these methods directly.
#[allow(async_fn_in_trait)]
pub trait IdentityProvider {
    /// Prepare the provider (load configuration, restore a cached login).
    async fn init(&mut self) -> Result<(), ProviderError>;

    /// Run the interactive login.
    async fn connect(&mut self) -> Result<(), ProviderError>;

    /// Profile and signed assertion of the logged-in user.
    async fn user_info(&self) -> Result<UserInfo, ProviderError>;

    /// Hex-encoded application-scoped secp256k1 private key.
    async fn private_key(&self) -> Result<String, ProviderError>;

    async fn logout(&mut self) -> Result<(), ProviderError>;
}

/// Lifecycle of a [`ProviderSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Uninitialized,
    Initialized,
    Connected,
    Disconnected,
    Errored,
}

/// Events published to session subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Connected,
    Disconnected,
    Errored(String),
}

/// An authenticated session with the identity provider.
pub struct ProviderSession<P: IdentityProvider> {
    provider: P,
    status: SessionStatus,
    events: Sender<SessionEvent>,
    // Keeps the channel open while nobody is subscribed.
    _idle: InactiveReceiver<SessionEvent>,
}

impl<P: IdentityProvider> ProviderSession<P> {
    pub fn new(provider: P) -> Self {
        let (mut events, receiver) = broadcast(EVENT_CAPACITY);
        events.set_overflow(true);
        Self {
            provider,
            status: SessionStatus::Uninitialized,
            events,
            _idle: receiver.deactivate(),
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_connected(&self) -> bool {
        self.status == SessionStatus::Connected
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Subscribe to lifecycle events emitted after this call.
    pub fn subscribe(&self) -> Receiver<SessionEvent> {
        self.events.new_receiver()
    }

    /// Initialize the provider. No-op once connected.
    pub async fn init(&mut self) -> Result<(), AuthError> {
        if self.status == SessionStatus::Connected {
            return Ok(());
        }
        if let Err(err) = self.provider.init().await {
            return Err(self.fail(err));
        }
        self.status = SessionStatus::Initialized;
        Ok(())
    }

    /// Log in, initializing first if needed. No-op when already connected.
    ///
    /// A provider failure moves the session to [`SessionStatus::Errored`] and
    /// is not retried.
    pub async fn connect(&mut self) -> Result<(), AuthError> {
        match self.status {
            SessionStatus::Connected => return Ok(()),
            SessionStatus::Initialized => {}
            _ => self.init().await?,
        }

        if let Err(err) = self.provider.connect().await {
            return Err(self.fail(err));
        }

        self.status = SessionStatus::Connected;
        log::info!("identity session connected");
        self.emit(SessionEvent::Connected);
        Ok(())
    }

    /// Log out and tear the session down.
    pub async fn disconnect(&mut self) -> Result<(), AuthError> {
        let result = self.provider.logout().await;
        self.status = SessionStatus::Disconnected;
        log::info!("identity session disconnected");
        self.emit(SessionEvent::Disconnected);
        result.map_err(AuthError::from)
    }

    /// Profile and assertion of the connected user.
    pub async fn user_info(&self) -> Result<UserInfo, AuthError> {
        self.require_connected()?;
        Ok(self.provider.user_info().await?)
    }

    /// Application-scoped private key of the connected user.
    pub async fn private_key(&self) -> Result<String, AuthError> {
        self.require_connected()?;
        Ok(self.provider.private_key().await?)
    }

    fn require_connected(&self) -> Result<(), AuthError> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(AuthError::NotConnected)
        }
    }

    fn fail(&mut self, err: ProviderError) -> AuthError {
        log::warn!("identity provider error: {err}");
        self.status = SessionStatus::Errored;
        self.emit(SessionEvent::Errored(err.0.clone()));
        AuthError::IdentityProvider(err)
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.events.try_broadcast(event);
    }
}
