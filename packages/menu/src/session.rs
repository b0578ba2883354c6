use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;
use tracing::debug;

/// Stable identifier of the signed-in administrator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Result<Self, SessionError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(SessionError::InvalidOwner);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Session has not been started")]
    NotStarted,

    #[error("You must be signed in to add menu items")]
    SignedOut,

    #[error("Owner id cannot be empty")]
    InvalidOwner,
}

/// Source of the current identity, publishing a new value on every sign-in or sign-out.
pub trait AuthProvider: Send + Sync {
    fn subscribe(&self) -> watch::Receiver<Option<OwnerId>>;
}

/// In-process auth state, driven by whoever performs the actual sign-in.
pub struct AuthState {
    tx: watch::Sender<Option<OwnerId>>,
}

impl AuthState {
    pub fn signed_out() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    pub fn signed_in(owner: OwnerId) -> Self {
        let (tx, _rx) = watch::channel(Some(owner));
        Self { tx }
    }

    pub fn sign_in(&self, owner: OwnerId) {
        self.tx.send_replace(Some(owner));
    }

    pub fn sign_out(&self) {
        self.tx.send_replace(None);
    }
}

impl AuthProvider for AuthState {
    fn subscribe(&self) -> watch::Receiver<Option<OwnerId>> {
        self.tx.subscribe()
    }
}

/// The workflow's view of the session: one subscription held between
/// [`start`](Self::start) and [`stop`](Self::stop).
pub struct SessionContext {
    provider: Arc<dyn AuthProvider>,
    subscription: Option<watch::Receiver<Option<OwnerId>>>,
}

impl SessionContext {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self {
            provider,
            subscription: None,
        }
    }

    /// Subscribe to the provider. Calling it again keeps the existing subscription.
    pub fn start(&mut self) {
        if self.subscription.is_none() {
            self.subscription = Some(self.provider.subscribe());
            debug!("Session subscription started");
        }
    }

    pub fn stop(&mut self) {
        if self.subscription.take().is_some() {
            debug!("Session subscription stopped");
        }
    }

    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    /// Latest identity seen by the subscription.
    pub fn current_owner(&self) -> Result<OwnerId, SessionError> {
        let rx = self
            .subscription
            .as_ref()
            .ok_or(SessionError::NotStarted)?;
        rx.borrow().clone().ok_or(SessionError::SignedOut)
    }
}
