//! Session store
//!
//! Holds the backend base URL and the bearer token. Every change is
//! written through to the key-value slot immediately and broadcast to
//! subscribers over a `watch` channel.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::storage::KeyValueStore;

/// Authentication state, derived solely from the token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticated,
}

/// Backend location and credentials of the current user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub base_url: String,
    /// Empty when signed out
    pub token: String,
}

impl Session {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    pub fn auth_state(&self) -> AuthState {
        if self.token.is_empty() {
            AuthState::Anonymous
        } else {
            AuthState::Authenticated
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_state() == AuthState::Authenticated
    }
}

/// Shared session context
///
/// Cloning is cheap; clones observe and mutate the same session.
#[derive(Clone)]
pub struct SessionStore {
    config: ClientConfig,
    storage: Arc<dyn KeyValueStore>,
    sender: Arc<watch::Sender<Session>>,
}

impl SessionStore {
    /// Restore the session from `storage`, falling back to the configured
    /// default URL and an empty token
    pub fn load(config: ClientConfig, storage: Arc<dyn KeyValueStore>) -> Self {
        let base_url = read_slot(storage.as_ref(), &config.base_url_key)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| config.default_base_url.clone());
        let token = read_slot(storage.as_ref(), &config.token_key).unwrap_or_default();

        let session = Session::new(base_url, token);
        debug!(
            "Restored session for {} ({:?})",
            session.base_url,
            session.auth_state()
        );

        let (sender, _) = watch::channel(session);
        Self {
            config,
            storage,
            sender: Arc::new(sender),
        }
    }

    /// Current session snapshot
    pub fn get(&self) -> Session {
        self.sender.borrow().clone()
    }

    /// Replace the whole session, persisting whichever fields changed
    pub fn set(&self, session: Session) {
        self.sender.send_if_modified(|current| {
            let mut modified = false;
            if current.base_url != session.base_url {
                write_slot(self.storage.as_ref(), &self.config.base_url_key, &session.base_url);
                current.base_url = session.base_url.clone();
                modified = true;
            }
            if current.token != session.token {
                write_slot(self.storage.as_ref(), &self.config.token_key, &session.token);
                log_transition(current, &session);
                current.token = session.token.clone();
                modified = true;
            }
            modified
        });
    }

    /// Receiver notified after every change
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.sender.subscribe()
    }

    pub fn base_url(&self) -> String {
        self.sender.borrow().base_url.clone()
    }

    pub fn token(&self) -> String {
        self.sender.borrow().token.clone()
    }

    pub fn auth_state(&self) -> AuthState {
        self.sender.borrow().auth_state()
    }

    pub fn is_authenticated(&self) -> bool {
        self.sender.borrow().is_authenticated()
    }

    pub fn set_base_url(&self, base_url: impl Into<String>) {
        let mut next = self.get();
        next.base_url = base_url.into();
        self.set(next);
    }

    pub fn set_token(&self, token: impl Into<String>) {
        let mut next = self.get();
        next.token = token.into();
        self.set(next);
    }

    /// Sign out locally; the base URL is kept
    pub fn clear_token(&self) {
        self.set_token(String::new());
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self.sender.borrow();
        f.debug_struct("SessionStore")
            .field("base_url", &session.base_url)
            .field("auth_state", &session.auth_state())
            .finish()
    }
}

fn read_slot(storage: &dyn KeyValueStore, key: &str) -> Option<String> {
    match storage.get(key) {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to read {} from storage: {}", key, e);
            None
        }
    }
}

fn write_slot(storage: &dyn KeyValueStore, key: &str, value: &str) {
    if let Err(e) = storage.set(key, value) {
        warn!("Failed to persist {}: {}", key, e);
    }
}

fn log_transition(current: &Session, next: &Session) {
    match (current.auth_state(), next.auth_state()) {
        (AuthState::Anonymous, AuthState::Authenticated) => info!("Signed in to {}", next.base_url),
        (AuthState::Authenticated, AuthState::Anonymous) => info!("Signed out"),
        _ => debug!("Token replaced"),
    }
}
