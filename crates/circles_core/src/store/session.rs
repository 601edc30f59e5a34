//! Session token registry.
//!
//! # Responsibility
//! - Mint opaque session tokens on successful credential checks.
//! - Resolve tokens back to account logins for every authenticated call.
//!
//! # Invariants
//! - Tokens are unique and bind to exactly one login.
//! - Sessions never expire; they end only on explicit close, account
//!   removal, or process exit. Multiple concurrent sessions per account are
//!   permitted.
//! - Sessions are process-scoped and never persisted.

use crate::store::Store;
use log::info;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type SessionResult<T> = Result<T, SessionError>;

/// Session open/resolve failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Unknown login or password mismatch on open.
    InvalidCredentials,
    /// Token is not bound to a live account.
    InvalidSession,
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid login or password"),
            Self::InvalidSession => write!(f, "session is not registered"),
        }
    }
}

impl Error for SessionError {}

/// Token → login bindings for all live sessions.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<String, String>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session after a verbatim credential check against the store.
    ///
    /// Returns the minted token. No limit on concurrent tokens per account.
    ///
    /// # Errors
    /// - `InvalidCredentials` when the login is unknown or the password
    ///   does not match.
    pub fn open(&mut self, store: &Store, login: &str, password: &str) -> SessionResult<String> {
        let account = store
            .account(login)
            .ok_or(SessionError::InvalidCredentials)?;
        if account.password != password {
            return Err(SessionError::InvalidCredentials);
        }

        let token = Uuid::new_v4().to_string();
        self.sessions.insert(token.clone(), login.to_string());
        info!("event=session_opened module=session status=ok login={login}");
        Ok(token)
    }

    /// Resolves a token to its bound login.
    ///
    /// # Errors
    /// - `InvalidSession` when the token is unbound.
    pub fn resolve(&self, token: &str) -> SessionResult<&str> {
        self.sessions
            .get(token)
            .map(String::as_str)
            .ok_or(SessionError::InvalidSession)
    }

    /// Closes one session. Returns whether the token was bound.
    pub fn close(&mut self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    /// Drops every session bound to `login`.
    ///
    /// Called by the removal cascade so no token can resolve to a deleted
    /// account.
    pub fn invalidate_account(&mut self, login: &str) {
        self.sessions.retain(|_, bound| bound != login);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
