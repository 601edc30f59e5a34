//! Use-case services over the injected store.
//!
//! # Responsibility
//! - Orchestrate store mutations into the operations the harness consumes.
//! - Enforce every precondition before the first state change; the only
//!   multi-record mutation is the friend-request implicit accept, which
//!   completes fully inside one call.
//!
//! # Invariants
//! - Services hold borrows of the injected store for one call scope; no
//!   service owns state.
//! - Every failure is a typed error that aborts the operation with no
//!   partial state change.

use crate::store::{SessionRegistry, SessionResult, Store};
use crate::store::session::SessionError;

pub mod account_service;
pub mod community_service;
pub mod engine;
pub mod messaging_service;
pub mod relation_service;

/// Resolves a session token to a login with a live account behind it.
///
/// A token whose account has been removed or cleared resolves as
/// `InvalidSession`, never as a dangling reference.
pub(crate) fn resolve_login(
    store: &Store,
    sessions: &SessionRegistry,
    token: &str,
) -> SessionResult<String> {
    let login = sessions.resolve(token)?;
    if !store.contains_account(login) {
        return Err(SessionError::InvalidSession);
    }
    Ok(login.to_string())
}
