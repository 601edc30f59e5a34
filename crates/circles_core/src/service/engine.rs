//! Engine facade consumed by the request-driving harness.
//!
//! # Responsibility
//! - Compose the store, session registry and optional snapshot gateway
//!   into one narrow synchronous call surface.
//! - Delegate each operation to its use-case service, constructed per call
//!   over the owned state.
//! - Run the load-at-start and save-clear-reload lifecycle hooks.
//!
//! # Invariants
//! - All state lives behind `&mut self`; multi-step transitions are atomic
//!   with respect to any concurrent embedding that wraps the engine in a
//!   lock.
//! - Sessions survive reset and shutdown but never resolve to a cleared
//!   account.

use crate::service::account_service::{AccountError, AccountService};
use crate::service::community_service::{CommunityError, CommunityService};
use crate::service::messaging_service::{MessagingError, MessagingService};
use crate::service::relation_service::{RelationError, RelationService};
use crate::snapshot::{SnapshotError, SnapshotStore};
use crate::store::session::SessionError;
use crate::store::{SessionRegistry, Store};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type EngineResult<T> = Result<T, EngineError>;

/// Umbrella error over every operation category.
///
/// Callers that care about a specific category pattern-match one level
/// deeper; the harness only needs `Display`.
#[derive(Debug)]
pub enum EngineError {
    Account(AccountError),
    Session(SessionError),
    Relation(RelationError),
    Messaging(MessagingError),
    Community(CommunityError),
    Snapshot(SnapshotError),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Account(err) => write!(f, "{err}"),
            Self::Session(err) => write!(f, "{err}"),
            Self::Relation(err) => write!(f, "{err}"),
            Self::Messaging(err) => write!(f, "{err}"),
            Self::Community(err) => write!(f, "{err}"),
            Self::Snapshot(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Account(err) => Some(err),
            Self::Session(err) => Some(err),
            Self::Relation(err) => Some(err),
            Self::Messaging(err) => Some(err),
            Self::Community(err) => Some(err),
            Self::Snapshot(err) => Some(err),
        }
    }
}

impl From<AccountError> for EngineError {
    fn from(value: AccountError) -> Self {
        Self::Account(value)
    }
}

impl From<SessionError> for EngineError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

impl From<RelationError> for EngineError {
    fn from(value: RelationError) -> Self {
        Self::Relation(value)
    }
}

impl From<MessagingError> for EngineError {
    fn from(value: MessagingError) -> Self {
        Self::Messaging(value)
    }
}

impl From<CommunityError> for EngineError {
    fn from(value: CommunityError) -> Self {
        Self::Community(value)
    }
}

impl From<SnapshotError> for EngineError {
    fn from(value: SnapshotError) -> Self {
        Self::Snapshot(value)
    }
}

/// The in-memory social-graph engine.
///
/// Every operation resolves identity first (session token or login), then
/// mutates or reads the injected state through the matching use-case
/// service. All methods take `&mut self`; the whole engine is a single
/// logical actor.
pub struct Engine {
    store: Store,
    sessions: SessionRegistry,
    gateway: Option<Box<dyn SnapshotStore>>,
}

impl Engine {
    /// Creates a volatile engine with no persistence gateway.
    pub fn new() -> Self {
        Self {
            store: Store::new(),
            sessions: SessionRegistry::new(),
            gateway: None,
        }
    }

    /// Creates an engine backed by a snapshot gateway, loading persisted
    /// state at start (empty when no snapshot exists).
    pub fn with_snapshot(gateway: Box<dyn SnapshotStore>) -> EngineResult<Self> {
        let snapshot = gateway.load()?;
        info!(
            "event=engine_started module=engine status=ok accounts={} communities={}",
            snapshot.accounts.len(),
            snapshot.communities.len()
        );
        Ok(Self {
            store: Store::from_snapshot(snapshot),
            sessions: SessionRegistry::new(),
            gateway: Some(gateway),
        })
    }

    fn accounts(&mut self) -> AccountService<'_> {
        AccountService::new(&mut self.store, &mut self.sessions)
    }

    fn relations(&mut self) -> RelationService<'_> {
        RelationService::new(&mut self.store, &self.sessions)
    }

    fn messaging(&mut self) -> MessagingService<'_> {
        MessagingService::new(&mut self.store, &self.sessions)
    }

    fn communities_service(&mut self) -> CommunityService<'_> {
        CommunityService::new(&mut self.store, &self.sessions)
    }

    // --- accounts ---

    pub fn create_account(
        &mut self,
        login: &str,
        password: &str,
        display_name: &str,
    ) -> EngineResult<()> {
        self.accounts().create_account(login, password, display_name)?;
        Ok(())
    }

    pub fn attribute(&mut self, login: &str, name: &str) -> EngineResult<String> {
        Ok(self.accounts().attribute(login, name)?)
    }

    pub fn set_profile_attribute(
        &mut self,
        token: &str,
        name: &str,
        value: &str,
    ) -> EngineResult<()> {
        self.accounts().set_profile_attribute(token, name, value)?;
        Ok(())
    }

    pub fn remove_account(&mut self, token: &str) -> EngineResult<()> {
        self.accounts().remove_account(token)?;
        Ok(())
    }

    // --- sessions ---

    /// Opens a session and returns its opaque token.
    pub fn login(&mut self, login: &str, password: &str) -> EngineResult<String> {
        Ok(self.sessions.open(&self.store, login, password)?)
    }

    /// Closes one session. Returns whether the token was bound.
    pub fn close_session(&mut self, token: &str) -> bool {
        self.sessions.close(token)
    }

    // --- friendship and relations ---

    pub fn request_friend(&mut self, token: &str, other: &str) -> EngineResult<()> {
        self.relations().request_friend(token, other)?;
        Ok(())
    }

    pub fn are_friends(&mut self, a: &str, b: &str) -> EngineResult<bool> {
        Ok(self.relations().are_friends(a, b)?)
    }

    pub fn friends(&mut self, login: &str) -> EngineResult<Vec<String>> {
        Ok(self.relations().friends(login)?)
    }

    pub fn add_idol(&mut self, token: &str, idol: &str) -> EngineResult<()> {
        self.relations().add_idol(token, idol)?;
        Ok(())
    }

    pub fn is_fan(&mut self, login: &str, idol: &str) -> EngineResult<bool> {
        Ok(self.relations().is_fan(login, idol)?)
    }

    pub fn fans(&mut self, login: &str) -> EngineResult<Vec<String>> {
        Ok(self.relations().fans(login)?)
    }

    pub fn add_crush(&mut self, token: &str, other: &str) -> EngineResult<()> {
        self.relations().add_crush(token, other)?;
        Ok(())
    }

    pub fn is_crush(&mut self, token: &str, other: &str) -> EngineResult<bool> {
        Ok(self.relations().is_crush(token, other)?)
    }

    /// Returns the crush list, auto-delivering the mutual-crush note.
    pub fn crushes(&mut self, token: &str) -> EngineResult<Vec<String>> {
        Ok(self.relations().crushes(token)?)
    }

    pub fn add_enemy(&mut self, token: &str, other: &str) -> EngineResult<()> {
        self.relations().add_enemy(token, other)?;
        Ok(())
    }

    // --- messaging ---

    pub fn send_note(&mut self, token: &str, receiver: &str, body: &str) -> EngineResult<()> {
        self.messaging().send_note(token, receiver, body)?;
        Ok(())
    }

    pub fn read_note(&mut self, token: &str) -> EngineResult<String> {
        Ok(self.messaging().read_note(token)?)
    }

    pub fn send_broadcast(&mut self, token: &str, community: &str, body: &str) -> EngineResult<()> {
        self.messaging().send_broadcast(token, community, body)?;
        Ok(())
    }

    pub fn read_broadcast(&mut self, token: &str) -> EngineResult<String> {
        Ok(self.messaging().read_broadcast(token)?)
    }

    // --- communities ---

    pub fn create_community(
        &mut self,
        token: &str,
        name: &str,
        description: &str,
    ) -> EngineResult<()> {
        self.communities_service().create(token, name, description)?;
        Ok(())
    }

    pub fn join_community(&mut self, token: &str, name: &str) -> EngineResult<()> {
        self.communities_service().join(token, name)?;
        Ok(())
    }

    pub fn community_description(&mut self, name: &str) -> EngineResult<String> {
        Ok(self.communities_service().description(name)?)
    }

    pub fn community_owner(&mut self, name: &str) -> EngineResult<String> {
        Ok(self.communities_service().owner(name)?)
    }

    pub fn community_members(&mut self, name: &str) -> EngineResult<Vec<String>> {
        Ok(self.communities_service().members(name)?)
    }

    pub fn communities(&mut self, login: &str) -> EngineResult<Vec<String>> {
        Ok(self.communities_service().communities(login)?)
    }

    // --- lifecycle ---

    /// Clears all in-memory accounts and communities.
    ///
    /// Sessions stay registered; a token whose account vanished resolves as
    /// `InvalidSession` on the next use.
    pub fn reset(&mut self) {
        self.store.clear();
        info!("event=engine_reset module=engine status=ok");
    }

    /// Persists the full state, clears it and reloads from the gateway.
    ///
    /// Without a gateway this degenerates to a plain clear.
    pub fn shutdown(&mut self) -> EngineResult<()> {
        if let Some(gateway) = &self.gateway {
            gateway.save(&self.store.to_snapshot())?;
            self.store.clear();
            self.store = Store::from_snapshot(gateway.load()?);
        } else {
            self.store.clear();
        }
        info!("event=engine_shutdown module=engine status=ok");
        Ok(())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
