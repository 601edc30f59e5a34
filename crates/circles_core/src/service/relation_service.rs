//! Friendship state machine and one-directional relations.
//!
//! # Responsibility
//! - Drive the per-pair friendship protocol: none, pending in either
//!   direction, mutual.
//! - Maintain the fan/idol, crush and enemy lists under the shared
//!   self-target / duplicate / enemy-block precondition pattern.
//! - Auto-deliver the mutual-crush note when the crush list is read.
//!
//! # Invariants
//! - Friendship is symmetric after every successful transition; pending
//!   records and the friend lists are mutually exclusive per pair.
//! - The implicit accept (a request answering a reverse pending request) is
//!   the only transition that mutates both accounts in one call, and it
//!   always completes fully.
//! - Enemy-block is checked against the target's enemy list on every
//!   initiating operation except `add_enemy` itself.

use crate::service::messaging_service::{MessagingError, MessagingService};
use crate::service::resolve_login;
use crate::store::session::SessionError;
use crate::store::{SessionRegistry, Store};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RelationResult<T> = Result<T, RelationError>;

/// Relationship operation failures.
#[derive(Debug)]
pub enum RelationError {
    /// Session resolution failure.
    Session(SessionError),
    /// Target login is not registered.
    UnknownAccount,
    /// Caller friend-requested themselves.
    SelfFriendship,
    /// The pair is already mutual friends.
    AlreadyFriends,
    /// An outgoing request to this target is already pending.
    RequestAlreadySent,
    /// Caller declared themselves their own idol.
    SelfFan,
    /// Caller is already a fan of this idol.
    AlreadyIdol,
    /// Caller declared a crush on themselves.
    SelfCrush,
    /// Target is already in the caller's crush list.
    AlreadyCrush,
    /// Caller declared themselves an enemy.
    SelfEnemy,
    /// Target is already in the caller's enemy list.
    AlreadyEnemy,
    /// Target lists the caller as an enemy.
    EnemyBlocked { display_name: String },
    /// Mutual-crush note delivery failure.
    Messaging(MessagingError),
}

impl Display for RelationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Session(err) => write!(f, "{err}"),
            Self::UnknownAccount => write!(f, "account is not registered"),
            Self::SelfFriendship => {
                write!(f, "user cannot add themselves as a friend")
            }
            Self::AlreadyFriends => write!(f, "user is already a friend"),
            Self::RequestAlreadySent => {
                write!(f, "friend request already sent, waiting for acceptance")
            }
            Self::SelfFan => write!(f, "user cannot be a fan of themselves"),
            Self::AlreadyIdol => write!(f, "user is already added as an idol"),
            Self::SelfCrush => write!(f, "user cannot be a crush of themselves"),
            Self::AlreadyCrush => write!(f, "user is already added as a crush"),
            Self::SelfEnemy => write!(f, "user cannot be an enemy of themselves"),
            Self::AlreadyEnemy => write!(f, "user is already added as an enemy"),
            Self::EnemyBlocked { display_name } => {
                write!(f, "invalid operation: {display_name} is your enemy")
            }
            Self::Messaging(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RelationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Session(err) => Some(err),
            Self::Messaging(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SessionError> for RelationError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

impl From<MessagingError> for RelationError {
    fn from(value: MessagingError) -> Self {
        Self::Messaging(value)
    }
}

/// Relationship use-case service over the injected store.
pub struct RelationService<'a> {
    store: &'a mut Store,
    sessions: &'a SessionRegistry,
}

impl<'a> RelationService<'a> {
    pub fn new(store: &'a mut Store, sessions: &'a SessionRegistry) -> Self {
        Self { store, sessions }
    }

    /// Sends, or implicitly accepts, a friend request.
    ///
    /// Check order is part of the contract; reordering changes which error
    /// is raised when conditions overlap:
    /// session, target registered, self-target, already friends,
    /// enemy-block, request already sent, implicit accept, pending.
    ///
    /// A request that answers a reverse pending request transitions the
    /// pair straight to mutual: both friend lists gain the other login and
    /// both pending records are cleared in this one call.
    pub fn request_friend(&mut self, token: &str, other: &str) -> RelationResult<()> {
        let login = resolve_login(self.store, self.sessions, token)?;
        let target = self
            .store
            .account(other)
            .ok_or(RelationError::UnknownAccount)?;
        if login == other {
            return Err(RelationError::SelfFriendship);
        }

        let target_lists_caller = target.has_friend(&login);
        let target_display = target.display_name.clone();
        let target_is_enemy = target.lists_enemy(&login);
        let caller = self
            .store
            .account(&login)
            .ok_or(RelationError::Session(SessionError::InvalidSession))?;

        if caller.has_friend(other) && target_lists_caller {
            return Err(RelationError::AlreadyFriends);
        }
        if target_is_enemy {
            return Err(RelationError::EnemyBlocked {
                display_name: target_display,
            });
        }
        if caller.requests_sent.iter().any(|entry| entry == other) {
            return Err(RelationError::RequestAlreadySent);
        }

        let reverse_pending = caller.requests_received.iter().any(|entry| entry == other);
        if reverse_pending {
            self.accept(&login, other);
            debug!("event=friend_accept module=relation status=ok pair={login},{other}");
        } else {
            self.record_request(&login, other);
            debug!("event=friend_request module=relation status=pending pair={login},{other}");
        }
        Ok(())
    }

    /// Completes the mutual transition for an answered request.
    ///
    /// Both accounts were validated by the caller; a vanished account at
    /// this point is unreachable under `&mut self` sequencing.
    fn accept(&mut self, login: &str, other: &str) {
        if let Some(caller) = self.store.account_mut(login) {
            caller.friends.push(other.to_string());
            caller.requests_received.retain(|entry| entry != other);
        }
        if let Some(target) = self.store.account_mut(other) {
            target.friends.push(login.to_string());
            target.requests_sent.retain(|entry| entry != login);
        }
    }

    /// Records a new pending request on both sides.
    fn record_request(&mut self, login: &str, other: &str) {
        if let Some(caller) = self.store.account_mut(login) {
            caller.requests_sent.push(other.to_string());
        }
        if let Some(target) = self.store.account_mut(other) {
            target.requests_received.push(login.to_string());
        }
    }

    /// Returns whether both accounts list each other as friends.
    ///
    /// Both directions are checked; symmetry is never assumed from one
    /// side.
    pub fn are_friends(&self, a: &str, b: &str) -> RelationResult<bool> {
        let first = self.store.account(a).ok_or(RelationError::UnknownAccount)?;
        let second = self.store.account(b).ok_or(RelationError::UnknownAccount)?;
        Ok(first.has_friend(b) && second.has_friend(a))
    }

    /// Returns the friend list in insertion order.
    pub fn friends(&self, login: &str) -> RelationResult<Vec<String>> {
        let account = self
            .store
            .account(login)
            .ok_or(RelationError::UnknownAccount)?;
        Ok(account.friends.clone())
    }

    /// Declares the session's account a fan of `idol`.
    pub fn add_idol(&mut self, token: &str, idol: &str) -> RelationResult<()> {
        let login = resolve_login(self.store, self.sessions, token)?;
        let target = self
            .store
            .account(idol)
            .ok_or(RelationError::UnknownAccount)?;
        if login == idol {
            return Err(RelationError::SelfFan);
        }
        if target.has_fan(&login) {
            return Err(RelationError::AlreadyIdol);
        }
        if target.lists_enemy(&login) {
            return Err(RelationError::EnemyBlocked {
                display_name: target.display_name.clone(),
            });
        }

        if let Some(target) = self.store.account_mut(idol) {
            target.fans.push(login);
        }
        Ok(())
    }

    /// Returns whether `login` is in the idol's fan list.
    pub fn is_fan(&self, login: &str, idol: &str) -> RelationResult<bool> {
        if !self.store.contains_account(login) {
            return Err(RelationError::UnknownAccount);
        }
        let target = self
            .store
            .account(idol)
            .ok_or(RelationError::UnknownAccount)?;
        Ok(target.has_fan(login))
    }

    /// Returns the fan list of a registered account.
    pub fn fans(&self, login: &str) -> RelationResult<Vec<String>> {
        let account = self
            .store
            .account(login)
            .ok_or(RelationError::UnknownAccount)?;
        Ok(account.fans.clone())
    }

    /// Adds `other` to the session account's crush list.
    pub fn add_crush(&mut self, token: &str, other: &str) -> RelationResult<()> {
        let login = resolve_login(self.store, self.sessions, token)?;
        let target = self
            .store
            .account(other)
            .ok_or(RelationError::UnknownAccount)?;
        if login == other {
            return Err(RelationError::SelfCrush);
        }
        let target_is_enemy = target.lists_enemy(&login);
        let target_display = target.display_name.clone();
        let caller = self
            .store
            .account(&login)
            .ok_or(RelationError::Session(SessionError::InvalidSession))?;
        if caller.has_crush(other) {
            return Err(RelationError::AlreadyCrush);
        }
        if target_is_enemy {
            return Err(RelationError::EnemyBlocked {
                display_name: target_display,
            });
        }

        if let Some(caller) = self.store.account_mut(&login) {
            caller.crushes.push(other.to_string());
        }
        Ok(())
    }

    /// Returns whether `other` is in the session account's crush list.
    pub fn is_crush(&self, token: &str, other: &str) -> RelationResult<bool> {
        let login = resolve_login(self.store, self.sessions, token)?;
        let caller = self
            .store
            .account(&login)
            .ok_or(RelationError::Session(SessionError::InvalidSession))?;
        Ok(caller.has_crush(other))
    }

    /// Returns the session account's crush list.
    ///
    /// # Side effects
    /// Before returning, every mutual crush triggers an auto-delivered
    /// private note "<display name> is your crush" to the caller, once per
    /// call. Repeated calls re-send while the crush stays mutual; delivery
    /// runs through the normal note path and propagates its errors.
    pub fn crushes(&mut self, token: &str) -> RelationResult<Vec<String>> {
        let login = resolve_login(self.store, self.sessions, token)?;
        let caller = self
            .store
            .account(&login)
            .ok_or(RelationError::Session(SessionError::InvalidSession))?;
        let crushes = caller.crushes.clone();

        for crush in &crushes {
            let (mutual, crush_display) = match self.store.account(crush) {
                Some(account) => (account.has_crush(&login), account.display_name.clone()),
                None => continue,
            };
            if !mutual {
                continue;
            }
            MessagingService::new(&mut *self.store, self.sessions).deliver_note(
                crush,
                &login,
                &format!("{crush_display} is your crush"),
            )?;
        }

        Ok(crushes)
    }

    /// Adds `other` to the session account's enemy list.
    ///
    /// The enemy-block policy does not apply to declaring an enemy.
    pub fn add_enemy(&mut self, token: &str, other: &str) -> RelationResult<()> {
        let login = resolve_login(self.store, self.sessions, token)?;
        if !self.store.contains_account(other) {
            return Err(RelationError::UnknownAccount);
        }
        if login == other {
            return Err(RelationError::SelfEnemy);
        }
        let caller = self
            .store
            .account(&login)
            .ok_or(RelationError::Session(SessionError::InvalidSession))?;
        if caller.lists_enemy(other) {
            return Err(RelationError::AlreadyEnemy);
        }

        if let Some(caller) = self.store.account_mut(&login) {
            caller.enemies.push(other.to_string());
        }
        Ok(())
    }
}
