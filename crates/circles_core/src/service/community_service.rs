//! Community creation, membership and lookups.
//!
//! # Responsibility
//! - Create communities with the owner auto-joined as first member.
//! - Append members to the ordered member list and mirror the name in the
//!   account's membership list.
//! - Answer description/owner/member lookups.
//!
//! # Invariants
//! - Community names are unique; the owner is fixed at creation.
//! - An account's membership list and the community member lists agree:
//!   joins append to both sides in one call.

use crate::model::community::Community;
use crate::service::resolve_login;
use crate::store::session::SessionError;
use crate::store::{SessionRegistry, Store};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CommunityResult<T> = Result<T, CommunityError>;

/// Community operation failures.
#[derive(Debug)]
pub enum CommunityError {
    /// Session resolution failure.
    Session(SessionError),
    /// Community name already taken.
    DuplicateCommunity,
    /// Community does not exist.
    UnknownCommunity,
    /// Account already belongs to this community.
    AlreadyMember,
    /// Login is not registered.
    UnknownAccount,
}

impl Display for CommunityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Session(err) => write!(f, "{err}"),
            Self::DuplicateCommunity => {
                write!(f, "community with this name already exists")
            }
            Self::UnknownCommunity => write!(f, "community does not exist"),
            Self::AlreadyMember => write!(f, "user already belongs to this community"),
            Self::UnknownAccount => write!(f, "account is not registered"),
        }
    }
}

impl Error for CommunityError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Session(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SessionError> for CommunityError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

/// Community use-case service over the injected store.
pub struct CommunityService<'a> {
    store: &'a mut Store,
    sessions: &'a SessionRegistry,
}

impl<'a> CommunityService<'a> {
    pub fn new(store: &'a mut Store, sessions: &'a SessionRegistry) -> Self {
        Self { store, sessions }
    }

    /// Creates a community owned by the session's account.
    ///
    /// The owner is auto-joined as first member and the name is appended to
    /// the owner's membership list.
    pub fn create(&mut self, token: &str, name: &str, description: &str) -> CommunityResult<()> {
        let login = resolve_login(self.store, self.sessions, token)?;
        if self.store.contains_community(name) {
            return Err(CommunityError::DuplicateCommunity);
        }

        if let Some(owner) = self.store.account_mut(&login) {
            owner.communities.push(name.to_string());
        }
        self.store
            .insert_community(Community::new(name, description, login.clone()));
        info!("event=community_created module=community status=ok name={name} owner={login}");
        Ok(())
    }

    /// Joins the session's account to an existing community.
    ///
    /// Membership is judged by the account's own membership list; the
    /// community member list mirrors it on success.
    pub fn join(&mut self, token: &str, name: &str) -> CommunityResult<()> {
        let login = resolve_login(self.store, self.sessions, token)?;
        if !self.store.contains_community(name) {
            return Err(CommunityError::UnknownCommunity);
        }
        let account = self
            .store
            .account(&login)
            .ok_or(CommunityError::Session(SessionError::InvalidSession))?;
        if account.in_community(name) {
            return Err(CommunityError::AlreadyMember);
        }

        if let Some(community) = self.store.community_mut(name) {
            community.members.push(login.clone());
        }
        if let Some(account) = self.store.account_mut(&login) {
            account.communities.push(name.to_string());
        }
        Ok(())
    }

    /// Returns a community's description.
    pub fn description(&self, name: &str) -> CommunityResult<String> {
        self.store
            .community(name)
            .map(|community| community.description.clone())
            .ok_or(CommunityError::UnknownCommunity)
    }

    /// Returns a community's owner login.
    pub fn owner(&self, name: &str) -> CommunityResult<String> {
        self.store
            .community(name)
            .map(|community| community.owner.clone())
            .ok_or(CommunityError::UnknownCommunity)
    }

    /// Returns a community's member logins in join order.
    pub fn members(&self, name: &str) -> CommunityResult<Vec<String>> {
        self.store
            .community(name)
            .map(|community| community.members.clone())
            .ok_or(CommunityError::UnknownCommunity)
    }

    /// Returns the membership list of a registered account, in join order.
    pub fn communities(&self, login: &str) -> CommunityResult<Vec<String>> {
        let account = self
            .store
            .account(login)
            .ok_or(CommunityError::UnknownAccount)?;
        Ok(account.communities.clone())
    }
}
