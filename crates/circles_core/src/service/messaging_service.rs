//! Private note and community broadcast delivery.
//!
//! # Responsibility
//! - Deliver private notes between accounts under self/enemy policy checks.
//! - Fan community broadcasts out to the member set at send time.
//! - Serve both queues strictly FIFO with exactly-once reads.
//!
//! # Invariants
//! - A note is appended to exactly one receiver queue and recorded once in
//!   the sender's sent-note record.
//! - Broadcast fan-out snapshots the member list at send time; later
//!   joiners never receive earlier broadcasts.

use crate::model::message::{Broadcast, Note};
use crate::service::resolve_login;
use crate::store::session::SessionError;
use crate::store::{SessionRegistry, Store};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type MessagingResult<T> = Result<T, MessagingError>;

/// Messaging operation failures.
#[derive(Debug)]
pub enum MessagingError {
    /// Session resolution failure.
    Session(SessionError),
    /// Receiver login is not registered.
    UnknownAccount,
    /// Sender addressed themselves.
    SelfNote,
    /// Receiver lists the sender as an enemy.
    EnemyBlocked { display_name: String },
    /// Private note queue is empty.
    NoNotes,
    /// Broadcast target community does not exist.
    UnknownCommunity,
    /// Broadcast queue is empty.
    NoMessages,
}

impl Display for MessagingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Session(err) => write!(f, "{err}"),
            Self::UnknownAccount => write!(f, "account is not registered"),
            Self::SelfNote => write!(f, "user cannot send a note to themselves"),
            Self::EnemyBlocked { display_name } => {
                write!(f, "invalid operation: {display_name} is your enemy")
            }
            Self::NoNotes => write!(f, "there are no notes"),
            Self::UnknownCommunity => write!(f, "community does not exist"),
            Self::NoMessages => write!(f, "there are no messages"),
        }
    }
}

impl Error for MessagingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Session(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SessionError> for MessagingError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

/// Messaging use-case service over the injected store.
pub struct MessagingService<'a> {
    store: &'a mut Store,
    sessions: &'a SessionRegistry,
}

impl<'a> MessagingService<'a> {
    pub fn new(store: &'a mut Store, sessions: &'a SessionRegistry) -> Self {
        Self { store, sessions }
    }

    /// Sends a private note from the session's account.
    ///
    /// # Errors
    /// - `UnknownAccount` when the receiver is unregistered.
    /// - `SelfNote` when sender and receiver coincide.
    /// - `EnemyBlocked` when the receiver lists the sender as an enemy.
    pub fn send_note(&mut self, token: &str, receiver: &str, body: &str) -> MessagingResult<()> {
        let sender = resolve_login(self.store, self.sessions, token)?;
        self.deliver_note(&sender, receiver, body)
    }

    /// Delivers a note on behalf of a known sender login.
    ///
    /// Shared by the session send path and the mutual-crush auto-note; runs
    /// the same policy checks either way.
    pub(crate) fn deliver_note(
        &mut self,
        sender: &str,
        receiver: &str,
        body: &str,
    ) -> MessagingResult<()> {
        let target = self
            .store
            .account(receiver)
            .ok_or(MessagingError::UnknownAccount)?;
        if sender == receiver {
            return Err(MessagingError::SelfNote);
        }
        if target.lists_enemy(sender) {
            return Err(MessagingError::EnemyBlocked {
                display_name: target.display_name.clone(),
            });
        }

        if let Some(account) = self.store.account_mut(sender) {
            account.noted_logins.push(receiver.to_string());
        }
        let target = self
            .store
            .account_mut(receiver)
            .ok_or(MessagingError::UnknownAccount)?;
        target.push_note(Note::new(sender, receiver, body));
        Ok(())
    }

    /// Pops and returns the oldest queued note body.
    ///
    /// Strict FIFO, exactly-once; a read note is gone.
    pub fn read_note(&mut self, token: &str) -> MessagingResult<String> {
        let login = resolve_login(self.store, self.sessions, token)?;
        let account = self
            .store
            .account_mut(&login)
            .ok_or(MessagingError::Session(SessionError::InvalidSession))?;
        account
            .pop_note()
            .map(|note| note.body)
            .ok_or(MessagingError::NoNotes)
    }

    /// Broadcasts a message to every current member of a community.
    ///
    /// The sender needs a live session but no membership in the community.
    pub fn send_broadcast(
        &mut self,
        token: &str,
        community: &str,
        body: &str,
    ) -> MessagingResult<()> {
        resolve_login(self.store, self.sessions, token)?;
        let members = self
            .store
            .community(community)
            .ok_or(MessagingError::UnknownCommunity)?
            .members
            .clone();

        let broadcast = Broadcast::new(body);
        for member in &members {
            if let Some(account) = self.store.account_mut(member) {
                account.push_broadcast(broadcast.clone());
            }
        }
        Ok(())
    }

    /// Pops and returns the oldest queued broadcast body.
    ///
    /// Queues are consumed independently per recipient.
    pub fn read_broadcast(&mut self, token: &str) -> MessagingResult<String> {
        let login = resolve_login(self.store, self.sessions, token)?;
        let account = self
            .store
            .account_mut(&login)
            .ok_or(MessagingError::Session(SessionError::InvalidSession))?;
        account
            .pop_broadcast()
            .map(|broadcast| broadcast.body)
            .ok_or(MessagingError::NoMessages)
    }
}
