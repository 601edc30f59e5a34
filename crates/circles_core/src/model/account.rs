//! Account domain record.
//!
//! # Responsibility
//! - Hold one user's identity, credentials, profile and per-account state:
//!   relation lists, FIFO queues and community memberships.
//! - Provide membership helpers over the adjacency lists.
//!
//! # Invariants
//! - `login` is unique in the store and never changes after creation.
//! - Relationship state references other accounts by login, never by
//!   embedded record.
//! - `friends` membership is symmetric across accounts; the service layer
//!   enforces this at mutation time.
//! - `notes` and `broadcasts` are strict FIFO queues consumed exactly once.

use crate::model::message::{Broadcast, Note};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Canonical per-user record owned by the account store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Stable identity key.
    pub login: String,
    /// Opaque credential; compared verbatim on session open.
    pub password: String,
    /// Free-form display name, shown in enemy-block and crush messages.
    pub display_name: String,
    /// Arbitrary profile attributes, upserted by the profile editor.
    pub profile: HashMap<String, String>,
    /// Confirmed friends, insertion-ordered.
    pub friends: Vec<String>,
    /// Outgoing friend requests awaiting acceptance.
    pub requests_sent: Vec<String>,
    /// Incoming friend requests awaiting acceptance.
    pub requests_received: Vec<String>,
    /// Private note queue, oldest first.
    pub notes: VecDeque<Note>,
    /// Community broadcast queue, oldest first.
    pub broadcasts: VecDeque<Broadcast>,
    /// Names of joined communities, in join order.
    pub communities: Vec<String>,
    /// Logins that declared this account their idol.
    pub fans: Vec<String>,
    /// Logins this account has a crush on.
    pub crushes: Vec<String>,
    /// Logins this account declared enemies.
    pub enemies: Vec<String>,
    /// Receiver login of every note this account sent, one entry per send.
    /// Consumed only by the removal cascade.
    pub noted_logins: Vec<String>,
}

impl Account {
    /// Creates an account with empty relationship and queue state.
    pub fn new(
        login: impl Into<String>,
        password: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
            display_name: display_name.into(),
            profile: HashMap::new(),
            friends: Vec::new(),
            requests_sent: Vec::new(),
            requests_received: Vec::new(),
            notes: VecDeque::new(),
            broadcasts: VecDeque::new(),
            communities: Vec::new(),
            fans: Vec::new(),
            crushes: Vec::new(),
            enemies: Vec::new(),
            noted_logins: Vec::new(),
        }
    }

    /// Returns whether `login` is in this account's confirmed friend list.
    ///
    /// One-sided by design; callers that need the symmetric relation must
    /// check both accounts.
    pub fn has_friend(&self, login: &str) -> bool {
        self.friends.iter().any(|entry| entry == login)
    }

    /// Returns whether `login` is listed as an enemy of this account.
    pub fn lists_enemy(&self, login: &str) -> bool {
        self.enemies.iter().any(|entry| entry == login)
    }

    /// Returns whether `login` has declared this account an idol.
    pub fn has_fan(&self, login: &str) -> bool {
        self.fans.iter().any(|entry| entry == login)
    }

    /// Returns whether this account has a crush on `login`.
    pub fn has_crush(&self, login: &str) -> bool {
        self.crushes.iter().any(|entry| entry == login)
    }

    /// Returns whether this account belongs to the named community.
    pub fn in_community(&self, name: &str) -> bool {
        self.communities.iter().any(|entry| entry == name)
    }

    /// Appends a note to the private queue.
    pub fn push_note(&mut self, note: Note) {
        self.notes.push_back(note);
    }

    /// Pops the oldest queued note, if any.
    pub fn pop_note(&mut self) -> Option<Note> {
        self.notes.pop_front()
    }

    /// Appends a broadcast copy to the broadcast queue.
    pub fn push_broadcast(&mut self, broadcast: Broadcast) {
        self.broadcasts.push_back(broadcast);
    }

    /// Pops the oldest queued broadcast, if any.
    pub fn pop_broadcast(&mut self) -> Option<Broadcast> {
        self.broadcasts.pop_front()
    }

    /// Removes the oldest queued note written by `sender`.
    ///
    /// Returns `false` when no note from that sender is queued. Used by the
    /// removal cascade; notes from other senders are left untouched.
    pub fn discard_note_from(&mut self, sender: &str) -> bool {
        match self.notes.iter().position(|note| note.sender == sender) {
            Some(index) => {
                self.notes.remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Account;
    use crate::model::message::Note;

    #[test]
    fn new_account_starts_empty() {
        let account = Account::new("ana", "secret", "Ana");

        assert_eq!(account.login, "ana");
        assert!(account.profile.is_empty());
        assert!(account.friends.is_empty());
        assert!(account.notes.is_empty());
        assert!(account.broadcasts.is_empty());
        assert!(account.noted_logins.is_empty());
    }

    #[test]
    fn note_queue_is_fifo() {
        let mut account = Account::new("ana", "secret", "Ana");
        account.push_note(Note::new("bob", "ana", "first"));
        account.push_note(Note::new("bob", "ana", "second"));

        assert_eq!(account.pop_note().unwrap().body, "first");
        assert_eq!(account.pop_note().unwrap().body, "second");
        assert!(account.pop_note().is_none());
    }

    #[test]
    fn discard_note_from_skips_other_senders() {
        let mut account = Account::new("ana", "secret", "Ana");
        account.push_note(Note::new("carla", "ana", "keep me"));
        account.push_note(Note::new("bob", "ana", "drop me"));

        assert!(account.discard_note_from("bob"));
        assert_eq!(account.notes.len(), 1);
        assert_eq!(account.notes[0].body, "keep me");
        assert!(!account.discard_note_from("bob"));
    }
}
