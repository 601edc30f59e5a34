//! Injected in-memory state owner.
//!
//! # Responsibility
//! - Own the account and community maps behind one explicitly constructed
//!   value; no global or static state.
//! - Provide narrow accessors so services never touch raw maps.
//! - Convert to/from whole-state snapshots for the persistence gateway.
//!
//! # Invariants
//! - Accounts are keyed by login, communities by name; keys match the
//!   `login`/`name` field of the stored record.
//! - The store performs no cross-record validation; multi-account
//!   transitions are sequenced by the service layer inside one `&mut`
//!   borrow.

use crate::model::account::Account;
use crate::model::community::Community;
use crate::snapshot::Snapshot;
use std::collections::HashMap;

pub mod session;

pub use session::{SessionError, SessionRegistry, SessionResult};

/// Owner of all persistent engine state.
#[derive(Debug, Default)]
pub struct Store {
    accounts: HashMap<String, Account>,
    communities: HashMap<String, Community>,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from a whole-state snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            accounts: snapshot.accounts,
            communities: snapshot.communities,
        }
    }

    /// Clones the full state into a snapshot value.
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            accounts: self.accounts.clone(),
            communities: self.communities.clone(),
        }
    }

    pub fn contains_account(&self, login: &str) -> bool {
        self.accounts.contains_key(login)
    }

    pub fn account(&self, login: &str) -> Option<&Account> {
        self.accounts.get(login)
    }

    pub fn account_mut(&mut self, login: &str) -> Option<&mut Account> {
        self.accounts.get_mut(login)
    }

    /// Registers an account under its login key, replacing any previous
    /// entry. Duplicate-login policy belongs to the account service.
    pub fn insert_account(&mut self, account: Account) {
        self.accounts.insert(account.login.clone(), account);
    }

    pub fn remove_account(&mut self, login: &str) -> Option<Account> {
        self.accounts.remove(login)
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    pub fn contains_community(&self, name: &str) -> bool {
        self.communities.contains_key(name)
    }

    pub fn community(&self, name: &str) -> Option<&Community> {
        self.communities.get(name)
    }

    pub fn community_mut(&mut self, name: &str) -> Option<&mut Community> {
        self.communities.get_mut(name)
    }

    pub fn insert_community(&mut self, community: Community) {
        self.communities
            .insert(community.name.clone(), community);
    }

    pub fn remove_community(&mut self, name: &str) -> Option<Community> {
        self.communities.remove(name)
    }

    pub fn community_count(&self) -> usize {
        self.communities.len()
    }

    /// Iterates all communities in unspecified order.
    pub fn communities(&self) -> impl Iterator<Item = &Community> {
        self.communities.values()
    }

    /// Drops every account and community.
    pub fn clear(&mut self) {
        self.accounts.clear();
        self.communities.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::Store;
    use crate::model::account::Account;
    use crate::model::community::Community;

    #[test]
    fn snapshot_roundtrip_preserves_state() {
        let mut store = Store::new();
        store.insert_account(Account::new("ana", "secret", "Ana"));
        store.insert_community(Community::new("rustaceans", "crab talk", "ana"));

        let rebuilt = Store::from_snapshot(store.to_snapshot());
        assert!(rebuilt.contains_account("ana"));
        assert!(rebuilt.contains_community("rustaceans"));
        assert_eq!(rebuilt.account_count(), 1);
        assert_eq!(rebuilt.community_count(), 1);
    }

    #[test]
    fn clear_drops_all_state() {
        let mut store = Store::new();
        store.insert_account(Account::new("ana", "secret", "Ana"));
        store.clear();

        assert_eq!(store.account_count(), 0);
        assert!(!store.contains_account("ana"));
    }
}
