//! Account registration, attribute lookup, profile editing and removal.
//!
//! # Responsibility
//! - Register accounts and answer attribute queries (built-ins + profile).
//! - Upsert profile attributes for authenticated sessions.
//! - Run the account-removal cascade: sent-note cleanup, owned-community
//!   deletion, session invalidation.
//!
//! # Invariants
//! - Logins are unique and immutable once registered.
//! - Removal leaves no session resolving to the deleted account and no
//!   community owned by it.

use crate::model::account::Account;
use crate::service::resolve_login;
use crate::store::session::SessionError;
use crate::store::{SessionRegistry, Store};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type AccountResult<T> = Result<T, AccountError>;

/// Account operation failures.
#[derive(Debug)]
pub enum AccountError {
    /// Login is absent or empty.
    InvalidLogin,
    /// Password is absent or empty.
    InvalidPassword,
    /// Login is already registered.
    DuplicateLogin,
    /// Login is not registered.
    UnknownAccount,
    /// Profile attribute was never set.
    UnknownAttribute(String),
    /// Session resolution failure.
    Session(SessionError),
}

impl Display for AccountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogin => write!(f, "login is invalid"),
            Self::InvalidPassword => write!(f, "password is invalid"),
            Self::DuplicateLogin => write!(f, "account with this login already exists"),
            Self::UnknownAccount => write!(f, "account is not registered"),
            Self::UnknownAttribute(name) => write!(f, "attribute `{name}` is not set"),
            Self::Session(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AccountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Session(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SessionError> for AccountError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

/// Account use-case service over the injected store.
pub struct AccountService<'a> {
    store: &'a mut Store,
    sessions: &'a mut SessionRegistry,
}

impl<'a> AccountService<'a> {
    pub fn new(store: &'a mut Store, sessions: &'a mut SessionRegistry) -> Self {
        Self { store, sessions }
    }

    /// Registers a new account with empty relationship and queue state.
    ///
    /// # Errors
    /// - `InvalidLogin` / `InvalidPassword` on empty inputs, checked in
    ///   that order.
    /// - `DuplicateLogin` when the login is taken.
    pub fn create_account(
        &mut self,
        login: &str,
        password: &str,
        display_name: &str,
    ) -> AccountResult<()> {
        if login.is_empty() {
            return Err(AccountError::InvalidLogin);
        }
        if password.is_empty() {
            return Err(AccountError::InvalidPassword);
        }
        if self.store.contains_account(login) {
            return Err(AccountError::DuplicateLogin);
        }

        self.store
            .insert_account(Account::new(login, password, display_name));
        info!("event=account_created module=account status=ok login={login}");
        Ok(())
    }

    /// Returns one attribute of a registered account.
    ///
    /// Recognizes the built-ins `login`, `password` and `name`; any other
    /// name is looked up in the profile map.
    pub fn attribute(&self, login: &str, name: &str) -> AccountResult<String> {
        let account = self
            .store
            .account(login)
            .ok_or(AccountError::UnknownAccount)?;

        match name {
            "login" => Ok(account.login.clone()),
            "password" => Ok(account.password.clone()),
            "name" => Ok(account.display_name.clone()),
            other => account
                .profile
                .get(other)
                .cloned()
                .ok_or_else(|| AccountError::UnknownAttribute(other.to_string())),
        }
    }

    /// Upserts one profile attribute for the session's account.
    ///
    /// Overwriting an existing attribute is idempotent.
    pub fn set_profile_attribute(
        &mut self,
        token: &str,
        name: &str,
        value: &str,
    ) -> AccountResult<()> {
        let login = resolve_login(self.store, self.sessions, token)?;
        let account = self
            .store
            .account_mut(&login)
            .ok_or(AccountError::Session(SessionError::InvalidSession))?;
        account.profile.insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Removes the session's account and cascades.
    ///
    /// Cascade order: queued-note cleanup for every recorded send, then
    /// owned-community deletion with membership pruning, then account
    /// removal and session invalidation.
    ///
    /// # Contract
    /// - For each recorded send, the oldest queued note written by the
    ///   departing account is discarded from that recipient's queue; notes
    ///   from other senders are never touched.
    /// - Every session bound to the account is invalidated, not only the
    ///   one used for this call.
    pub fn remove_account(&mut self, token: &str) -> AccountResult<()> {
        let login = resolve_login(self.store, self.sessions, token)?;
        let departing = self
            .store
            .account(&login)
            .ok_or(AccountError::Session(SessionError::InvalidSession))?;
        let recipients = departing.noted_logins.clone();

        for recipient in &recipients {
            if let Some(account) = self.store.account_mut(recipient) {
                account.discard_note_from(&login);
            }
        }

        let owned: Vec<String> = self
            .store
            .communities()
            .filter(|community| community.owner == login)
            .map(|community| community.name.clone())
            .collect();
        for name in &owned {
            if let Some(community) = self.store.remove_community(name) {
                for member in &community.members {
                    if let Some(account) = self.store.account_mut(member) {
                        account.communities.retain(|entry| entry != name);
                    }
                }
            }
        }

        self.store.remove_account(&login);
        self.sessions.invalidate_account(&login);
        info!(
            "event=account_removed module=account status=ok login={login} owned_communities={}",
            owned.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AccountError, AccountService};
    use crate::store::{SessionRegistry, Store};

    fn service<'a>(
        store: &'a mut Store,
        sessions: &'a mut SessionRegistry,
    ) -> AccountService<'a> {
        AccountService::new(store, sessions)
    }

    #[test]
    fn create_rejects_empty_login_before_password() {
        let mut store = Store::new();
        let mut sessions = SessionRegistry::new();
        let mut accounts = service(&mut store, &mut sessions);

        assert!(matches!(
            accounts.create_account("", "", "Nobody"),
            Err(AccountError::InvalidLogin)
        ));
        assert!(matches!(
            accounts.create_account("ana", "", "Ana"),
            Err(AccountError::InvalidPassword)
        ));
    }

    #[test]
    fn create_rejects_duplicate_login() {
        let mut store = Store::new();
        let mut sessions = SessionRegistry::new();
        let mut accounts = service(&mut store, &mut sessions);

        accounts.create_account("ana", "secret", "Ana").unwrap();
        assert!(matches!(
            accounts.create_account("ana", "other", "Ana Clone"),
            Err(AccountError::DuplicateLogin)
        ));
    }

    #[test]
    fn attribute_resolves_builtins_and_profile() {
        let mut store = Store::new();
        let mut sessions = SessionRegistry::new();
        let mut accounts = service(&mut store, &mut sessions);
        accounts.create_account("ana", "secret", "Ana").unwrap();

        let token = sessions.open(&store, "ana", "secret").unwrap();
        let mut accounts = service(&mut store, &mut sessions);
        accounts
            .set_profile_attribute(&token, "city", "Recife")
            .unwrap();

        assert_eq!(accounts.attribute("ana", "login").unwrap(), "ana");
        assert_eq!(accounts.attribute("ana", "password").unwrap(), "secret");
        assert_eq!(accounts.attribute("ana", "name").unwrap(), "Ana");
        assert_eq!(accounts.attribute("ana", "city").unwrap(), "Recife");
        assert!(matches!(
            accounts.attribute("ana", "age"),
            Err(AccountError::UnknownAttribute(_))
        ));
        assert!(matches!(
            accounts.attribute("bob", "login"),
            Err(AccountError::UnknownAccount)
        ));
    }

    #[test]
    fn profile_upsert_overwrites_previous_value() {
        let mut store = Store::new();
        let mut sessions = SessionRegistry::new();
        service(&mut store, &mut sessions)
            .create_account("ana", "secret", "Ana")
            .unwrap();
        let token = sessions.open(&store, "ana", "secret").unwrap();

        let mut accounts = service(&mut store, &mut sessions);
        accounts
            .set_profile_attribute(&token, "city", "Recife")
            .unwrap();
        accounts
            .set_profile_attribute(&token, "city", "Maceió")
            .unwrap();
        assert_eq!(accounts.attribute("ana", "city").unwrap(), "Maceió");
    }
}
