//! Persisted session state.

use super::model::Session;
use crate::credential::{Account, CredentialRecord, CredentialStore, is_valid_email};
use crate::error::{MyflixError, Result};
use crate::storage::{KeyValueStore, SharedStore, keys};

/// Process-wide record of who is signed in.
///
/// Hydrated once from storage at startup, then mutated only through
/// [`SessionState::authenticate`] and [`SessionState::logout`].
pub struct SessionState {
    store: SharedStore,
    credentials: CredentialStore,
    current: Session,
}

impl SessionState {
    /// Restores the session persisted by a previous login.
    ///
    /// Unreadable storage yields an anonymous session.
    pub fn hydrate(store: SharedStore) -> Self {
        let current = match Self::read_persisted(store.as_ref()) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Failed to restore session, starting anonymous: {}", e);
                Session::anonymous()
            }
        };

        if let Some(account_id) = current.active_account() {
            tracing::info!(account_id = %account_id, "Restored session");
        }

        Self {
            credentials: CredentialStore::new(store.clone()),
            store,
            current,
        }
    }

    fn read_persisted(store: &dyn KeyValueStore) -> Result<Session> {
        let logged_in = store.get(keys::IS_LOGGED_IN)?.as_deref() == Some("true");
        let account_id = store.get(keys::CURRENT_USER)?.filter(|id| !id.is_empty());

        Ok(match (logged_in, account_id) {
            (true, Some(id)) => Session::for_account(id),
            _ => Session::anonymous(),
        })
    }

    pub fn session(&self) -> &Session {
        &self.current
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.authenticated
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Whether the user asked to stay signed in at the last login.
    pub fn keep_login(&self) -> bool {
        matches!(self.store.get(keys::KEEP_LOGIN), Ok(Some(ref v)) if v == "true")
    }

    pub fn register(&self, account_id: &str, secret: &str) -> Result<Account> {
        self.credentials.register(account_id, secret)
    }

    /// Signs in and persists the session so a restart restores it.
    ///
    /// The secret is also persisted as the metadata-service API key.
    ///
    /// # Arguments
    ///
    /// * `account_id` - E-mail address the account was registered with
    /// * `secret` - Secret given at registration
    /// * `keep_login` - Whether to persist the "keep me signed in" flag
    ///
    /// # Returns
    ///
    /// The new session. If persisting fails, every session key is cleared,
    /// the state falls back to anonymous and the storage error is returned.
    pub fn authenticate(&mut self, account_id: &str, secret: &str, keep_login: bool) -> Result<Session> {
        if !is_valid_email(account_id) {
            return Err(MyflixError::InvalidAccountId {
                account_id: account_id.to_string(),
            });
        }

        let record = self.credentials.verify(account_id, secret)?;

        if let Err(e) = self.persist(&record, keep_login) {
            tracing::warn!(account_id = %account_id, "Failed to persist session: {}", e);
            self.logout();
            return Err(e);
        }

        self.current = Session::for_account(record.account_id);
        tracing::info!(account_id = %account_id, "Logged in");
        Ok(self.current.clone())
    }

    /// Writes the session keys with `isLoggedIn` last, so a partial write
    /// never reads back as a signed-in session.
    fn persist(&self, record: &CredentialRecord, keep_login: bool) -> Result<()> {
        self.store.remove(keys::IS_LOGGED_IN)?;
        self.store.set(keys::API_KEY, &record.secret)?;
        self.store.set(keys::CURRENT_USER, &record.account_id)?;
        if keep_login {
            self.store.set(keys::KEEP_LOGIN, "true")?;
        } else {
            self.store.remove(keys::KEEP_LOGIN)?;
        }
        self.store.set(keys::IS_LOGGED_IN, "true")
    }

    /// Clears the session. Never fails; storage errors are logged.
    pub fn logout(&mut self) {
        for key in [
            keys::IS_LOGGED_IN,
            keys::CURRENT_USER,
            keys::API_KEY,
            keys::KEEP_LOGIN,
        ] {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!("Failed to clear session key '{}': {}", key, e);
            }
        }

        if let Some(account_id) = self.current.active_account() {
            tracing::info!(account_id = %account_id, "Logged out");
        }
        self.current = Session::anonymous();
    }
}
