//! Credential list persisted under the `users` key.

use once_cell::sync::Lazy;
use regex::Regex;

use super::model::{Account, CredentialRecord};
use crate::error::{MyflixError, Result};
use crate::storage::{SharedStore, keys, load_json_or_default, save_json};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

/// Loose `local@domain.tld` check used for account ids.
pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL_RE.is_match(candidate)
}

/// Account registry backed by the key-value store.
#[derive(Clone)]
pub struct CredentialStore {
    store: SharedStore,
}

impl CredentialStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    fn load_records(&self) -> Result<Vec<CredentialRecord>> {
        load_json_or_default(self.store.as_ref(), keys::USERS)
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// - `InvalidAccountId` if `account_id` is not an e-mail address
    /// - `DuplicateAccount` if the id is already registered
    pub fn register(&self, account_id: &str, secret: &str) -> Result<Account> {
        if !is_valid_email(account_id) {
            return Err(MyflixError::InvalidAccountId {
                account_id: account_id.to_string(),
            });
        }

        let mut records = self.load_records()?;
        if records.iter().any(|r| r.account_id == account_id) {
            return Err(MyflixError::DuplicateAccount {
                account_id: account_id.to_string(),
            });
        }

        let record = CredentialRecord {
            account_id: account_id.to_string(),
            secret: secret.to_string(),
        };
        let account = Account::from(&record);
        records.push(record);
        save_json(self.store.as_ref(), keys::USERS, &records)?;

        tracing::info!(account_id = %account_id, "Registered account");
        Ok(account)
    }

    /// Returns the record matching both fields exactly.
    pub fn verify(&self, account_id: &str, secret: &str) -> Result<CredentialRecord> {
        self.load_records()?
            .into_iter()
            .find(|r| r.account_id == account_id && r.secret == secret)
            .ok_or(MyflixError::InvalidCredentials)
    }

    pub fn contains(&self, account_id: &str) -> Result<bool> {
        Ok(self
            .load_records()?
            .iter()
            .any(|r| r.account_id == account_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    fn credential_store() -> (CredentialStore, Arc<MemoryStore>) {
        let memory = Arc::new(MemoryStore::new());
        (CredentialStore::new(memory.clone()), memory)
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("u@x.com"));
        assert!(!is_valid_email("u@x"));
        assert!(!is_valid_email("u x@y.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_register_then_verify() {
        let (creds, _) = credential_store();
        let account = creds.register("u@x.com", "key1").unwrap();
        assert_eq!(account.id, "u@x.com");

        let record = creds.verify("u@x.com", "key1").unwrap();
        assert_eq!(record.secret, "key1");
        assert!(creds.contains("u@x.com").unwrap());
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let (creds, _) = credential_store();
        creds.register("u@x.com", "key1").unwrap();

        let err = creds.register("u@x.com", "other").unwrap_err();
        assert_eq!(
            err,
            MyflixError::DuplicateAccount {
                account_id: "u@x.com".to_string()
            }
        );
        // The first secret is untouched.
        assert!(creds.verify("u@x.com", "key1").is_ok());
    }

    #[test]
    fn test_verify_requires_exact_match() {
        let (creds, _) = credential_store();
        creds.register("u@x.com", "key1").unwrap();

        assert_eq!(
            creds.verify("u@x.com", "KEY1").unwrap_err(),
            MyflixError::InvalidCredentials
        );
        assert_eq!(
            creds.verify("v@x.com", "key1").unwrap_err(),
            MyflixError::InvalidCredentials
        );
    }

    #[test]
    fn test_wire_format() {
        let (creds, memory) = credential_store();
        creds.register("u@x.com", "key1").unwrap();
        assert_eq!(
            memory.get("users").unwrap().as_deref(),
            Some(r#"[{"id":"u@x.com","password":"key1"}]"#)
        );
    }

    #[test]
    fn test_corrupted_user_list_is_treated_as_empty() {
        let (creds, memory) = credential_store();
        memory.set("users", "[{").unwrap();

        assert!(!creds.contains("u@x.com").unwrap());
        creds.register("u@x.com", "key1").unwrap();
        assert!(creds.verify("u@x.com", "key1").is_ok());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let record = CredentialRecord {
            account_id: "u@x.com".to_string(),
            secret: "key1".to_string(),
        };
        assert!(!format!("{:?}", record).contains("key1"));
    }
}
