use serde::{Deserialize, Serialize};
use std::fmt;

/// A persisted credential, serialized as `{"id": ..., "password": ...}`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    #[serde(rename = "id")]
    pub account_id: String,
    #[serde(rename = "password")]
    pub secret: String,
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("account_id", &self.account_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Public view of a registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
}

impl From<&CredentialRecord> for Account {
    fn from(record: &CredentialRecord) -> Self {
        Self {
            id: record.account_id.clone(),
        }
    }
}
