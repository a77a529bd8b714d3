use serde::{Deserialize, Serialize};

/// Who is signed in, if anyone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub authenticated: bool,
    pub account_id: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn for_account(account_id: impl Into<String>) -> Self {
        Self {
            authenticated: true,
            account_id: Some(account_id.into()),
        }
    }

    /// The account id, only when authenticated.
    pub fn active_account(&self) -> Option<&str> {
        if self.authenticated {
            self.account_id.as_deref()
        } else {
            None
        }
    }
}
