//! Error types for the Myflix catalog layer.

use thiserror::Error;

/// A shared error type for the entire Myflix workspace.
///
/// Authentication, quota and upstream failures carry enough context to build
/// a user-facing message via [`MyflixError::user_message`]. Storage corruption
/// (`MalformedStoredData`) is produced by the JSON helpers in
/// [`crate::storage`] and is always recovered by the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MyflixError {
    /// Registration attempted with an account id that already exists.
    #[error("Account already registered: {account_id}")]
    DuplicateAccount { account_id: String },

    /// Account id is not a well-formed e-mail address.
    #[error("Invalid account id: {account_id}")]
    InvalidAccountId { account_id: String },

    /// No credential record matches the given id and secret.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The account already owns the maximum number of profiles.
    #[error("Profile limit reached (max {max})")]
    LimitReached { max: usize },

    /// A persisted value could not be decoded.
    #[error("Malformed stored data under '{key}': {message}")]
    MalformedStoredData { key: String, message: String },

    /// A catalog query was attempted without an authenticated session.
    #[error("Missing credential: no authenticated session")]
    MissingCredential,

    /// The metadata service failed or returned an unusable response.
    #[error("Upstream fetch failure: {0}")]
    UpstreamFetchFailure(String),

    /// The issuing consumer went away before the result arrived.
    #[error("Operation cancelled")]
    Cancelled,

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Key-value storage backend failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MyflixError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an UpstreamFetchFailure error
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::UpstreamFetchFailure(message.into())
    }

    /// Creates a MalformedStoredData error
    pub fn malformed(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedStoredData {
            key: key.into(),
            message: message.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub fn is_limit_reached(&self) -> bool {
        matches!(self, Self::LimitReached { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedStoredData { .. })
    }

    /// Human-readable reason suitable for direct display in the UI.
    pub fn user_message(&self) -> String {
        match self {
            Self::DuplicateAccount { .. } => "이미 가입된 이메일입니다.".to_string(),
            Self::InvalidAccountId { .. } => "올바른 이메일 형식이 아닙니다.".to_string(),
            Self::InvalidCredentials => "이메일 또는 비밀번호가 올바르지 않습니다.".to_string(),
            Self::LimitReached { max } => format!("프로필은 최대 {}개까지 만들 수 있습니다.", max),
            Self::MissingCredential => {
                "TMDb API 키가 없습니다. 로그인 후 다시 시도해주세요.".to_string()
            }
            Self::UpstreamFetchFailure(_) => {
                "영화 정보를 불러오지 못했습니다. 잠시 후 다시 시도해 주세요.".to_string()
            }
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for MyflixError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for MyflixError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for MyflixError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for MyflixError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, MyflixError>`.
pub type Result<T> = std::result::Result<T, MyflixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_for_auth_errors() {
        let err = MyflixError::DuplicateAccount {
            account_id: "u@x.com".to_string(),
        };
        assert_eq!(err.user_message(), "이미 가입된 이메일입니다.");
        assert_eq!(
            MyflixError::LimitReached { max: 2 }.user_message(),
            "프로필은 최대 2개까지 만들 수 있습니다."
        );
    }

    #[test]
    fn test_user_message_falls_back_to_display() {
        let err = MyflixError::storage("disk full");
        assert_eq!(err.user_message(), "Storage error: disk full");
    }

    #[test]
    fn test_json_error_conversion() {
        let parse: std::result::Result<Vec<u32>, _> = serde_json::from_str("{oops");
        let err: MyflixError = parse.unwrap_err().into();
        assert!(matches!(err, MyflixError::Serialization { ref format, .. } if format == "JSON"));
    }
}
