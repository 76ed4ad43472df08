//! Session: the bearer token and the credentials that obtain it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Key under which the session token is persisted client-side.
pub const TOKEN_STORAGE_KEY: &str = "access_token";

/// Opaque bearer credential attached to every authenticated request.
///
/// `Debug` never prints the token itself.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a raw token string read from storage.
    ///
    /// Returns `None` for blank input so an empty stored value counts as
    /// "no session".
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Body of a successful `POST /token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: SessionToken,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

/// Username and password submitted by the login form.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Build credentials, trimming the username.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyUsername`] or
    /// [`ValidationError::EmptyPassword`] when either field is empty.
    pub fn new(username: &str, password: &str) -> Result<Self, ValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(ValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_treat_blank_token_as_absent() {
        assert!(SessionToken::parse("").is_none());
        assert!(SessionToken::parse("   \n").is_none());
    }

    #[test]
    fn should_build_bearer_header_value() {
        let token = SessionToken::parse("abc.def\n").unwrap();
        assert_eq!(token.bearer(), "Bearer abc.def");
    }

    #[test]
    fn should_redact_token_in_debug_output() {
        let token = SessionToken::parse("secret").unwrap();
        assert_eq!(format!("{token:?}"), "SessionToken(***)");
    }

    #[test]
    fn should_default_token_type_to_bearer() {
        let resp: TokenResponse = serde_json::from_str(r#"{"access_token":"xyz"}"#).unwrap();
        assert_eq!(resp.access_token.as_str(), "xyz");
        assert_eq!(resp.token_type, "bearer");
    }

    #[test]
    fn should_trim_username() {
        let creds = Credentials::new("  user1 ", "pw").unwrap();
        assert_eq!(creds.username(), "user1");
        assert_eq!(creds.password(), "pw");
    }

    #[test]
    fn should_reject_empty_username() {
        assert_eq!(
            Credentials::new("  ", "pw"),
            Err(ValidationError::EmptyUsername)
        );
    }

    #[test]
    fn should_reject_empty_password() {
        assert_eq!(
            Credentials::new("user1", ""),
            Err(ValidationError::EmptyPassword)
        );
    }

    #[test]
    fn should_redact_password_in_debug_output() {
        let creds = Credentials::new("user1", "hunter2").unwrap();
        let debug = format!("{creds:?}");
        assert!(debug.contains("user1"));
        assert!(!debug.contains("hunter2"));
    }
}
