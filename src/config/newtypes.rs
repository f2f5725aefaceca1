//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated bearer token for request authorization.
///
/// This newtype ensures the token is non-empty and masks its value in debug
/// output to prevent accidental exposure in logs. When a token is configured,
/// every dispatched request carries an `Authorization: Bearer <token>` header
/// derived from the current value.
///
/// # Security
///
/// The `Debug` implementation masks the token value, displaying only
/// `AuthToken(*****)` instead of the actual credential.
///
/// # Example
///
/// ```rust
/// use restbase::AuthToken;
///
/// let token = AuthToken::new("my-token").unwrap();
/// assert_eq!(format!("{:?}", token), "AuthToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Creates a new validated auth token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAuthToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::EmptyAuthToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AuthToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(*****)")
    }
}
