//! Error types for client configuration.
//!
//! This module contains error types used for configuration and validation
//! failures. Request-time failures are a separate concern and live in
//! [`crate::client`], where they are translated into the caller's domain
//! error type.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use restbase::{AuthToken, ConfigError};
//!
//! let result = AuthToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAuthToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while building a resource configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Auth token cannot be empty.
    #[error("Auth token cannot be empty. Omit the token instead of passing an empty string.")]
    EmptyAuthToken,

    /// Endpoint URL cannot be empty.
    #[error("Endpoint URL cannot be empty. Please provide the base URL of the resource collection.")]
    EmptyEndpointUrl,

    /// The header set has no content-type entry.
    #[error("Header set has no content-type entry. Every request must declare a content type.")]
    MissingContentType,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
