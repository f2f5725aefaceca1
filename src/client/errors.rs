//! Failure and domain-error types for the verb surface.
//!
//! Failures have two representations. [`RequestFailure`] is the raw,
//! untranslated failure produced by the dispatcher: it records what actually
//! happened on the wire. The domain error is what callers receive; it is
//! built by the configured [`ErrorFactory`] from the status code extracted
//! out of the raw failure, and defaults to [`ApiError`] with a fixed
//! status-to-message table.
//!
//! # Example
//!
//! ```rust
//! use restbase::ApiError;
//!
//! let error = ApiError::from_status(Some(404));
//! assert_eq!(error.message, "Not found");
//!
//! let error = ApiError::from_status(None);
//! assert_eq!(error.message, "Unexpected error occured");
//! ```

use serde::Serialize;
use thiserror::Error;

/// A raw request failure, before translation into a domain error.
///
/// The dispatcher funnels every failure through a single point, classified
/// into three variants. The configured error hook receives a reference to
/// this value; the error factory receives only the extracted status code.
#[derive(Debug, Error)]
pub enum RequestFailure {
    /// No response was obtained from the transport.
    #[error("transport error: {source}")]
    Transport {
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success status.
    #[error("endpoint answered with status {status}")]
    Status {
        /// The HTTP status code of the response.
        status: u16,
        /// The decoded response body, or `Null` when it was not valid JSON.
        body: serde_json::Value,
    },

    /// The response body was not valid JSON.
    #[error("response body was not valid JSON: {source}")]
    Decode {
        /// The HTTP status code of the response.
        status: u16,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },
}

impl RequestFailure {
    /// Extracts the HTTP status code, when the failure carries a response.
    ///
    /// Returns `None` for transport failures: no response was obtained, so
    /// there is no status to report.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Transport { .. } => None,
            Self::Status { status, .. } | Self::Decode { status, .. } => Some(*status),
        }
    }
}

// Verify RequestFailure is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RequestFailure>();
};

/// Builds the domain error returned by the verb surface.
///
/// The factory is the seam between this crate and the caller's error
/// vocabulary: it receives the optional HTTP status code extracted from a
/// [`RequestFailure`] and constructs whatever error type the caller wants
/// to handle. Plain closures and functions implement it directly.
///
/// # Example
///
/// ```rust
/// use restbase::ErrorFactory;
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("order request failed")]
/// struct OrderError(Option<u16>);
///
/// let factory = |status: Option<u16>| OrderError(status);
/// assert_eq!(factory.build(Some(500)).0, Some(500));
/// ```
pub trait ErrorFactory: Send + Sync {
    /// The domain error this factory produces.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the domain error for an optional HTTP status code.
    fn build(&self, status: Option<u16>) -> Self::Error;
}

impl<E, F> ErrorFactory for F
where
    F: Fn(Option<u16>) -> E + Send + Sync,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    fn build(&self, status: Option<u16>) -> Self::Error {
        self(status)
    }
}

/// The default domain error.
///
/// Carries the optional HTTP status code of the failed request and a fixed
/// human-readable message derived from it. [`ApiErrorFactory`] produces this
/// type when no custom factory is configured.
///
/// # Message Table
///
/// | Status      | Message                    |
/// |-------------|----------------------------|
/// | 400         | `Bad request`              |
/// | 401         | `Not authorized`           |
/// | 403         | `Forbidden`                |
/// | 404         | `Not found`                |
/// | 408         | `Time Out`                 |
/// | 500         | `Server Down`              |
/// | other, none | `Unexpected error occured` |
///
/// # Example
///
/// ```rust
/// use restbase::ApiError;
///
/// let error = ApiError::from_status(Some(401));
/// assert_eq!(error.status, Some(401));
/// assert_eq!(error.to_string(), "Not authorized");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct ApiError {
    /// The HTTP status code of the failed request, if a response was obtained.
    pub status: Option<u16>,
    /// Human-readable message from the fixed table.
    pub message: String,
}

impl ApiError {
    /// Builds the error for an optional status code using the fixed table.
    #[must_use]
    pub fn from_status(status: Option<u16>) -> Self {
        Self {
            status,
            message: Self::status_message(status).to_string(),
        }
    }

    /// Returns the table message for an optional status code.
    #[must_use]
    pub const fn status_message(status: Option<u16>) -> &'static str {
        match status {
            Some(400) => "Bad request",
            Some(401) => "Not authorized",
            Some(403) => "Forbidden",
            Some(404) => "Not found",
            Some(408) => "Time Out",
            Some(500) => "Server Down",
            _ => "Unexpected error occured",
        }
    }
}

/// The default error factory, producing [`ApiError`] values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApiErrorFactory;

impl ErrorFactory for ApiErrorFactory {
    type Error = ApiError;

    fn build(&self, status: Option<u16>) -> Self::Error {
        ApiError::from_status(status)
    }
}
