//! Configuration types for resource clients.
//!
//! This module provides the per-resource configuration consumed by
//! [`ResourceClient`](crate::ResourceClient). One configuration describes one
//! remote resource collection: where it lives, which headers every request
//! carries, how failures become domain errors, and how search queries are
//! built.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ResourceConfig`]: The per-resource configuration value
//! - [`ResourceConfigBuilder`]: A builder for constructing [`ResourceConfig`] instances
//! - [`AuthToken`]: A validated bearer token newtype with masked debug output
//!
//! # Example
//!
//! ```rust
//! use restbase::{AuthToken, ResourceConfig};
//!
//! let config = ResourceConfig::builder()
//!     .endpoint_url("https://example.com/api/users")
//!     .auth_token(AuthToken::new("my-token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.endpoint_url(), "https://example.com/api/users");
//! ```

mod newtypes;

pub use newtypes::AuthToken;

use std::collections::HashMap;
use std::fmt;

use crate::client::{ApiErrorFactory, ErrorFactory, QueryFilter, RequestFailure};
use crate::error::ConfigError;

/// Header name every configuration must carry an entry for.
const CONTENT_TYPE: &str = "content-type";

/// Callback receiving the raw failure before it is translated.
type ErrorHookFn = Box<dyn Fn(&RequestFailure) + Send + Sync>;

/// Full override for search-query construction.
type SearchBuilderFn = Box<dyn Fn(&QueryFilter) -> String + Send + Sync>;

/// Configuration for one resource client.
///
/// This struct holds everything a [`ResourceClient`](crate::ResourceClient)
/// needs to talk to one resource collection: the base endpoint URL, the
/// default header set, an optional bearer token, the error factory that
/// builds the caller's domain error, an optional hook observing raw
/// failures, and an optional override for search-query construction.
///
/// # Ownership
///
/// A configuration is owned by exactly one client. It is moved into
/// [`ResourceClient::new`](crate::ResourceClient::new) and mutated only
/// through the client's `&mut self` setters, so exclusive access is enforced
/// by the borrow checker. It is deliberately not `Clone`; build a fresh
/// configuration per client instead.
///
/// # Example
///
/// ```rust
/// use restbase::ResourceConfig;
///
/// let config = ResourceConfig::builder()
///     .endpoint_url("https://example.com/api/users")
///     .header("x-request-source", "backoffice")
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     config.headers().get("content-type").map(String::as_str),
///     Some("application/json")
/// );
/// ```
pub struct ResourceConfig<F = ApiErrorFactory> {
    pub(crate) endpoint_url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) auth_token: Option<AuthToken>,
    pub(crate) error_factory: F,
    pub(crate) error_hook: Option<ErrorHookFn>,
    pub(crate) search_builder: Option<SearchBuilderFn>,
}

impl ResourceConfig {
    /// Creates a new builder for constructing a `ResourceConfig`.
    ///
    /// The builder starts with `content-type: application/json` in the header
    /// set and the default [`ApiErrorFactory`] producing
    /// [`ApiError`](crate::ApiError) values.
    ///
    /// # Example
    ///
    /// ```rust
    /// use restbase::ResourceConfig;
    ///
    /// let config = ResourceConfig::builder()
    ///     .endpoint_url("https://example.com/api/orders")
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use]
    pub fn builder() -> ResourceConfigBuilder {
        ResourceConfigBuilder::new()
    }
}

impl<F> ResourceConfig<F> {
    /// Returns the base endpoint URL.
    #[must_use]
    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    /// Returns the default header set sent with every request.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Returns the configured auth token, if any.
    #[must_use]
    pub const fn auth_token(&self) -> Option<&AuthToken> {
        self.auth_token.as_ref()
    }
}

impl<F> fmt::Debug for ResourceConfig<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceConfig")
            .field("endpoint_url", &self.endpoint_url)
            .field("headers", &self.headers)
            .field("auth_token", &self.auth_token)
            .field("error_hook", &self.error_hook.is_some())
            .field("search_builder", &self.search_builder.is_some())
            .finish_non_exhaustive()
    }
}

// Verify ResourceConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceConfig>();
};

/// Builder for constructing [`ResourceConfig`] instances.
///
/// This builder provides a fluent API for configuring a resource client. The
/// only required field is `endpoint_url`. All other fields have defaults.
///
/// # Defaults
///
/// - `headers`: `content-type: application/json`
/// - `auth_token`: `None`
/// - `error_factory`: [`ApiErrorFactory`], producing [`ApiError`](crate::ApiError)
/// - `error_hook`: `None`
/// - `search_builder`: `None` (queries come from
///   [`QueryFilter::to_query_string`])
///
/// # Example
///
/// ```rust
/// use restbase::{AuthToken, ResourceConfig};
///
/// let config = ResourceConfig::builder()
///     .endpoint_url("https://example.com/api/users")
///     .auth_token(AuthToken::new("my-token").unwrap())
///     .error_hook(|failure| eprintln!("request failed: {failure}"))
///     .build()
///     .unwrap();
/// ```
pub struct ResourceConfigBuilder<F = ApiErrorFactory> {
    endpoint_url: Option<String>,
    headers: HashMap<String, String>,
    auth_token: Option<AuthToken>,
    error_factory: F,
    error_hook: Option<ErrorHookFn>,
    search_builder: Option<SearchBuilderFn>,
}

impl ResourceConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        let mut headers = HashMap::new();
        headers.insert(CONTENT_TYPE.to_string(), "application/json".to_string());
        Self {
            endpoint_url: None,
            headers,
            auth_token: None,
            error_factory: ApiErrorFactory,
            error_hook: None,
            search_builder: None,
        }
    }
}

impl Default for ResourceConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> ResourceConfigBuilder<F> {
    /// Sets the base endpoint URL (required).
    ///
    /// The URL is used exactly as given. Suffixes produced by the verb
    /// surface are concatenated onto it without any normalization, so decide
    /// here whether it ends with a slash.
    #[must_use]
    pub fn endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = Some(url.into());
        self
    }

    /// Adds or replaces a single default header entry.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Replaces the entire default header set.
    ///
    /// The replacement must still contain a content-type entry;
    /// [`build`](Self::build) rejects a header set without one.
    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the bearer token used to derive the `Authorization` header.
    #[must_use]
    pub fn auth_token(mut self, token: AuthToken) -> Self {
        self.auth_token = Some(token);
        self
    }

    /// Replaces the error factory, changing the domain error type.
    ///
    /// The factory receives the optional HTTP status code extracted from the
    /// raw failure and builds the error the verb surface returns. Plain
    /// closures work; annotate the parameter so the closure's signature is
    /// known where it is defined.
    ///
    /// # Example
    ///
    /// ```rust
    /// use restbase::ResourceConfig;
    ///
    /// #[derive(Debug, thiserror::Error)]
    /// #[error("request failed with status {status:?}")]
    /// struct OrderError {
    ///     status: Option<u16>,
    /// }
    ///
    /// let config = ResourceConfig::builder()
    ///     .endpoint_url("https://example.com/api/orders")
    ///     .error_factory(|status: Option<u16>| OrderError { status })
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use]
    pub fn error_factory<G: ErrorFactory>(self, factory: G) -> ResourceConfigBuilder<G> {
        ResourceConfigBuilder {
            endpoint_url: self.endpoint_url,
            headers: self.headers,
            auth_token: self.auth_token,
            error_factory: factory,
            error_hook: self.error_hook,
            search_builder: self.search_builder,
        }
    }

    /// Sets a hook observing every raw failure before translation.
    ///
    /// The hook is invoked exactly once per failed request, before the error
    /// factory runs. It returns nothing and cannot affect propagation; a
    /// panicking hook is a caller bug.
    #[must_use]
    pub fn error_hook(mut self, hook: impl Fn(&RequestFailure) + Send + Sync + 'static) -> Self {
        self.error_hook = Some(Box::new(hook));
        self
    }

    /// Replaces search-query construction entirely.
    ///
    /// The function receives the caller's filter and returns the complete
    /// query string passed to `get`. Use this to prepend fixed filters or to
    /// change the serialization outright.
    ///
    /// # Example
    ///
    /// ```rust
    /// use restbase::ResourceConfig;
    ///
    /// // Every search against this resource filters on active records.
    /// let config = ResourceConfig::builder()
    ///     .endpoint_url("https://example.com/api/users")
    ///     .search_builder(|filter| {
    ///         let mut query = String::from("?active=true");
    ///         for (key, value) in filter.iter() {
    ///             query.push_str(&format!("&{key}={value}"));
    ///         }
    ///         query
    ///     })
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use]
    pub fn search_builder(
        mut self,
        builder: impl Fn(&QueryFilter) -> String + Send + Sync + 'static,
    ) -> Self {
        self.search_builder = Some(Box::new(builder));
        self
    }

    /// Builds the [`ResourceConfig`], validating the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `endpoint_url` was
    /// never set, [`ConfigError::EmptyEndpointUrl`] if it is empty, and
    /// [`ConfigError::MissingContentType`] if the header set lost its
    /// content-type entry.
    pub fn build(self) -> Result<ResourceConfig<F>, ConfigError> {
        let endpoint_url = self.endpoint_url.ok_or(ConfigError::MissingRequiredField {
            field: "endpoint_url",
        })?;
        if endpoint_url.is_empty() {
            return Err(ConfigError::EmptyEndpointUrl);
        }
        if !self
            .headers
            .keys()
            .any(|key| key.eq_ignore_ascii_case(CONTENT_TYPE))
        {
            return Err(ConfigError::MissingContentType);
        }

        Ok(ResourceConfig {
            endpoint_url,
            headers: self.headers,
            auth_token: self.auth_token,
            error_factory: self.error_factory,
            error_hook: self.error_hook,
            search_builder: self.search_builder,
        })
    }
}

impl<F> fmt::Debug for ResourceConfigBuilder<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceConfigBuilder")
            .field("endpoint_url", &self.endpoint_url)
            .field("headers", &self.headers)
            .field("auth_token", &self.auth_token)
            .field("error_hook", &self.error_hook.is_some())
            .field("search_builder", &self.search_builder.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_endpoint_url() {
        let result = ResourceConfigBuilder::new().build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "endpoint_url"
            })
        ));
    }

    #[test]
    fn test_builder_rejects_empty_endpoint_url() {
        let result = ResourceConfig::builder().endpoint_url("").build();
        assert!(matches!(result, Err(ConfigError::EmptyEndpointUrl)));
    }

    #[test]
    fn test_builder_seeds_json_content_type() {
        let config = ResourceConfig::builder()
            .endpoint_url("https://example.com/api/users")
            .build()
            .unwrap();
        assert_eq!(
            config.headers().get("content-type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn test_builder_rejects_header_set_without_content_type() {
        let mut headers = HashMap::new();
        headers.insert("accept".to_string(), "application/json".to_string());
        let result = ResourceConfig::builder()
            .endpoint_url("https://example.com/api/users")
            .headers(headers)
            .build();
        assert!(matches!(result, Err(ConfigError::MissingContentType)));
    }

    #[test]
    fn test_builder_accepts_content_type_in_any_case() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        let result = ResourceConfig::builder()
            .endpoint_url("https://example.com/api/users")
            .headers(headers)
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_builder_header_adds_and_replaces_entries() {
        let config = ResourceConfig::builder()
            .endpoint_url("https://example.com/api/users")
            .header("x-request-source", "backoffice")
            .header("content-type", "application/vnd.api+json")
            .build()
            .unwrap();
        assert_eq!(
            config.headers().get("x-request-source").map(String::as_str),
            Some("backoffice")
        );
        assert_eq!(
            config.headers().get("content-type").map(String::as_str),
            Some("application/vnd.api+json")
        );
    }

    #[test]
    fn test_builder_stores_auth_token() {
        let config = ResourceConfig::builder()
            .endpoint_url("https://example.com/api/users")
            .auth_token(AuthToken::new("my-token").unwrap())
            .build()
            .unwrap();
        assert_eq!(config.auth_token().map(AsRef::as_ref), Some("my-token"));
    }

    #[test]
    fn test_config_debug_masks_token_and_hides_closures() {
        let config = ResourceConfig::builder()
            .endpoint_url("https://example.com/api/users")
            .auth_token(AuthToken::new("super-secret").unwrap())
            .error_hook(|_failure| {})
            .build()
            .unwrap();
        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("super-secret"));
        assert!(debug_output.contains("error_hook: true"));
        assert!(debug_output.contains("search_builder: false"));
    }

    #[test]
    fn test_error_factory_changes_domain_error_type() {
        #[derive(Debug, thiserror::Error)]
        #[error("failed: {status:?}")]
        struct CustomError {
            status: Option<u16>,
        }

        let config = ResourceConfig::builder()
            .endpoint_url("https://example.com/api/users")
            .error_factory(|status: Option<u16>| CustomError { status })
            .build()
            .unwrap();
        let error = config.error_factory.build(Some(404));
        assert_eq!(error.status, Some(404));
    }

    #[test]
    fn test_search_builder_override_is_stored() {
        let config = ResourceConfig::builder()
            .endpoint_url("https://example.com/api/users")
            .search_builder(|_filter| String::from("?active=true"))
            .build()
            .unwrap();
        let filter = QueryFilter::new();
        let built = config.search_builder.as_ref().map(|f| f(&filter));
        assert_eq!(built.as_deref(), Some("?active=true"));
    }
}
