//! The resource client: verb surface and dispatcher.
//!
//! This module provides [`ResourceClient`], the type consumers interact
//! with. One client wraps one [`ResourceConfig`] and exposes the CRUD verb
//! surface; every verb maps to exactly one HTTP round trip through the
//! private dispatcher, and every failure funnels through one translation
//! point into the configured domain error type.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::client::errors::{ApiErrorFactory, ErrorFactory, RequestFailure};
use crate::client::query::QueryFilter;
use crate::client::request::{HttpMethod, ResourceId, Selector};
use crate::config::{AuthToken, ResourceConfig};

/// An async client for one REST resource collection.
///
/// The client owns its configuration and a shared transport. Verbs return
/// the decoded JSON value verbatim on success; on failure they return the
/// domain error built by the configured [`ErrorFactory`], [`ApiError`]
/// unless replaced.
///
/// [`ApiError`]: crate::ApiError
///
/// # Thread Safety
///
/// `ResourceClient` is `Send + Sync`, making it safe to share across async
/// tasks. The mutators take `&mut self`, so replacing the endpoint URL or
/// the token requires exclusive access.
///
/// # Example
///
/// ```rust,ignore
/// use restbase::{QueryFilter, ResourceConfig, ResourceClient, Selector};
///
/// let config = ResourceConfig::builder()
///     .endpoint_url("https://example.com/api/users")
///     .build()?;
/// let client = ResourceClient::new(config);
///
/// // List the collection, fetch one record, search it.
/// let all = client.get(Selector::All).await?;
/// let one = client.get(42u64).await?;
/// let admins = client.search(&QueryFilter::new().param("role", "admin")).await?;
/// ```
pub struct ResourceClient<F = ApiErrorFactory> {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Per-resource configuration, owned exclusively by this client.
    config: ResourceConfig<F>,
}

// Verify ResourceClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceClient>();
};

impl<F: ErrorFactory> ResourceClient<F> {
    /// Creates a new client owning the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(config: ResourceConfig<F>) -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &ResourceConfig<F> {
        &self.config
    }

    /// Returns the current base endpoint URL.
    #[must_use]
    pub fn endpoint_url(&self) -> &str {
        self.config.endpoint_url()
    }

    /// Returns the default header set sent with every request.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        self.config.headers()
    }

    /// Replaces the base endpoint URL for all subsequent requests.
    ///
    /// The new value is used exactly as given, without validation or
    /// normalization.
    pub fn set_endpoint_url(&mut self, url: impl Into<String>) {
        self.config.endpoint_url = url.into();
    }

    /// Replaces or clears the bearer token for all subsequent requests.
    ///
    /// The `Authorization` header is derived from the current token on every
    /// dispatch, so the replacement takes effect immediately.
    pub fn set_auth_token(&mut self, token: Option<AuthToken>) {
        self.config.auth_token = token;
    }

    /// Retrieves resources.
    ///
    /// [`Selector::All`] lists the collection against the bare endpoint URL.
    /// Numeric ids (and numeric strings) address `<endpoint>/<id>`; any other
    /// string is appended verbatim, which is how a pre-built query string
    /// such as `"?name=Ada"` is dispatched.
    ///
    /// # Errors
    ///
    /// Returns the domain error built by the configured factory when the
    /// request fails at transport level, answers with a non-success status,
    /// or produces a body that is not valid JSON.
    pub async fn get(&self, selector: impl Into<Selector>) -> Result<Value, F::Error> {
        let selector = selector.into();
        self.dispatch(HttpMethod::Get, &selector.to_suffix(), None)
            .await
    }

    /// Searches the collection with the given filter.
    ///
    /// The query string comes from the configured search builder when one is
    /// set, otherwise from [`QueryFilter::to_query_string`]. The request is
    /// then delegated to [`get`](Self::get) with that string, exactly as a
    /// caller would issue it.
    ///
    /// # Errors
    ///
    /// Same failure translation as [`get`](Self::get).
    pub async fn search(&self, filter: &QueryFilter) -> Result<Value, F::Error> {
        let query = match &self.config.search_builder {
            Some(build) => build(filter),
            None => filter.to_query_string(),
        };
        self.get(query).await
    }

    /// Creates a resource with a POST of the given JSON body.
    ///
    /// `query` is an optional extra path or query suffix appended to the
    /// endpoint URL; with `None`, the request targets the bare endpoint.
    ///
    /// # Errors
    ///
    /// Same failure translation as [`get`](Self::get).
    pub async fn create(&self, body: Value, query: Option<&str>) -> Result<Value, F::Error> {
        self.dispatch(HttpMethod::Post, query.unwrap_or(""), Some(&body))
            .await
    }

    /// Updates a resource with a PUT of the given JSON body.
    ///
    /// The id is coerced with the same rule as [`get`](Self::get): numeric
    /// values address `<endpoint>/<id>`, opaque strings are appended
    /// verbatim.
    ///
    /// # Errors
    ///
    /// Same failure translation as [`get`](Self::get).
    pub async fn update(&self, id: impl Into<ResourceId>, body: Value) -> Result<Value, F::Error> {
        let id = id.into();
        self.dispatch(HttpMethod::Put, &id.to_suffix(), Some(&body))
            .await
    }

    /// Deletes a resource. The request carries no body.
    ///
    /// The id is coerced with the same rule as [`get`](Self::get) and
    /// [`update`](Self::update).
    ///
    /// # Errors
    ///
    /// Same failure translation as [`get`](Self::get).
    pub async fn delete(&self, id: impl Into<ResourceId>) -> Result<Value, F::Error> {
        let id = id.into();
        self.dispatch(HttpMethod::Delete, &id.to_suffix(), None)
            .await
    }

    /// Performs one HTTP round trip.
    ///
    /// Success means a 2xx response whose body decoded as JSON; everything
    /// else funnels through [`translate`](Self::translate).
    async fn dispatch(
        &self,
        method: HttpMethod,
        suffix: &str,
        body: Option<&Value>,
    ) -> Result<Value, F::Error> {
        // Suffixes concatenate directly; the endpoint URL decides its own shape.
        let url = format!("{}{}", self.config.endpoint_url, suffix);

        tracing::debug!("Dispatching {} request to {}", method, url);

        // Build the reqwest request
        let mut req_builder = match method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        // Add configured headers
        for (key, value) in &self.config.headers {
            req_builder = req_builder.header(key, value);
        }

        // Derive the bearer header from the current token on every call,
        // so a replaced token takes effect immediately.
        if let Some(token) = &self.config.auth_token {
            req_builder =
                req_builder.header("Authorization", format!("Bearer {}", token.as_ref()));
        }

        // Add body
        if let Some(body) = body {
            req_builder = req_builder.body(body.to_string());
        }

        // Send request
        let response = match req_builder.send().await {
            Ok(response) => response,
            Err(source) => return Err(self.translate(RequestFailure::Transport { source })),
        };

        let status = response.status();
        let code = status.as_u16();
        let text = match response.text().await {
            Ok(text) => text,
            Err(source) => return Err(self.translate(RequestFailure::Transport { source })),
        };

        // Decode unconditionally; non-success bodies are decoded too so the
        // error hook can observe them.
        let decoded = serde_json::from_str::<Value>(&text);

        if !status.is_success() {
            let body = decoded.unwrap_or(Value::Null);
            return Err(self.translate(RequestFailure::Status { status: code, body }));
        }

        match decoded {
            Ok(value) => Ok(value),
            Err(source) => Err(self.translate(RequestFailure::Decode {
                status: code,
                source,
            })),
        }
    }

    /// Translates a raw failure into the caller's domain error.
    ///
    /// The error hook, if configured, observes the raw failure exactly once
    /// before the factory runs.
    fn translate(&self, failure: RequestFailure) -> F::Error {
        tracing::debug!(
            "Translating request failure with status {:?}: {}",
            failure.status_code(),
            failure
        );

        if let Some(hook) = &self.config.error_hook {
            hook(&failure);
        }

        self.config.error_factory.build(failure.status_code())
    }
}

impl<F> fmt::Debug for ResourceClient<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(endpoint_url: impl Into<String>) -> ResourceClient {
        let config = ResourceConfig::builder()
            .endpoint_url(endpoint_url)
            .build()
            .unwrap();
        ResourceClient::new(config)
    }

    #[tokio::test]
    async fn test_get_all_hits_bare_endpoint() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
            .mount(&mock_server)
            .await;

        let client = client_for(format!("{}/api/users", mock_server.uri()));
        let value = client.get(Selector::All).await.unwrap();

        assert_eq!(value, json!([{"id": 1}]));
    }

    #[tokio::test]
    async fn test_get_numeric_id_addresses_path_segment() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 42})))
            .mount(&mock_server)
            .await;

        let client = client_for(format!("{}/api/users", mock_server.uri()));

        // A number and a numeric string dispatch identically.
        let by_number = client.get(42u64).await.unwrap();
        let by_string = client.get("42").await.unwrap();

        assert_eq!(by_number, json!({"id": 42}));
        assert_eq!(by_string, json!({"id": 42}));
    }

    #[tokio::test]
    async fn test_get_raw_query_passes_verbatim() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .and(query_param("name", "Ada"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "Ada"}])))
            .mount(&mock_server)
            .await;

        let client = client_for(format!("{}/api/users", mock_server.uri()));
        let value = client.get("?name=Ada").await.unwrap();

        assert_eq!(value, json!([{"name": "Ada"}]));
    }

    #[tokio::test]
    async fn test_create_posts_body_to_bare_endpoint() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/users"))
            .and(body_json(json!({"name": "Ada"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "Ada"})))
            .mount(&mock_server)
            .await;

        let client = client_for(format!("{}/api/users", mock_server.uri()));
        let value = client.create(json!({"name": "Ada"}), None).await.unwrap();

        assert_eq!(value, json!({"id": 1, "name": "Ada"}));
    }

    #[tokio::test]
    async fn test_update_puts_body_to_id_path() {
        let mock_server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/users/5"))
            .and(body_json(json!({"name": "Grace"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 5})))
            .mount(&mock_server)
            .await;

        let client = client_for(format!("{}/api/users", mock_server.uri()));
        let value = client.update(5u64, json!({"name": "Grace"})).await.unwrap();

        assert_eq!(value, json!({"id": 5}));
    }

    #[tokio::test]
    async fn test_delete_issues_request_without_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/users/7"))
            .and(body_string(""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&mock_server)
            .await;

        let client = client_for(format!("{}/api/users", mock_server.uri()));
        let value = client.delete(7u64).await.unwrap();

        assert_eq!(value, json!({}));
    }

    #[tokio::test]
    async fn test_configured_headers_are_sent() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .and(header("content-type", "application/json"))
            .and(header("x-request-source", "backoffice"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;

        let config = ResourceConfig::builder()
            .endpoint_url(format!("{}/api/users", mock_server.uri()))
            .header("x-request-source", "backoffice")
            .build()
            .unwrap();
        let client = ResourceClient::new(config);

        let value = client.get(Selector::All).await.unwrap();
        assert_eq!(value, json!([]));
    }

    #[tokio::test]
    async fn test_bearer_header_follows_current_token() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .and(header("authorization", "Bearer rotated-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;

        let config = ResourceConfig::builder()
            .endpoint_url(format!("{}/api/users", mock_server.uri()))
            .auth_token(AuthToken::new("initial-token").unwrap())
            .build()
            .unwrap();
        let mut client = ResourceClient::new(config);

        // The initial token does not match the mock, so the request comes
        // back as an unmatched 404.
        let error = client.get(Selector::All).await.unwrap_err();
        assert_eq!(error.status, Some(404));

        client.set_auth_token(Some(AuthToken::new("rotated-token").unwrap()));
        let value = client.get(Selector::All).await.unwrap();
        assert_eq!(value, json!([]));
    }

    #[tokio::test]
    async fn test_set_endpoint_url_redirects_requests() {
        let first = MockServer::start().await;
        let second = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"from": "first"})))
            .mount(&first)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/members"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"from": "second"})))
            .mount(&second)
            .await;

        let mut client = client_for(format!("{}/api/users", first.uri()));
        assert_eq!(
            client.get(Selector::All).await.unwrap(),
            json!({"from": "first"})
        );

        client.set_endpoint_url(format!("{}/api/members", second.uri()));
        assert_eq!(
            client.get(Selector::All).await.unwrap(),
            json!({"from": "second"})
        );
    }

    #[tokio::test]
    async fn test_non_success_status_becomes_domain_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/99"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "missing"})))
            .mount(&mock_server)
            .await;

        let client = client_for(format!("{}/api/users", mock_server.uri()));
        let error = client.get(99u64).await.unwrap_err();

        assert_eq!(error.status, Some(404));
        assert_eq!(error.message, "Not found");
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_domain_error_without_status() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();
        drop(mock_server);

        let client = client_for(format!("{uri}/api/users"));
        let error = client.get(Selector::All).await.unwrap_err();

        assert_eq!(error.status, None);
        assert_eq!(error.message, "Unexpected error occured");
    }

    #[tokio::test]
    async fn test_invalid_json_body_becomes_decode_failure() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(format!("{}/api/users", mock_server.uri()));
        let error = client.get(Selector::All).await.unwrap_err();

        // The response was obtained, so its status code is preserved.
        assert_eq!(error.status, Some(200));
        assert_eq!(error.message, "Unexpected error occured");
    }

    #[tokio::test]
    async fn test_empty_success_body_becomes_decode_failure() {
        let mock_server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/users/7"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let client = client_for(format!("{}/api/users", mock_server.uri()));
        let error = client.delete(7u64).await.unwrap_err();

        assert_eq!(error.status, Some(204));
        assert_eq!(error.message, "Unexpected error occured");
    }
}
