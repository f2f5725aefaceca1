//! Client types for REST resource communication.
//!
//! This module provides the client layer for talking to one REST resource
//! collection: the verb surface, the request input types, search-query
//! construction, and the failure/domain-error machinery.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ResourceClient`]: The async client exposing the CRUD verb surface
//! - [`Selector`] and [`ResourceId`]: Tagged request inputs with one
//!   numeric-coercion rule
//! - [`QueryFilter`]: Insertion-ordered search filters
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`RequestFailure`]: The raw failure observed by error hooks
//! - [`ErrorFactory`]: The seam building the caller's domain error
//! - [`ApiError`] and [`ApiErrorFactory`]: The default error type and factory
//!
//! # Example
//!
//! ```rust,ignore
//! use restbase::{ResourceClient, ResourceConfig, Selector};
//!
//! let config = ResourceConfig::builder()
//!     .endpoint_url("https://example.com/api/users")
//!     .build()?;
//! let client = ResourceClient::new(config);
//!
//! let users = client.get(Selector::All).await?;
//! ```

mod errors;
mod query;
mod request;
mod resource_client;

pub use errors::{ApiError, ApiErrorFactory, ErrorFactory, RequestFailure};
pub use query::QueryFilter;
pub use request::{HttpMethod, ResourceId, Selector};
pub use resource_client::ResourceClient;
