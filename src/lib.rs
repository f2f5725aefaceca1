//! # restbase
//!
//! A reusable base client for building typed REST resource APIs, providing
//! per-resource configuration, a uniform CRUD verb surface, and translation
//! of every failure into a caller-chosen domain error type.
//!
//! ## Overview
//!
//! This crate provides:
//! - Per-resource configuration via [`ResourceConfig`] and [`ResourceConfigBuilder`]
//! - A validated [`AuthToken`] newtype with masked debug output
//! - An async CRUD verb surface ([`ResourceClient`]: `get`, `search`,
//!   `create`, `update`, `delete`)
//! - Tagged request inputs ([`Selector`], [`ResourceId`]) with one
//!   numeric-coercion rule shared by every verb
//! - Insertion-ordered search filters via [`QueryFilter`]
//! - Failure translation through an [`ErrorFactory`] seam, with [`ApiError`]
//!   and its fixed status-to-message table as the default
//!
//! ## Quick Start
//!
//! ```rust
//! use restbase::{AuthToken, ResourceClient, ResourceConfig};
//!
//! // Describe one resource collection with the builder pattern
//! let config = ResourceConfig::builder()
//!     .endpoint_url("https://example.com/api/users")
//!     .auth_token(AuthToken::new("your-token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! // One client owns one configuration
//! let client = ResourceClient::new(config);
//! assert_eq!(client.endpoint_url(), "https://example.com/api/users");
//! ```
//!
//! ## Making Requests
//!
//! Every verb performs exactly one HTTP round trip and returns the decoded
//! JSON value verbatim, or the translated domain error:
//!
//! ```rust,ignore
//! use restbase::{QueryFilter, Selector};
//! use serde_json::json;
//!
//! // List, fetch, search
//! let users = client.get(Selector::All).await?;
//! let user = client.get(42u64).await?;
//! let admins = client
//!     .search(&QueryFilter::new().param("role", "admin"))
//!     .await?;
//!
//! // Create, update, delete
//! let created = client.create(json!({"name": "Ada"}), None).await?;
//! let updated = client.update(42u64, json!({"name": "Grace"})).await?;
//! client.delete(42u64).await?;
//! ```
//!
//! ## Custom Domain Errors
//!
//! The error factory decides what callers see when a request fails. The
//! optional error hook observes the raw failure first:
//!
//! ```rust
//! use restbase::ResourceConfig;
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("user service unavailable (status {status:?})")]
//! struct UserServiceError {
//!     status: Option<u16>,
//! }
//!
//! let config = ResourceConfig::builder()
//!     .endpoint_url("https://example.com/api/users")
//!     .error_hook(|failure| eprintln!("request failed: {failure}"))
//!     .error_factory(|status: Option<u16>| UserServiceError { status })
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Resource Specialization
//!
//! Resources specialize the client by configuration, not by subtyping. A
//! search builder, for example, can pin fixed filters in front of whatever
//! the caller asks for:
//!
//! ```rust
//! use restbase::ResourceConfig;
//!
//! // Searches against this resource always filter on active records
//! let config = ResourceConfig::builder()
//!     .endpoint_url("https://example.com/api/users")
//!     .search_builder(|filter| {
//!         let mut query = String::from("?active=true");
//!         for (key, value) in filter.iter() {
//!             query.push_str(&format!("&{key}={value}"));
//!         }
//!         query
//!     })
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Configuration validates on construction
//! - **Composition over inheritance**: Resources specialize by value, not subtype
//! - **One translation point**: Every failure funnels through the error factory
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime

pub mod client;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use config::{AuthToken, ResourceConfig, ResourceConfigBuilder};
pub use error::ConfigError;

// Re-export client types
pub use client::{
    ApiError, ApiErrorFactory, ErrorFactory, HttpMethod, QueryFilter, RequestFailure,
    ResourceClient, ResourceId, Selector,
};
