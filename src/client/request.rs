//! Request-side input types for the verb surface.
//!
//! This module provides the [`HttpMethod`] verb enum and the tagged
//! [`ResourceId`] and [`Selector`] types. Tagging makes dispatch inputs
//! explicit: instead of inspecting an argument at runtime, callers (or the
//! `From` conversions) say up front whether a request addresses the whole
//! collection, a single resource, or a raw suffix.

use std::fmt;

/// HTTP methods used by the verb surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A resource identifier accepted by `get`, `update`, and `delete`.
///
/// One coercion rule applies everywhere an id is accepted: a string that
/// parses as a non-negative integer is numeric and renders as a `/{id}` path
/// segment, so `"42"` and `42` behave identically. Anything else is opaque
/// and is appended to the endpoint URL verbatim, with no slash injected.
/// Note that coercion goes through the numeric value, so a zero-padded form
/// like `"007"` renders as `/7`.
///
/// # Example
///
/// ```rust
/// use restbase::ResourceId;
///
/// assert_eq!(ResourceId::from(42u64), ResourceId::Numeric(42));
/// assert_eq!(ResourceId::from("42"), ResourceId::Numeric(42));
/// assert_eq!(
///     ResourceId::from("current"),
///     ResourceId::Raw("current".to_string())
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResourceId {
    /// A numeric id, rendered as a `/{id}` path segment.
    Numeric(u64),
    /// An opaque id, appended to the endpoint URL verbatim.
    Raw(String),
}

impl ResourceId {
    /// Renders the string appended to the endpoint URL.
    pub(crate) fn to_suffix(&self) -> String {
        match self {
            Self::Numeric(id) => format!("/{id}"),
            Self::Raw(raw) => raw.clone(),
        }
    }
}

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        Self::Numeric(id)
    }
}

impl From<u32> for ResourceId {
    fn from(id: u32) -> Self {
        Self::Numeric(u64::from(id))
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        id.parse::<u64>()
            .map_or_else(|_| Self::Raw(id.to_string()), Self::Numeric)
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        id.parse::<u64>().map_or(Self::Raw(id), Self::Numeric)
    }
}

/// What a `get` request addresses.
///
/// `get` has exactly one optional argument worth of shapes, expressed as a
/// sum type so dispatch is exhaustive:
///
/// - [`Selector::All`]: list semantics, GET against the bare endpoint URL
/// - [`Selector::One`]: a single resource or a raw suffix such as a
///   pre-built query string
///
/// # Example
///
/// ```rust
/// use restbase::{ResourceId, Selector};
///
/// assert_eq!(Selector::from(42u64), Selector::One(ResourceId::Numeric(42)));
/// assert_eq!(
///     Selector::from("?name=Ada"),
///     Selector::One(ResourceId::Raw("?name=Ada".to_string()))
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    /// List semantics: GET against the bare endpoint URL.
    All,
    /// One resource, or a raw suffix appended verbatim.
    One(ResourceId),
}

impl Selector {
    /// Renders the string appended to the endpoint URL.
    pub(crate) fn to_suffix(&self) -> String {
        match self {
            Self::All => String::new(),
            Self::One(id) => id.to_suffix(),
        }
    }
}

impl From<ResourceId> for Selector {
    fn from(id: ResourceId) -> Self {
        Self::One(id)
    }
}

impl From<u64> for Selector {
    fn from(id: u64) -> Self {
        Self::One(ResourceId::from(id))
    }
}

impl From<u32> for Selector {
    fn from(id: u32) -> Self {
        Self::One(ResourceId::from(id))
    }
}

impl From<&str> for Selector {
    fn from(id: &str) -> Self {
        Self::One(ResourceId::from(id))
    }
}

impl From<String> for Selector {
    fn from(id: String) -> Self {
        Self::One(ResourceId::from(id))
    }
}
