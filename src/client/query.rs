//! Search-query construction.
//!
//! This module provides [`QueryFilter`], an insertion-ordered key/value
//! filter serialized into the query-string shape the verb surface appends to
//! the endpoint URL.

/// An insertion-ordered filter for search requests.
///
/// Keys keep the position of their first insertion; re-inserting a key
/// replaces its value in place. Serialization emits keys and values
/// verbatim, with no percent-encoding; callers own any escaping their
/// endpoint requires.
///
/// # Example
///
/// ```rust
/// use restbase::QueryFilter;
///
/// let filter = QueryFilter::new()
///     .param("name", "Ada")
///     .param("role", "admin");
///
/// assert_eq!(filter.to_query_string(), "?name=Ada&role=admin");
/// assert_eq!(QueryFilter::new().to_query_string(), "?");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryFilter {
    pairs: Vec<(String, String)>,
}

impl QueryFilter {
    /// Creates an empty filter.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Adds a key/value pair, consuming and returning the filter for
    /// builder-style chaining.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds a key/value pair in place.
    ///
    /// If the key is already present its value is replaced and the key keeps
    /// its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.pairs.iter_mut().find(|(existing, _)| *existing == key) {
            entry.1 = value;
        } else {
            self.pairs.push((key, value));
        }
    }

    /// Returns the number of pairs in the filter.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if the filter holds no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates over the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Serializes the filter as a query string.
    ///
    /// The output is `"?"` followed by `key=value` pairs joined by `"&"`, in
    /// insertion order, with no trailing separator. An empty filter
    /// serializes to exactly `"?"`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut query = String::from("?");
        for (index, (key, value)) in self.pairs.iter().enumerate() {
            if index > 0 {
                query.push('&');
            }
            query.push_str(key);
            query.push('=');
            query.push_str(value);
        }
        query
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryFilter {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filter = Self::new();
        for (key, value) in iter {
            filter.insert(key, value);
        }
        filter
    }
}
