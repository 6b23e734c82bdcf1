//! Newtype IDs for type-safe entity references.
//!
//! Backend identifiers are opaque strings (the REST API serves them as the
//! `_id` field), so the wrapper is string-backed rather than numeric.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A product identifier as issued by the backend.
///
/// Wrapping the raw string prevents accidentally mixing product ids with
/// other string-typed fields such as slugs or variant labels.
///
/// # Example
///
/// ```
/// use vanilla_grove_core::ProductId;
///
/// let id = ProductId::new("64f2a9c1d8b3e4f5a6b7c8d9");
/// assert_eq!(id.as_str(), "64f2a9c1d8b3e4f5a6b7c8d9");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new product ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ProductId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
