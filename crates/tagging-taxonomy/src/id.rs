//! Taxon identifiers
//!
//! Provides [`TaxonId`], the opaque content identifier of a taxon.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};

/// Stable content identifier of a taxon
///
/// Opaque to this crate: no format is enforced, so identifiers that are not
/// known to any taxonomy (deleted or malformed ids) can still be carried
/// through a selection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxonId(String);

impl TaxonId {
    /// Create new identifier
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get identifier as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner string
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for TaxonId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaxonId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TaxonId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for TaxonId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets `HashSet<TaxonId>` / `IndexSet<TaxonId>` be queried with `&str`.
impl Borrow<str> for TaxonId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
