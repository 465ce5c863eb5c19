//! Error types for taxonomy loading

use std::path::PathBuf;

/// Errors while building a taxonomy from a document
#[derive(Debug, thiserror::Error)]
pub enum TaxonomyError {
    /// Document is not valid JSON or has the wrong shape
    #[error("invalid taxonomy document: {0}")]
    Decode(#[from] serde_json::Error),

    /// A taxon document has no content id
    #[error("taxon without content_id (base_path: {})", base_path.as_deref().unwrap_or("unknown"))]
    MissingContentId {
        /// Base path of the offending document, when present
        base_path: Option<String>,
    },

    /// Taxonomy file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl TaxonomyError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
