//! Tagging Core - taxon selection reconciliation
//!
//! Ties the taxonomy and the link store together:
//! - Loads a content item's selected taxons and link-set version
//! - Classifies the selection as published, visible draft or invisible draft
//! - Publishes the most specific taxons under optimistic concurrency
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tagging_core::{FileTaxonomySource, Tagger, TaxonomySource};
//! use tagging_links::{PublishingApiClient, PublishingApiConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = PublishingApiClient::new(&PublishingApiConfig::default())?;
//! let tagger = Tagger::new(Arc::new(store));
//! let taxonomy = FileTaxonomySource::new("taxonomy.json").load_taxonomy().await?;
//!
//! let mut reconciler = tagger.load_reconciler("64aadc14-9bca-40d9-abb6-4f21f9792a05", taxonomy).await?;
//! println!("invisible: {:?}", reconciler.invisible_draft_taxons());
//!
//! reconciler.select("c58fdadd-7743-46d6-9629-90bb3ccc4ef0");
//! match tagger.publish(&reconciler).await {
//!     Err(e) if e.is_conflict() => println!("changed by someone else, reload"),
//!     other => { other?; }
//! }
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod logging;
pub mod reconciler;
pub mod selection;
pub mod source;
pub mod tagger;

// Re-exports for convenience
pub use config::{ConfigError, TaggingConfig};
pub use error::TaggingError;
pub use reconciler::{Reconciler, TaxonClassification};
pub use selection::SelectionState;
pub use source::{FileTaxonomySource, StaticTaxonomySource, TaxonomySource};
pub use tagger::{PublishReceipt, Tagger};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for tagging content
    pub use crate::{
        PublishReceipt, Reconciler, SelectionState, Tagger, TaggingError, TaxonClassification,
        TaxonomySource,
    };
    pub use tagging_links::{LinkStore, LinkStoreError};
    pub use tagging_taxonomy::{TaxonId, TaxonNode, Taxonomy};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
