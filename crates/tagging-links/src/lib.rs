//! Taxon link stores
//!
//! The external service that holds, per content item, a versioned list of
//! tagged taxon ids.
//!
//! # Core Concepts
//!
//! - [`LinkStore`]: Async seam for reading and conditionally replacing links
//! - [`LinkStoreError`]: Not-found, version-conflict and upstream failures
//! - [`InMemoryLinkStore`]: Process-local store with the same versioning rules
//! - [`PublishingApiClient`]: HTTP client for the publishing API
//!
//! # Example
//!
//! ```rust,ignore
//! use tagging_links::{LinkStore, PublishingApiClient, PublishingApiConfig};
//!
//! let client = PublishingApiClient::new(&PublishingApiConfig::default())?;
//! let links = client.get_links("64aadc14-9bca-40d9-abb6-4f21f9792a05").await?;
//! client.patch_links(&links.content_id, &links.taxons, links.version).await?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod memory;
mod publishing_api;
mod store;

// Re-exports
pub use error::LinkStoreError;
pub use memory::InMemoryLinkStore;
pub use publishing_api::{PublishingApiClient, PublishingApiConfig};
pub use store::{LinkSet, LinkStore, PatchReceipt};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
