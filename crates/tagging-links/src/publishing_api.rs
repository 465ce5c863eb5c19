//! Publishing API link store
//!
//! HTTP client for the `/v2/links/{content_id}` endpoints:
//! - `GET` returns `{"links": {"taxons": [...]}, "version": n}`
//! - `PATCH` takes `{"links": {"taxons": [...]}, "previous_version": n}`
//!
//! The API answers 404 for a content item that exists but has no links yet,
//! and 409 when `previous_version` is stale.

use crate::error::LinkStoreError;
use crate::store::{LinkSet, LinkStore, PatchReceipt};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tagging_taxonomy::TaxonId;
use url::Url;

const MAX_ERROR_BODY: usize = 200;

/// Publishing API connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishingApiConfig {
    /// Base URL of the API
    pub base_url: String,
    /// Bearer token sent with every request
    pub bearer_token: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl PublishingApiConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With base URL
    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// With bearer token
    #[inline]
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// With request timeout
    #[inline]
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for PublishingApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://publishing-api.dev.gov.uk".to_string(),
            bearer_token: None,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct LinksResponse {
    #[serde(default)]
    links: ResponseLinks,
    #[serde(default)]
    version: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseLinks {
    #[serde(default)]
    taxons: Option<Vec<TaxonId>>,
}

#[derive(Debug, Serialize)]
struct PatchLinksRequest<'a> {
    links: PatchLinks<'a>,
    previous_version: u64,
}

#[derive(Debug, Serialize)]
struct PatchLinks<'a> {
    taxons: &'a [TaxonId],
}

#[derive(Debug, Default, Deserialize)]
struct PatchResponse {
    #[serde(default)]
    version: Option<u64>,
}

/// Link store backed by the publishing API
#[derive(Debug, Clone)]
pub struct PublishingApiClient {
    http: Client,
    base_url: Url,
    bearer_token: Option<String>,
}

impl PublishingApiClient {
    /// Create client from configuration
    ///
    /// # Errors
    /// `InvalidUrl` if the base URL does not parse or cannot carry a path;
    /// `Transport` if the HTTP client cannot be built.
    pub fn new(config: &PublishingApiConfig) -> Result<Self, LinkStoreError> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(LinkStoreError::InvalidUrl(config.base_url.clone()));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("tagging-links/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            bearer_token: config.bearer_token.clone(),
        })
    }

    /// Base URL requests are resolved against
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn links_url(&self, content_id: &str) -> Result<Url, LinkStoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| LinkStoreError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["v2", "links", content_id]);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn read_body(response: Response) -> Result<String, LinkStoreError> {
        Ok(response.text().await?)
    }

    async fn unexpected(content_id: &str, response: Response) -> LinkStoreError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        LinkStoreError::Upstream {
            content_id: content_id.to_string(),
            status,
            body: body.chars().take(MAX_ERROR_BODY).collect(),
        }
    }
}

#[async_trait]
impl LinkStore for PublishingApiClient {
    async fn get_links(&self, content_id: &str) -> Result<LinkSet, LinkStoreError> {
        let url = self.links_url(content_id)?;
        tracing::debug!(%url, "fetching links");

        let response = self.authorize(self.http.get(url)).send().await?;
        match response.status() {
            status if status.is_success() => {
                let body = Self::read_body(response).await?;
                let decoded: LinksResponse = serde_json::from_str(&body)?;
                Ok(LinkSet::new(
                    content_id,
                    decoded.links.taxons.unwrap_or_default(),
                    decoded.version.unwrap_or(0),
                ))
            }
            StatusCode::NOT_FOUND => Err(LinkStoreError::NotFound {
                content_id: content_id.to_string(),
            }),
            _ => Err(Self::unexpected(content_id, response).await),
        }
    }

    async fn patch_links(
        &self,
        content_id: &str,
        taxons: &[TaxonId],
        previous_version: u64,
    ) -> Result<PatchReceipt, LinkStoreError> {
        let url = self.links_url(content_id)?;
        tracing::debug!(%url, taxons = taxons.len(), previous_version, "patching links");

        let request = PatchLinksRequest {
            links: PatchLinks { taxons },
            previous_version,
        };
        let response = self
            .authorize(self.http.patch(url))
            .json(&request)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let body = Self::read_body(response).await?;
                // Some deployments answer with an empty body.
                let decoded: PatchResponse = if body.trim().is_empty() {
                    PatchResponse::default()
                } else {
                    serde_json::from_str(&body)?
                };
                Ok(PatchReceipt {
                    version: decoded.version,
                })
            }
            StatusCode::CONFLICT => Err(LinkStoreError::VersionConflict {
                content_id: content_id.to_string(),
                previous_version,
            }),
            _ => Err(Self::unexpected(content_id, response).await),
        }
    }
}
