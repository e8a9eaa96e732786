//! HTTP client for the Groupie Trackers API.
//!
//! Each collection lives at a fixed path under the configured base URL.
//! A fetch is one GET, no retries, and the body is decoded into its typed
//! collection before it leaves this module.

use crate::config::SourceConfig;
use crate::error::{AggregateError, Result};
use crate::models::{
    Index, SourceArtist, SourceBundle, SourceDates, SourceLocations, SourceRelations,
};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// User-Agent string for outbound requests.
const USER_AGENT: &str = concat!("groupie-tracker/", env!("CARGO_PKG_VERSION"));

/// The four remote collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Artists,
    Locations,
    Dates,
    Relations,
}

impl Resource {
    /// Path segment under the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Artists => "artists",
            Resource::Locations => "locations",
            Resource::Dates => "dates",
            Resource::Relations => "relation",
        }
    }

    /// Name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Artists => "artists",
            Resource::Locations => "locations",
            Resource::Dates => "dates",
            Resource::Relations => "relations",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Client for the four read-only collection endpoints.
#[derive(Debug, Clone)]
pub struct SourceClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl SourceClient {
    /// Build a client from the `[source]` config section.
    pub fn new(config: &SourceConfig) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL every resource path is joined to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of a resource.
    pub fn url_for(&self, resource: Resource) -> String {
        format!("{}/{}", self.base_url, resource.path())
    }

    /// Fetch the artist profiles (a bare JSON array upstream).
    pub async fn fetch_artists(&self) -> Result<Vec<SourceArtist>> {
        self.fetch_collection(Resource::Artists).await
    }

    /// Fetch the per-artist location lists.
    pub async fn fetch_locations(&self) -> Result<Vec<SourceLocations>> {
        self.fetch_index(Resource::Locations).await
    }

    /// Fetch the per-artist concert dates.
    pub async fn fetch_dates(&self) -> Result<Vec<SourceDates>> {
        self.fetch_index(Resource::Dates).await
    }

    /// Fetch the per-artist location to dates relations.
    pub async fn fetch_relations(&self) -> Result<Vec<SourceRelations>> {
        self.fetch_index(Resource::Relations).await
    }

    /// Fetch all four collections concurrently.
    ///
    /// The first failure wins and the remaining requests are dropped.
    pub async fn fetch_all(&self) -> Result<SourceBundle> {
        info!(base_url = %self.base_url, "Fetching source collections");

        let (artists, locations, dates, relations) = futures::future::try_join4(
            self.fetch_artists(),
            self.fetch_locations(),
            self.fetch_dates(),
            self.fetch_relations(),
        )
        .await?;

        Ok(SourceBundle {
            artists,
            locations,
            dates,
            relations,
        })
    }

    async fn fetch_index<T: DeserializeOwned>(&self, resource: Resource) -> Result<Vec<T>> {
        let envelope: Index<T> = self.fetch_collection(resource).await?;
        Ok(envelope.index)
    }

    /// GET one resource and decode its body.
    async fn fetch_collection<T: DeserializeOwned>(&self, resource: Resource) -> Result<T> {
        let url = self.url_for(resource);
        debug!(%resource, %url, "GET");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|source| AggregateError::Fetch {
                resource: resource.name(),
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AggregateError::Status {
                resource: resource.name(),
                url,
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| AggregateError::Fetch {
                resource: resource.name(),
                url: url.clone(),
                source,
            })?;

        debug!(%resource, bytes = body.len(), "Received response");

        serde_json::from_slice(&body).map_err(|source| AggregateError::Decode {
            resource: resource.name(),
            source,
        })
    }
}
