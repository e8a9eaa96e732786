//! Lookup service over the cached aggregate.
//!
//! Handlers talk to this type only. It owns the cache and the source client,
//! so the fetch + merge path runs at most once per successful build.

use crate::aggregate::cache::{AggregateCache, CacheState};
use crate::aggregate::correlator;
use crate::error::{Result, SharedResult};
use crate::models::{Aggregate, MergedEntity};
use crate::source::SourceClient;
use std::sync::Arc;
use tracing::debug;

/// Answers "all artists" and "artist by id" from the memoized aggregate.
#[derive(Debug)]
pub struct LookupService {
    client: SourceClient,
    cache: AggregateCache,
}

impl LookupService {
    pub fn new(client: SourceClient) -> Self {
        Self {
            client,
            cache: AggregateCache::new(),
        }
    }

    /// The full aggregate, building it on first use.
    pub async fn list_all(&self) -> SharedResult<Arc<Aggregate>> {
        let client = self.client.clone();
        self.cache.get_or_build(move || build(client)).await
    }

    /// The artist with identifier `id`, or `None` when there is no such artist.
    pub async fn find_by_id(&self, id: usize) -> SharedResult<Option<MergedEntity>> {
        let aggregate = self.list_all().await?;
        let found = aggregate.find(id).cloned();
        debug!(id, found = found.is_some(), "Artist lookup");
        Ok(found)
    }

    /// Readiness of the underlying cache.
    pub fn state(&self) -> CacheState {
        self.cache.state()
    }
}

/// Fetch the four collections and merge them.
async fn build(client: SourceClient) -> Result<Aggregate> {
    let bundle = client.fetch_all().await?;
    correlator::merge_bundle(&bundle)
}
