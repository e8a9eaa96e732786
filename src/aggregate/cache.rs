//! Process-wide memoization of the merged aggregate.
//!
//! The cache holds at most one [`Aggregate`]. The first caller starts the
//! build; callers arriving while it is in flight await that same build and
//! receive its result, success or failure. A success is kept for the rest of
//! the process. A failure is handed to everyone who was waiting and then
//! dropped, so the next request starts a fresh build.

use crate::error::{AggregateError, Result, SharedResult};
use crate::models::Aggregate;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tokio::sync::OnceCell;
use tracing::{info, warn};

/// Readiness of the cached aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Nothing built yet, or the last build failed.
    Empty,
    /// A build is in flight.
    Building,
    /// Populated for the rest of the process.
    Ready,
}

impl fmt::Display for CacheState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheState::Empty => write!(f, "empty"),
            CacheState::Building => write!(f, "building"),
            CacheState::Ready => write!(f, "ready"),
        }
    }
}

type InFlight = Shared<BoxFuture<'static, SharedResult<Arc<Aggregate>>>>;

/// Single-flight holder for the aggregate.
#[derive(Default)]
pub struct AggregateCache {
    ready: OnceCell<Arc<Aggregate>>,
    in_flight: Mutex<Option<InFlight>>,
}

impl fmt::Debug for AggregateCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregateCache")
            .field("state", &self.state())
            .finish()
    }
}

impl AggregateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached aggregate, running `build` only if none is stored
    /// and no build is in flight.
    pub async fn get_or_build<F, Fut>(&self, build: F) -> SharedResult<Arc<Aggregate>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Aggregate>> + Send + 'static,
    {
        if let Some(aggregate) = self.ready.get() {
            return Ok(Arc::clone(aggregate));
        }

        let in_flight = {
            let mut slot = self.slot();
            // Re-check under the lock: a build may have settled meanwhile.
            if let Some(aggregate) = self.ready.get() {
                return Ok(Arc::clone(aggregate));
            }
            slot.get_or_insert_with(|| start(build())).clone()
        };

        let result = in_flight.clone().await;
        self.settle(&in_flight, &result);
        result
    }

    /// Current readiness.
    pub fn state(&self) -> CacheState {
        let slot = self.slot();
        if self.ready.initialized() {
            CacheState::Ready
        } else if slot.is_some() {
            CacheState::Building
        } else {
            CacheState::Empty
        }
    }

    /// Publish a finished build and release its slot.
    ///
    /// Every waiter calls this; only the first one for a given build has any
    /// effect. The aggregate is stored before the slot is cleared, so readers
    /// never see `Empty` between a successful build and `Ready`.
    fn settle(&self, finished: &InFlight, result: &SharedResult<Arc<Aggregate>>) {
        let mut slot = self.slot();
        if let Ok(aggregate) = result {
            let _ = self.ready.set(Arc::clone(aggregate));
        }
        if slot.as_ref().is_some_and(|current| current.ptr_eq(finished)) {
            *slot = None;
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<InFlight>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Wrap a build so every waiter can await it and share its outcome.
fn start<Fut>(build: Fut) -> InFlight
where
    Fut: Future<Output = Result<Aggregate>> + Send + 'static,
{
    async move {
        info!("Building aggregate");
        let started = Instant::now();

        match build.await {
            Ok(aggregate) => {
                info!(
                    artists = aggregate.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Aggregate ready"
                );
                Ok(Arc::new(aggregate))
            }
            Err(e) => {
                warn!("Aggregate build failed: {}", e);
                Err(Arc::<AggregateError>::new(e))
            }
        }
    }
    .boxed()
    .shared()
}
