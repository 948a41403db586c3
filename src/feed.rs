//! Feed aggregation
//!
//! The aggregator owns the ordered item sequence, the fetch concurrency
//! gate, and the batch merge policy. Fetches fan out to every configured
//! provider concurrently and fan in exactly once: the merge-and-append
//! happens after all providers resolve, never as a streaming append.

use crate::config::OrderingPolicy;
use crate::error::{Error, Result};
use crate::provider::MediaProvider;
use crate::types::{Event, FeedItem, FeedSnapshot, FetchOutcome, ItemId};
use futures::future::join_all;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, info, warn};

/// Ordered feed state plus the single-flight fetch gate
///
/// The gate is a plain boolean: scroll events arrive in bursts, and exactly
/// one aggregate fetch is ever wanted in flight. A request that finds the
/// gate held is dropped, not queued; the next scroll event retriggers it.
pub struct FeedAggregator {
    items: Mutex<Vec<FeedItem>>,
    is_fetching: AtomicBool,
    last_error: Mutex<Option<String>>,
    ordering: OrderingPolicy,
    event_tx: broadcast::Sender<Event>,
}

/// Releases the fetch gate on every exit path
struct FetchGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl FeedAggregator {
    /// Create an empty feed with the given merge ordering policy
    pub fn new(ordering: OrderingPolicy, event_tx: broadcast::Sender<Event>) -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            is_fetching: AtomicBool::new(false),
            last_error: Mutex::new(None),
            ordering,
            event_tx,
        }
    }

    /// Whether an aggregate fetch is currently in flight
    pub fn is_fetching(&self) -> bool {
        self.is_fetching.load(Ordering::SeqCst)
    }

    /// Point-in-time copy of the observable feed state
    pub async fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            items: self.items.lock().await.clone(),
            is_fetching: self.is_fetching(),
            last_error: self.last_error.lock().await.clone(),
        }
    }

    /// Fetch one batch from every provider and merge the results
    ///
    /// If a fetch is already in flight this returns
    /// [`FetchOutcome::AlreadyFetching`] immediately: no provider is called
    /// and the feed is untouched. Otherwise all providers are invoked
    /// concurrently; once every call resolves, the successful batches are
    /// concatenated, items whose id already exists in the feed are dropped
    /// (ids are fresh per fetch, but a buggy adapter must not corrupt the
    /// feed), and the configured [`OrderingPolicy`] is applied.
    ///
    /// Partial failure is tolerated: failed providers are logged and skipped
    /// while the successes merge normally.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllProvidersFailed`] when no provider produced a
    /// batch; the feed is left unchanged and `last_error` is set.
    pub async fn request_more(
        &self,
        providers: &[Arc<dyn MediaProvider>],
        per_provider: usize,
    ) -> Result<FetchOutcome> {
        if providers.is_empty() {
            debug!("request_more with no providers, nothing to do");
            return Ok(FetchOutcome::Merged {
                appended: 0,
                provider_failures: 0,
            });
        }

        if self
            .is_fetching
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("aggregate fetch already in flight, ignoring request");
            return Ok(FetchOutcome::AlreadyFetching);
        }
        let _guard = FetchGuard {
            flag: &self.is_fetching,
        };

        let fetches = providers.iter().map(|provider| {
            let provider = Arc::clone(provider);
            async move { (provider.kind(), provider.fetch_batch(per_provider).await) }
        });
        let results = join_all(fetches).await;

        let mut batches = Vec::new();
        let mut failures = Vec::new();
        for (kind, result) in results {
            match result {
                Ok(batch) => {
                    debug!(provider = %kind, count = batch.len(), "provider batch resolved");
                    batches.push(batch);
                }
                Err(e) => {
                    warn!(provider = %kind, error = %e, "provider fetch failed, skipping");
                    failures.push(e);
                }
            }
        }

        if batches.is_empty() {
            let message = failures
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            *self.last_error.lock().await = Some(message.clone());
            let _ = self.event_tx.send(Event::FetchFailed { error: message });
            return Err(Error::AllProvidersFailed { failures });
        }

        let provider_failures = failures.len();
        let appended = self.merge(batches).await;
        *self.last_error.lock().await = None;

        let total = self.items.lock().await.len();
        let _ = self.event_tx.send(Event::FeedUpdated { total });
        debug!(appended = appended, total = total, "batch merged");

        Ok(FetchOutcome::Merged {
            appended,
            provider_failures,
        })
    }

    /// Append newly-unique items and apply the ordering policy
    async fn merge(&self, batches: Vec<Vec<FeedItem>>) -> usize {
        let mut items = self.items.lock().await;

        let mut seen: HashSet<ItemId> = items.iter().map(|item| item.id.clone()).collect();
        let mut appended = 0;
        for item in batches.into_iter().flatten() {
            if seen.insert(item.id.clone()) {
                items.push(item);
                appended += 1;
            } else {
                warn!(id = %item.id, "dropping item with duplicate id");
            }
        }

        if self.ordering == OrderingPolicy::ShuffleAll {
            items.shuffle(&mut rand::thread_rng());
        }

        appended
    }

    /// Clear the feed for a manual refresh
    ///
    /// Empties the item sequence and the last error; the caller re-invokes
    /// [`FeedAggregator::request_more`] to repopulate from scratch.
    pub async fn reset(&self) {
        self.items.lock().await.clear();
        *self.last_error.lock().await = None;
        let _ = self.event_tx.send(Event::FeedUpdated { total: 0 });
        info!("feed reset");
    }
}
