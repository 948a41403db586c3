//! Feed operations: aggregate fetches, refresh, and snapshots

use super::PawflixGallery;
use crate::error::Result;
use crate::types::{FeedSnapshot, FetchOutcome};

impl PawflixGallery {
    /// Fetch one batch from every configured provider and merge it
    ///
    /// This is the "load more" entry point, typically driven by a
    /// scroll-near-end event. Burst calls are safe: while a fetch is in
    /// flight, further calls return [`FetchOutcome::AlreadyFetching`] without
    /// issuing any provider request.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::AllProvidersFailed`] when every provider
    /// failed; the feed is left unchanged and the failure is non-fatal (the
    /// user retriggers by scrolling again).
    pub async fn request_more(&self) -> Result<FetchOutcome> {
        self.feed
            .request_more(&self.providers, self.config.feed.per_provider_count)
            .await
    }

    /// Clear the feed and fetch a fresh first batch
    ///
    /// The manual refresh gesture: equivalent to [`PawflixGallery::reset`]
    /// followed by [`PawflixGallery::request_more`].
    ///
    /// # Errors
    ///
    /// Same failure modes as [`PawflixGallery::request_more`].
    pub async fn refresh(&self) -> Result<FetchOutcome> {
        self.feed.reset().await;
        self.request_more().await
    }

    /// Clear the feed without fetching
    pub async fn reset(&self) {
        self.feed.reset().await;
    }

    /// Point-in-time copy of the observable feed state
    pub async fn snapshot(&self) -> FeedSnapshot {
        self.feed.snapshot().await
    }

    /// Whether an aggregate fetch is currently in flight
    pub fn is_fetching(&self) -> bool {
        self.feed.is_fetching()
    }
}
