//! Main gallery facade split into focused submodules.
//!
//! The `PawflixGallery` struct and its methods are organized by domain:
//! - [`feed_ops`] - Aggregate fetches, refresh, and feed snapshots
//! - [`download_ops`] - Download pipeline entry and permission checks

mod download_ops;
mod feed_ops;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::feed::FeedAggregator;
use crate::permission::PermissionGate;
use crate::pipeline::DownloadPipeline;
use crate::platform::MediaStore;
use crate::provider::{MediaProvider, build_providers};
use crate::types::Event;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::info;

/// Capacity of the event broadcast channel
///
/// Slow subscribers past this lag see `RecvError::Lagged` and re-sync via
/// `snapshot()`.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Main gallery instance (cloneable - all fields are Arc-wrapped)
///
/// Owns the feed aggregator, the provider set, the permission gate, and the
/// download pipeline, and exposes the operations the display layer drives:
/// `request_more`, `refresh`, `reset`, `snapshot`, `download`, and
/// `subscribe`.
#[derive(Clone)]
pub struct PawflixGallery {
    /// Configuration (wrapped in Arc for sharing across tasks)
    config: Arc<Config>,
    /// Provider adapters consulted by each aggregate fetch
    providers: Vec<Arc<dyn MediaProvider>>,
    /// Ordered feed state and fetch gate
    feed: Arc<FeedAggregator>,
    /// Media permission state machine
    permission: Arc<PermissionGate>,
    /// Download pipeline executor
    pipeline: Arc<DownloadPipeline>,
    /// Event broadcast channel sender (multiple subscribers supported)
    event_tx: broadcast::Sender<Event>,
}

impl PawflixGallery {
    /// Create a new gallery over the given media store
    ///
    /// The store is the platform boundary: pass [`crate::platform::FsMediaStore`]
    /// on desktop, or a bridge to the OS photo library on mobile.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: Config, store: Arc<dyn MediaStore>) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.network.request_timeout)
            .user_agent(config.network.user_agent.clone())
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {e}")))?;

        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        let providers = build_providers(&config.feed.providers, &client, &config.network);
        let feed = Arc::new(FeedAggregator::new(
            config.feed.ordering,
            event_tx.clone(),
        ));
        let permission = Arc::new(PermissionGate::new(Arc::clone(&store)));
        let pipeline = Arc::new(DownloadPipeline::new(
            client,
            store,
            Arc::clone(&permission),
            &config.download,
            event_tx.clone(),
        ));

        info!(
            providers = providers.len(),
            collection = %config.download.collection_name,
            "gallery initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            providers,
            feed,
            permission,
            pipeline,
            event_tx,
        })
    }

    /// Subscribe to gallery events
    ///
    /// Each receiver gets every event from its subscription point on;
    /// consumers react to events instead of polling `snapshot()`.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Get the current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_helpers::MockMediaStore;

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let mut config = Config::default();
        config.feed.per_provider_count = 0;

        let store = Arc::new(MockMediaStore::granting());
        let result = PawflixGallery::new(config, store);
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn default_config_builds_all_providers() {
        let store = Arc::new(MockMediaStore::granting());
        let gallery = PawflixGallery::new(Config::default(), store).unwrap();
        assert_eq!(gallery.providers.len(), 3);
    }
}
