//! Adapter for the cataas.com GIF endpoint

use super::{MediaProvider, mint_item_id};
use crate::error::ProviderError;
use crate::types::{FeedItem, ProviderKind};
use async_trait::async_trait;
use tracing::debug;

/// Provider adapter for cataas.com GIFs
///
/// The upstream endpoint mints a fresh GIF per request and offers neither a
/// count parameter nor a JSON listing, so this adapter does no network call
/// at batch time: it synthesizes `count` unique cache-busted URLs and lets
/// the display layer (and the download pipeline) fetch each one. The
/// cache-bust query also means these assets have no stable filename, which
/// the pipeline handles by synthesizing cache names.
pub struct CataasGifProvider {
    base: String,
}

impl CataasGifProvider {
    /// Create an adapter against the given service base (e.g., `https://cataas.com`)
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MediaProvider for CataasGifProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::CatGif
    }

    async fn fetch_batch(&self, count: usize) -> Result<Vec<FeedItem>, ProviderError> {
        let millis = chrono::Utc::now().timestamp_millis();
        debug!(count = count, "synthesizing gif batch");

        let items = (0..count)
            .map(|index| FeedItem {
                id: mint_item_id(self.kind(), index),
                source_url: format!("{}/cat/gif?ts={millis}-{index}", self.base),
                provider: self.kind(),
                display_label: None,
            })
            .collect();

        Ok(items)
    }
}
