//! Adapter for thecatapi.com random image search

use super::{MediaProvider, get_checked, mint_item_id};
use crate::error::ProviderError;
use crate::types::{FeedItem, ProviderKind};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// One entry of the `GET /v1/images/search` response
///
/// The API returns a list of objects; only the URL field matters here, the
/// rest (dimensions, upstream id) is ignored.
#[derive(Debug, Deserialize)]
struct CatImage {
    url: String,
}

/// Provider adapter for thecatapi.com
pub struct CatApiProvider {
    client: reqwest::Client,
    base: String,
}

impl CatApiProvider {
    /// Create an adapter against the given API base (e.g., `https://api.thecatapi.com`)
    pub fn new(client: reqwest::Client, base: impl Into<String>) -> Self {
        Self {
            client,
            base: base.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MediaProvider for CatApiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Cat
    }

    async fn fetch_batch(&self, count: usize) -> Result<Vec<FeedItem>, ProviderError> {
        let url = format!("{}/v1/images/search?limit={}", self.base, count);
        debug!(url = %url, "fetching cat batch");

        let response = get_checked(&self.client, &url, self.kind()).await?;
        let body: Vec<CatImage> = response.json().await.map_err(|e| ProviderError::Shape {
            provider: self.kind(),
            reason: format!("expected a JSON array of objects with a url field: {e}"),
        })?;

        let items = body
            .into_iter()
            .enumerate()
            .map(|(index, image)| FeedItem {
                id: mint_item_id(self.kind(), index),
                source_url: image.url,
                provider: self.kind(),
                display_label: None,
            })
            .collect();

        Ok(items)
    }
}
