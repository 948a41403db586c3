//! Adapter for the dog.ceo random image API

use super::{MediaProvider, get_checked, mint_item_id};
use crate::error::ProviderError;
use crate::types::{FeedItem, ProviderKind};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Response shape of `GET /breeds/image/random/{count}`
///
/// The API wraps its payload in an envelope with a status field; the
/// interesting part is a flat list of image URLs.
#[derive(Debug, Deserialize)]
struct DogApiResponse {
    message: Vec<String>,
    status: String,
}

/// Provider adapter for dog.ceo
pub struct DogApiProvider {
    client: reqwest::Client,
    base: String,
}

impl DogApiProvider {
    /// Create an adapter against the given API base (e.g., `https://dog.ceo/api`)
    pub fn new(client: reqwest::Client, base: impl Into<String>) -> Self {
        Self {
            client,
            base: base.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MediaProvider for DogApiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Dog
    }

    async fn fetch_batch(&self, count: usize) -> Result<Vec<FeedItem>, ProviderError> {
        let url = format!("{}/breeds/image/random/{}", self.base, count);
        debug!(url = %url, "fetching dog batch");

        let response = get_checked(&self.client, &url, self.kind()).await?;
        let body: DogApiResponse =
            response.json().await.map_err(|e| ProviderError::Shape {
                provider: self.kind(),
                reason: format!("invalid JSON body: {e}"),
            })?;

        if body.status != "success" {
            return Err(ProviderError::Shape {
                provider: self.kind(),
                reason: format!("API status was '{}', expected 'success'", body.status),
            });
        }

        let items = body
            .message
            .into_iter()
            .enumerate()
            .map(|(index, source_url)| FeedItem {
                id: mint_item_id(self.kind(), index),
                display_label: breed_label(&source_url),
                source_url,
                provider: self.kind(),
            })
            .collect();

        Ok(items)
    }
}

/// Extract the breed from a dog.ceo CDN URL
///
/// URLs look like `https://images.dog.ceo/breeds/terrier-norfolk/n02094114.jpg`;
/// the segment after `breeds` names the breed.
fn breed_label(source_url: &str) -> Option<String> {
    let parsed = url::Url::parse(source_url).ok()?;
    let segments: Vec<&str> = parsed.path_segments()?.collect();
    let breeds_at = segments.iter().position(|s| *s == "breeds")?;
    segments
        .get(breeds_at + 1)
        .map(|breed| breed.replace('-', " "))
}
