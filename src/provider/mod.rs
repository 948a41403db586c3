//! Provider adapters for external media sources
//!
//! Each adapter wraps one external service and is responsible solely for
//! issuing the request, validating the response shape, and mapping
//! provider-specific fields into the common [`FeedItem`] shape. Adapters
//! never retry internally and never touch shared feed state; a transport or
//! parse failure surfaces immediately as a [`ProviderError`] scoped to that
//! one call.

mod cat;
mod dog;
mod gif;

pub use cat::CatApiProvider;
pub use dog::DogApiProvider;
pub use gif::CataasGifProvider;

use crate::config::NetworkConfig;
use crate::error::ProviderError;
use crate::types::{FeedItem, ItemId, ProviderKind};
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for a provider of media feed batches
///
/// Providers only support "give me N more random items": there are no stable
/// pagination cursors and no exhaustion signal, so `fetch_batch` may be
/// called any number of times and always attempts a fresh random batch.
#[async_trait]
pub trait MediaProvider: Send + Sync {
    /// Which provider this adapter wraps
    fn kind(&self) -> ProviderKind;

    /// Fetch a batch of `count` items
    ///
    /// Returned items carry freshly minted unique ids; callers may merge
    /// batches from several providers without id coordination.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] on transport failure, a non-success HTTP
    /// status, or a response body that does not match the provider's
    /// documented shape.
    async fn fetch_batch(&self, count: usize) -> Result<Vec<FeedItem>, ProviderError>;
}

/// Build the adapters for the configured provider set
///
/// The HTTP client is shared across adapters; `reqwest::Client` clones are
/// cheap handle copies.
pub fn build_providers(
    kinds: &[ProviderKind],
    client: &reqwest::Client,
    network: &NetworkConfig,
) -> Vec<Arc<dyn MediaProvider>> {
    kinds
        .iter()
        .map(|kind| -> Arc<dyn MediaProvider> {
            match kind {
                ProviderKind::Dog => {
                    Arc::new(DogApiProvider::new(client.clone(), &network.dog_api_base))
                }
                ProviderKind::Cat => {
                    Arc::new(CatApiProvider::new(client.clone(), &network.cat_api_base))
                }
                ProviderKind::CatGif => Arc::new(CataasGifProvider::new(&network.cataas_base)),
            }
        })
        .collect()
}

/// Mint a feed item id that is unique across providers and batches
///
/// Combines the provider tag, a millisecond timestamp, the item's index
/// within its batch, and a random nonce; two items fetched in the same
/// millisecond never collide.
pub(crate) fn mint_item_id(kind: ProviderKind, index: usize) -> ItemId {
    let millis = chrono::Utc::now().timestamp_millis();
    let nonce: u16 = rand::random();
    ItemId::new(format!("{}-{millis}-{index}-{nonce:04x}", kind.tag()))
}

/// Issue a GET and reject non-success statuses before the body is parsed
pub(crate) async fn get_checked(
    client: &reqwest::Client,
    url: &str,
    provider: ProviderKind,
) -> Result<reqwest::Response, ProviderError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ProviderError::Transport {
            provider,
            reason: transport_reason(&e),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Status {
            provider,
            status: status.as_u16(),
        });
    }

    Ok(response)
}

/// Describe a reqwest error for the transport error variant
fn transport_reason(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("request timed out: {error}")
    } else if error.is_connect() {
        format!("connection failed: {error}")
    } else {
        error.to_string()
    }
}
