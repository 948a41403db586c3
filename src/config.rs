//! Configuration types for pawflix

use crate::error::{Error, Result};
use crate::types::ProviderKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Feed behavior configuration (batch sizes, ordering, enabled providers)
///
/// Groups settings related to how batches are fetched and merged into the
/// feed. Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Items requested from each provider per aggregate fetch (default: 5)
    #[serde(default = "default_per_provider_count")]
    pub per_provider_count: usize,

    /// How merged batches are ordered in the feed
    ///
    /// One explicit policy for the whole feed; call sites never choose their
    /// own ordering.
    #[serde(default)]
    pub ordering: OrderingPolicy,

    /// Providers consulted by each aggregate fetch (default: all)
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderKind>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            per_provider_count: default_per_provider_count(),
            ordering: OrderingPolicy::default(),
            providers: default_providers(),
        }
    }
}

/// How the aggregator orders the feed after merging a batch
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingPolicy {
    /// Shuffle the entire feed once per merged batch (default)
    ///
    /// Matches a gallery of random items: every batch re-mixes old and new.
    #[default]
    ShuffleAll,
    /// Append new items in received order, never reordering earlier items
    PreserveOrder,
}

/// Download pipeline configuration (cache location, collection name)
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Local cache directory for fetched assets (default: "./cache")
    ///
    /// Cached files are left in place after a successful commit; eviction is
    /// the embedder's concern.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Name of the device media collection downloads are added to
    /// (default: "Animal Gallery")
    #[serde(default = "default_collection_name")]
    pub collection_name: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            collection_name: default_collection_name(),
        }
    }
}

/// Network configuration (timeouts, user agent, provider endpoints)
///
/// Provider base URLs are configurable so tests can point adapters at a mock
/// server. Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Timeout applied to every provider fetch and asset download (default: 30s)
    ///
    /// A timed-out request surfaces as a provider or download error; nothing
    /// in the library waits unboundedly.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: Duration,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Base URL of the dog image API (default: "https://dog.ceo/api")
    #[serde(default = "default_dog_api_base")]
    pub dog_api_base: String,

    /// Base URL of the cat image API (default: "https://api.thecatapi.com")
    #[serde(default = "default_cat_api_base")]
    pub cat_api_base: String,

    /// Base URL of the cat GIF service (default: "https://cataas.com")
    #[serde(default = "default_cataas_base")]
    pub cataas_base: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
            dog_api_base: default_dog_api_base(),
            cat_api_base: default_cat_api_base(),
            cataas_base: default_cataas_base(),
        }
    }
}

/// Main configuration for [`crate::PawflixGallery`]
///
/// Works out of the box with zero configuration:
///
/// ```
/// use pawflix::Config;
///
/// let config = Config::default();
/// assert_eq!(config.feed.per_provider_count, 5);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Feed behavior settings
    #[serde(default)]
    pub feed: FeedConfig,

    /// Download pipeline settings
    #[serde(default)]
    pub download: DownloadConfig,

    /// Network settings
    #[serde(default)]
    pub network: NetworkConfig,
}

impl Config {
    /// Validate the configuration
    ///
    /// # Errors
    /// Returns [`Error::Config`] naming the offending key when a setting is
    /// unusable (zero batch size, no providers, empty collection name, or a
    /// blank provider base URL).
    pub fn validate(&self) -> Result<()> {
        if self.feed.per_provider_count == 0 {
            return Err(Error::Config {
                message: "per-provider batch size must be at least 1".to_string(),
                key: Some("feed.per_provider_count".to_string()),
            });
        }

        if self.feed.providers.is_empty() {
            return Err(Error::Config {
                message: "at least one provider must be enabled".to_string(),
                key: Some("feed.providers".to_string()),
            });
        }

        if self.download.collection_name.trim().is_empty() {
            return Err(Error::Config {
                message: "collection name must not be empty".to_string(),
                key: Some("download.collection_name".to_string()),
            });
        }

        for (key, base) in [
            ("network.dog_api_base", &self.network.dog_api_base),
            ("network.cat_api_base", &self.network.cat_api_base),
            ("network.cataas_base", &self.network.cataas_base),
        ] {
            if base.trim().is_empty() {
                return Err(Error::Config {
                    message: "provider base URL must not be empty".to_string(),
                    key: Some(key.to_string()),
                });
            }
        }

        Ok(())
    }
}

fn default_per_provider_count() -> usize {
    5
}

fn default_providers() -> Vec<ProviderKind> {
    vec![ProviderKind::Dog, ProviderKind::Cat, ProviderKind::CatGif]
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("./cache")
}

fn default_collection_name() -> String {
    "Animal Gallery".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    format!("pawflix/{}", env!("CARGO_PKG_VERSION"))
}

fn default_dog_api_base() -> String {
    "https://dog.ceo/api".to_string()
}

fn default_cat_api_base() -> String {
    "https://api.thecatapi.com".to_string()
}

fn default_cataas_base() -> String {
    "https://cataas.com".to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.feed.ordering, OrderingPolicy::ShuffleAll);
        assert_eq!(config.feed.providers.len(), 3);
        assert_eq!(config.download.collection_name, "Animal Gallery");
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let mut config = Config::default();
        config.feed.per_provider_count = 0;
        let err = config.validate().unwrap_err();
        match err {
            Error::Config { key, .. } => {
                assert_eq!(key.as_deref(), Some("feed.per_provider_count"));
            }
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn empty_provider_set_is_rejected() {
        let mut config = Config::default();
        config.feed.providers.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_collection_name_is_rejected() {
        let mut config = Config::default();
        config.download.collection_name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_config_deserializes_with_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"feed": {"per_provider_count": 8}}"#).unwrap();
        assert_eq!(config.feed.per_provider_count, 8);
        assert_eq!(config.network.request_timeout, Duration::from_secs(30));
        assert_eq!(config.feed.ordering, OrderingPolicy::ShuffleAll);
    }
}
