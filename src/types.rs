//! Core types and events for pawflix

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Unique identifier for a feed item
///
/// Ids are minted by provider adapters from a millisecond timestamp, the item's
/// index within its batch, and a random nonce, so two items fetched in the same
/// millisecond never collide. Uniqueness is scoped to one feed session.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    /// Create a new ItemId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The external source a feed item came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Random dog images (dog.ceo)
    Dog,
    /// Random cat images (thecatapi.com)
    Cat,
    /// Dynamically generated cat GIFs (cataas.com)
    CatGif,
}

impl ProviderKind {
    /// Short tag used as the prefix of minted item ids
    pub fn tag(&self) -> &'static str {
        match self {
            ProviderKind::Dog => "dog",
            ProviderKind::Cat => "cat",
            ProviderKind::CatGif => "catgif",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// One media asset in the feed
///
/// Immutable once appended to the feed; the aggregator only ever appends,
/// reorders, or drops whole items.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    /// Unique id within the feed session
    pub id: ItemId,
    /// URL of the remote asset (image or GIF)
    pub source_url: String,
    /// Which provider produced this item
    pub provider: ProviderKind,
    /// Optional human-readable label (e.g., dog breed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_label: Option<String>,
}

/// Point-in-time copy of the observable feed state
///
/// This is what the display layer renders: the ordered items plus the fetch
/// flag and the last aggregate failure, if any.
#[derive(Clone, Debug, Serialize)]
pub struct FeedSnapshot {
    /// Items in display order
    pub items: Vec<FeedItem>,
    /// Whether an aggregate fetch is currently in flight
    pub is_fetching: bool,
    /// Message from the last fully failed fetch, cleared on the next success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

/// Outcome of a `request_more` call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Another aggregate fetch was already in flight; this call was a no-op
    ///
    /// Requests are never queued: the caller simply retriggers later (in
    /// practice the next scroll event does this).
    AlreadyFetching,
    /// The batch resolved and the feed was updated
    Merged {
        /// Number of newly-unique items appended to the feed
        appended: usize,
        /// Number of providers that failed and were skipped
        provider_failures: usize,
    },
}

/// Device media collection authorization state
///
/// Starts `Unknown` at process start and advances only via an explicit
/// authorization request. `Denied` may later become `Granted` if the user
/// changes the device setting out-of-band; `Granted` is never downgraded
/// within a session (an external revocation surfaces as a commit failure on
/// the next download, not as a predicted state transition).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    /// No authorization request has been made yet
    Unknown,
    /// The user granted media collection access
    Granted,
    /// The user denied media collection access
    Denied,
}

impl std::fmt::Display for PermissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PermissionState::Unknown => "unknown",
            PermissionState::Granted => "granted",
            PermissionState::Denied => "denied",
        };
        f.write_str(s)
    }
}

/// Download pipeline stage
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Permission check against the media store
    Authorize,
    /// Remote fetch into the local cache
    Fetch,
    /// Registration with the media store and collection placement
    Commit,
}

/// Asset saved by a successful download pipeline run
#[derive(Clone, Debug)]
pub struct SavedAsset {
    /// Handle assigned by the media store
    pub asset: crate::platform::AssetHandle,
    /// Where the asset was cached locally (the cache is allowed to accumulate)
    pub cache_path: PathBuf,
    /// Name of the collection the asset was added to
    pub collection: String,
}

/// Events emitted by the gallery
///
/// Consumers subscribe via [`crate::PawflixGallery::subscribe`] and react to
/// state changes instead of polling. Slow subscribers may observe lagged
/// receivers; events carry enough context to re-query via `snapshot()`.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// The feed's item sequence changed (batch merged or feed reset)
    FeedUpdated {
        /// Total number of items now in the feed
        total: usize,
    },

    /// An aggregate fetch failed for every provider
    FetchFailed {
        /// Human-readable failure summary
        error: String,
    },

    /// A download pipeline run started
    DownloadStarted {
        /// The remote asset URL
        url: String,
    },

    /// A download pipeline run saved its asset to the collection
    DownloadComplete {
        /// The remote asset URL
        url: String,
        /// Where the asset was cached locally
        cache_path: PathBuf,
    },

    /// A download pipeline run failed
    DownloadFailed {
        /// The remote asset URL
        url: String,
        /// The stage that failed
        stage: Stage,
        /// Human-readable failure summary
        error: String,
    },

    /// A download was refused because media access is not granted
    ///
    /// The display layer should prompt the user to enable access in the
    /// device settings.
    PermissionRequired,
}
