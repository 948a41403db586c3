//! # pawflix
//!
//! Backend library for pet media gallery applications: aggregates random
//! images and GIFs from multiple public providers into a single scrollable
//! feed, and saves selected assets into a permission-gated device media
//! collection.
//!
//! ## Design Philosophy
//!
//! pawflix is designed to be:
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Event-driven** - Consumers subscribe to events, no polling required
//! - **Platform-agnostic** - The device media store is a trait; bring your
//!   own bridge, or use the bundled filesystem store
//! - **Burst-safe** - A single-flight gate absorbs repeated "load more"
//!   triggers without duplicate fetches
//!
//! ## Quick Start
//!
//! ```no_run
//! use pawflix::{Config, PawflixGallery};
//! use pawflix::platform::FsMediaStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(FsMediaStore::new("./gallery"));
//!     let gallery = PawflixGallery::new(Config::default(), store)?;
//!
//!     // Subscribe to events
//!     let mut events = gallery.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     // Load the first batch and save one item
//!     gallery.request_more().await?;
//!     let snapshot = gallery.snapshot().await;
//!     if let Some(item) = snapshot.items.first() {
//!         gallery.download(&item.source_url).await?;
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Feed aggregation
pub mod feed;
/// Main gallery facade (decomposed into focused submodules)
pub mod gallery;
/// Media collection permission gate
pub mod permission;
/// Download pipeline
pub mod pipeline;
/// Device media collection boundary
pub mod platform;
/// Provider adapters for external media sources
pub mod provider;
/// Core types and events
pub mod types;
/// Utility functions
pub mod utils;

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used types
pub use config::{Config, DownloadConfig, FeedConfig, NetworkConfig, OrderingPolicy};
pub use error::{DownloadError, Error, ProviderError, Result};
pub use feed::FeedAggregator;
pub use gallery::PawflixGallery;
pub use permission::PermissionGate;
pub use platform::{AssetHandle, Authorization, FsMediaStore, MediaStore};
pub use provider::{CatApiProvider, CataasGifProvider, DogApiProvider, MediaProvider};
pub use types::{
    Event, FeedItem, FeedSnapshot, FetchOutcome, ItemId, PermissionState, ProviderKind,
    SavedAsset, Stage,
};
