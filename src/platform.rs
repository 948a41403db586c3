//! Device media collection boundary
//!
//! This module provides a trait-based architecture for the platform media
//! store the download pipeline commits assets into. The library consumes the
//! store but never implements platform specifics itself: mobile embedders
//! bridge to the OS photo library, while [`FsMediaStore`] offers a
//! directory-backed implementation for desktop use and tests.
//!
//! ## Architecture
//!
//! The core abstraction is the [`MediaStore`] trait, which defines the three
//! calls the library needs:
//!
//! - requesting media-write authorization from the user
//! - registering a cached file as a store asset
//! - adding a registered asset to a named collection (album)
//!
//! The store is assumed to serialize concurrent commits safely; the library
//! issues them without additional locking.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::utils::cache_file_name;

/// Outcome of a platform authorization prompt
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Authorization {
    /// The user granted media collection access
    Granted,
    /// The user denied media collection access
    Denied,
}

/// Handle to an asset registered with the media store
///
/// Opaque to the library beyond logging; the store interprets it when the
/// asset is later added to a collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetHandle {
    /// Store-assigned asset identifier
    pub id: String,
    /// Store-side location of the registered asset
    pub uri: PathBuf,
}

/// Trait for the device media store
///
/// Implementations bridge to whatever the platform offers (photo library,
/// media store content resolver, plain directories). All methods are
/// side-effect boundaries; the library never calls `register_asset` or
/// `add_to_collection` unless authorization was granted.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Prompt the user for media collection write access
    ///
    /// Called at most once per state transition by the permission gate; a
    /// prompt that fails outright (rather than being denied) is treated as a
    /// denial by the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform prompt itself could not be issued.
    async fn request_authorization(&self) -> crate::Result<Authorization>;

    /// Register a cached local file as a new asset in the store
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the file (missing, empty,
    /// unsupported format) or the registration fails.
    async fn register_asset(&self, local_path: &Path) -> crate::Result<AssetHandle>;

    /// Add a registered asset to a named collection, creating it if absent
    ///
    /// # Errors
    ///
    /// Returns an error if the asset handle is stale or the collection
    /// cannot be created or written.
    async fn add_to_collection(&self, asset: &AssetHandle, collection: &str) -> crate::Result<()>;

    /// Human-readable name for logging
    fn name(&self) -> &str;
}

/// Directory-backed media store
///
/// Reference implementation that maps store concepts onto a plain directory
/// tree: registered assets live under `<root>/assets`, and each collection is
/// a subdirectory of `<root>/collections` holding a copy of its assets.
/// Authorization is always granted, since filesystem access needs no prompt.
///
/// # Examples
///
/// ```no_run
/// use pawflix::platform::{FsMediaStore, MediaStore};
/// use std::path::Path;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = FsMediaStore::new("./gallery");
/// let asset = store.register_asset(Path::new("./cache/n102.jpg")).await?;
/// store.add_to_collection(&asset, "Animal Gallery").await?;
/// # Ok(())
/// # }
/// ```
pub struct FsMediaStore {
    root: PathBuf,
}

impl FsMediaStore {
    /// Create a store rooted at the given directory
    ///
    /// The directory tree is created lazily on first registration.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn assets_dir(&self) -> PathBuf {
        self.root.join("assets")
    }

    fn collections_dir(&self) -> PathBuf {
        self.root.join("collections")
    }
}

#[async_trait]
impl MediaStore for FsMediaStore {
    async fn request_authorization(&self) -> crate::Result<Authorization> {
        Ok(Authorization::Granted)
    }

    async fn register_asset(&self, local_path: &Path) -> crate::Result<AssetHandle> {
        let metadata = tokio::fs::metadata(local_path).await.map_err(|e| {
            crate::Error::Other(format!(
                "cannot register {}: {}",
                local_path.display(),
                e
            ))
        })?;

        if metadata.len() == 0 {
            return Err(crate::Error::Other(format!(
                "cannot register {}: file is empty",
                local_path.display()
            )));
        }

        let file_name = local_path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            // Cache files always carry a filename; fall back to a synthesized one
            .unwrap_or_else(|| cache_file_name(""));

        let assets_dir = self.assets_dir();
        tokio::fs::create_dir_all(&assets_dir).await?;

        let id = format!("{}-{}", chrono::Utc::now().timestamp_millis(), file_name);
        let stored = assets_dir.join(&id);
        tokio::fs::copy(local_path, &stored).await?;

        debug!(asset = %id, "registered asset");
        Ok(AssetHandle { id, uri: stored })
    }

    async fn add_to_collection(&self, asset: &AssetHandle, collection: &str) -> crate::Result<()> {
        if !asset.uri.is_file() {
            return Err(crate::Error::Other(format!(
                "stale asset handle {}: {} no longer exists",
                asset.id,
                asset.uri.display()
            )));
        }

        let collection_dir = self.collections_dir().join(collection);
        tokio::fs::create_dir_all(&collection_dir).await?;
        tokio::fs::copy(&asset.uri, collection_dir.join(&asset.id)).await?;

        debug!(asset = %asset.id, collection = %collection, "added asset to collection");
        Ok(())
    }

    fn name(&self) -> &str {
        "fs"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn registers_and_commits_an_asset() {
        let cache = tempdir().unwrap();
        let gallery = tempdir().unwrap();

        let cached = cache.path().join("pic.jpg");
        tokio::fs::write(&cached, b"jpeg-bytes").await.unwrap();

        let store = FsMediaStore::new(gallery.path());
        assert_eq!(
            store.request_authorization().await.unwrap(),
            Authorization::Granted
        );

        let asset = store.register_asset(&cached).await.unwrap();
        assert!(asset.uri.is_file());

        store.add_to_collection(&asset, "Animal Gallery").await.unwrap();
        let committed = gallery
            .path()
            .join("collections")
            .join("Animal Gallery")
            .join(&asset.id);
        assert!(committed.is_file());
    }

    #[tokio::test]
    async fn rejects_missing_file() {
        let gallery = tempdir().unwrap();
        let store = FsMediaStore::new(gallery.path());

        let result = store
            .register_asset(Path::new("/nonexistent/pic.jpg"))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn rejects_empty_file() {
        let cache = tempdir().unwrap();
        let gallery = tempdir().unwrap();

        let cached = cache.path().join("empty.jpg");
        tokio::fs::write(&cached, b"").await.unwrap();

        let store = FsMediaStore::new(gallery.path());
        let result = store.register_asset(&cached).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn collection_is_created_on_first_commit() {
        let cache = tempdir().unwrap();
        let gallery = tempdir().unwrap();

        let cached = cache.path().join("pic.gif");
        tokio::fs::write(&cached, b"gif-bytes").await.unwrap();

        let store = FsMediaStore::new(gallery.path());
        let asset = store.register_asset(&cached).await.unwrap();
        store.add_to_collection(&asset, "Downloaded GIFs").await.unwrap();

        assert!(
            gallery
                .path()
                .join("collections")
                .join("Downloaded GIFs")
                .is_dir()
        );
    }
}
