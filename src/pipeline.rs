//! Download pipeline
//!
//! Orchestrates saving one remote asset into the device media collection:
//! authorize, fetch into the local cache, then commit to the store. The
//! stages are hard-ordered; a failure at any stage stops the run and no
//! later stage is attempted, so the collection never references a partial
//! artifact. Each invocation builds its own ephemeral task state, which is
//! why any number of downloads may run concurrently without coordination.

use crate::config::DownloadConfig;
use crate::error::{DownloadError, Result};
use crate::permission::PermissionGate;
use crate::platform::MediaStore;
use crate::types::{Event, PermissionState, SavedAsset};
use crate::utils::cache_file_name;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Executes the authorize → fetch → commit sequence for single assets
pub struct DownloadPipeline {
    client: reqwest::Client,
    store: Arc<dyn MediaStore>,
    permission: Arc<PermissionGate>,
    cache_dir: PathBuf,
    collection: String,
    event_tx: broadcast::Sender<Event>,
}

impl DownloadPipeline {
    /// Create a pipeline committing into the configured collection
    pub fn new(
        client: reqwest::Client,
        store: Arc<dyn MediaStore>,
        permission: Arc<PermissionGate>,
        config: &DownloadConfig,
        event_tx: broadcast::Sender<Event>,
    ) -> Self {
        Self {
            client,
            store,
            permission,
            cache_dir: config.cache_dir.clone(),
            collection: config.collection_name.clone(),
            event_tx,
        }
    }

    /// Save a remote asset into the media collection
    ///
    /// Runs the three stages in order:
    ///
    /// 1. **Authorize** — lazily re-checks media permission (a user may have
    ///    granted access since an earlier denial); anything but `Granted`
    ///    stops the run before any side effect.
    /// 2. **Fetch** — derives a cache filename from the URL and saves the
    ///    asset body into the cache directory. Transport errors and non-2xx
    ///    responses fail here, before the media store is ever touched.
    /// 3. **Commit** — registers the cached file with the store and adds it
    ///    to the collection, creating the collection if absent.
    ///
    /// The cached file is left in place on success. Downloads never touch
    /// the feed's state.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Download`] wrapping a [`DownloadError`] tagged
    /// with the failed stage.
    pub async fn download(&self, source_url: &str) -> Result<SavedAsset> {
        let _ = self.event_tx.send(Event::DownloadStarted {
            url: source_url.to_string(),
        });

        // Stage 1: authorize
        let state = self.permission.recheck().await;
        if state != PermissionState::Granted {
            let _ = self.event_tx.send(Event::PermissionRequired);
            return Err(self.fail(source_url, DownloadError::Authorize { state }));
        }

        // Stage 2: fetch to cache
        let cache_path = match self.fetch_to_cache(source_url).await {
            Ok(path) => path,
            Err(e) => return Err(self.fail(source_url, e)),
        };

        // Stage 3: commit to collection
        let asset = match self.commit(&cache_path).await {
            Ok(asset) => asset,
            Err(e) => return Err(self.fail(source_url, e)),
        };

        info!(
            url = %source_url,
            path = %cache_path.display(),
            collection = %self.collection,
            "asset saved to collection"
        );
        let _ = self.event_tx.send(Event::DownloadComplete {
            url: source_url.to_string(),
            cache_path: cache_path.clone(),
        });

        Ok(SavedAsset {
            asset,
            cache_path,
            collection: self.collection.clone(),
        })
    }

    /// Stage 2: save the remote asset into the cache directory
    async fn fetch_to_cache(&self, source_url: &str) -> std::result::Result<PathBuf, DownloadError> {
        let fetch_err = |reason: String| DownloadError::Fetch {
            url: source_url.to_string(),
            reason,
        };

        tokio::fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(|e| fetch_err(format!("cannot prepare cache directory: {e}")))?;

        let response = self
            .client
            .get(source_url)
            .send()
            .await
            .map_err(|e| fetch_err(describe_transport_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_err(format!("HTTP {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| fetch_err(format!("failed to read body: {e}")))?;

        let cache_path = self.cache_dir.join(cache_file_name(source_url));
        tokio::fs::write(&cache_path, &body)
            .await
            .map_err(|e| fetch_err(format!("failed to write cache file: {e}")))?;

        debug!(url = %source_url, path = %cache_path.display(), bytes = body.len(), "asset cached");
        Ok(cache_path)
    }

    /// Stage 3: register the cached file and place it in the collection
    async fn commit(
        &self,
        cache_path: &std::path::Path,
    ) -> std::result::Result<crate::platform::AssetHandle, DownloadError> {
        let commit_err = |reason: String| DownloadError::Commit {
            path: cache_path.to_path_buf(),
            reason,
        };

        let asset = self
            .store
            .register_asset(cache_path)
            .await
            .map_err(|e| commit_err(e.to_string()))?;

        self.store
            .add_to_collection(&asset, &self.collection)
            .await
            .map_err(|e| commit_err(e.to_string()))?;

        Ok(asset)
    }

    /// Emit the failure event and wrap the stage error
    fn fail(&self, source_url: &str, error: DownloadError) -> crate::Error {
        warn!(url = %source_url, stage = ?error.stage(), error = %error, "download failed");
        let _ = self.event_tx.send(Event::DownloadFailed {
            url: source_url.to_string(),
            stage: error.stage(),
            error: error.to_string(),
        });
        error.into()
    }
}

/// Describe a reqwest error for the fetch stage reason field
fn describe_transport_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("request timed out: {error}")
    } else if error.is_connect() {
        format!("connection failed: {error}")
    } else {
        error.to_string()
    }
}
