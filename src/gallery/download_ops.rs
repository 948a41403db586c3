//! Download operations and permission checks

use super::PawflixGallery;
use crate::error::Result;
use crate::types::{PermissionState, SavedAsset};

impl PawflixGallery {
    /// Save a remote asset into the configured media collection
    ///
    /// Runs the download pipeline (authorize, fetch to cache, commit). Safe
    /// to call concurrently for different items; each invocation owns its
    /// task state and the feed is never touched.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Download`] with the failed stage. An
    /// [`crate::DownloadError::Authorize`] failure means the user needs to
    /// enable media access; everything else is a transient download problem.
    pub async fn download(&self, source_url: &str) -> Result<SavedAsset> {
        self.pipeline.download(source_url).await
    }

    /// Resolve media permission, prompting only if it was never asked
    ///
    /// Call this at startup (the equivalent of a screen-mount permission
    /// check). A `Denied` result here does not block later downloads: the
    /// pipeline lazily re-checks on each attempt.
    pub async fn check_or_request_permission(&self) -> PermissionState {
        self.permission.check_or_request().await
    }

    /// Current cached permission state, without prompting
    pub async fn permission_status(&self) -> PermissionState {
        self.permission.status().await
    }
}
