//! Error types for pawflix
//!
//! This module provides error handling for the library, including:
//! - Domain-specific error types (Provider, Download, Config)
//! - Stage information for download failures (authorize vs fetch vs commit)
//! - Context information (provider kind, URL, cache path)

use crate::types::{PermissionState, ProviderKind, Stage};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pawflix operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for pawflix
///
/// This is the primary error type used throughout the library. Each variant includes
/// contextual information to help diagnose issues. All variants are non-fatal from
/// the embedding application's perspective: they describe one failed operation and
/// never require tearing down the gallery.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "feed.per_provider_count")
        key: Option<String>,
    },

    /// A single provider fetch failed
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Every provider in an aggregate fetch failed
    ///
    /// Partial failure is tolerated and never produces this error; it is returned
    /// only when no provider contributed any items to the batch.
    #[error("all {} providers failed for this batch", failures.len())]
    AllProvidersFailed {
        /// The individual failure from each provider, in provider order
        failures: Vec<ProviderError>,
    },

    /// A download pipeline run failed
    #[error("download error: {0}")]
    Download(#[from] DownloadError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Errors produced by a single provider adapter call
///
/// Scoped to one `fetch_batch` invocation; a failing provider never affects
/// items already in the feed or batches returned by other providers.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure (connection, timeout, TLS)
    #[error("{provider} provider transport error: {reason}")]
    Transport {
        /// The provider that failed
        provider: ProviderKind,
        /// Description of the transport failure
        reason: String,
    },

    /// The provider answered with a non-success HTTP status
    #[error("{provider} provider returned HTTP {status}")]
    Status {
        /// The provider that failed
        provider: ProviderKind,
        /// The HTTP status code received
        status: u16,
    },

    /// The response body did not match the provider's documented shape
    #[error("{provider} provider returned an unexpected response shape: {reason}")]
    Shape {
        /// The provider that failed
        provider: ProviderKind,
        /// Description of the shape mismatch
        reason: String,
    },
}

impl ProviderError {
    /// The provider this error is scoped to
    pub fn provider(&self) -> ProviderKind {
        match self {
            ProviderError::Transport { provider, .. }
            | ProviderError::Status { provider, .. }
            | ProviderError::Shape { provider, .. } => *provider,
        }
    }
}

/// Errors produced by one download pipeline run
///
/// Each variant is tagged with the [`Stage`] that failed. Stages are strictly
/// ordered: a failure at one stage means no later stage was attempted, so a
/// `Fetch` error guarantees the media store was never called for this task.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Media collection access was not granted
    #[error("media collection access not granted (currently {state})")]
    Authorize {
        /// The permission state observed at authorization time
        state: PermissionState,
    },

    /// Fetching the remote asset into the local cache failed
    #[error("failed to fetch {url}: {reason}")]
    Fetch {
        /// The remote asset URL
        url: String,
        /// Description of the transport or HTTP failure
        reason: String,
    },

    /// The media store rejected the cached asset
    #[error("failed to commit {path} to the collection: {reason}")]
    Commit {
        /// The cached file that could not be committed
        path: PathBuf,
        /// The reason reported by the media store
        reason: String,
    },
}

impl DownloadError {
    /// The pipeline stage this error occurred in
    pub fn stage(&self) -> Stage {
        match self {
            DownloadError::Authorize { .. } => Stage::Authorize,
            DownloadError::Fetch { .. } => Stage::Fetch,
            DownloadError::Commit { .. } => Stage::Commit,
        }
    }

    /// Whether this failure should be surfaced as a permission problem
    ///
    /// The display layer distinguishes "enable media access" prompts from
    /// generic "something went wrong" notices; everything past the authorize
    /// stage is the latter.
    pub fn is_permission(&self) -> bool {
        matches!(self, DownloadError::Authorize { .. })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn download_error_reports_its_stage() {
        let authorize = DownloadError::Authorize {
            state: PermissionState::Denied,
        };
        assert_eq!(authorize.stage(), Stage::Authorize);
        assert!(authorize.is_permission());

        let fetch = DownloadError::Fetch {
            url: "https://example.com/a.jpg".to_string(),
            reason: "HTTP 404".to_string(),
        };
        assert_eq!(fetch.stage(), Stage::Fetch);
        assert!(!fetch.is_permission());

        let commit = DownloadError::Commit {
            path: PathBuf::from("/tmp/a.jpg"),
            reason: "unsupported format".to_string(),
        };
        assert_eq!(commit.stage(), Stage::Commit);
        assert!(!commit.is_permission());
    }

    #[test]
    fn provider_error_reports_its_provider() {
        let err = ProviderError::Status {
            provider: ProviderKind::Dog,
            status: 503,
        };
        assert_eq!(err.provider(), ProviderKind::Dog);
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn all_providers_failed_counts_failures() {
        let err = Error::AllProvidersFailed {
            failures: vec![
                ProviderError::Status {
                    provider: ProviderKind::Dog,
                    status: 500,
                },
                ProviderError::Shape {
                    provider: ProviderKind::Cat,
                    reason: "not a JSON array".to_string(),
                },
            ],
        };
        assert!(err.to_string().contains("all 2 providers failed"));
    }
}
