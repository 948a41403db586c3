//! Media collection permission gate
//!
//! Tracks device media-write authorization as a small state machine around
//! the platform's prompt. The cached state starts [`PermissionState::Unknown`]
//! and advances only through an explicit authorization request; see
//! [`PermissionState`] for the full lifecycle.

use crate::platform::{Authorization, MediaStore};
use crate::types::PermissionState;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Permission state machine shared by the read path and the download pipeline
///
/// The cached state lives behind an async mutex; holding the lock across the
/// platform call also serializes prompts, so concurrent callers can never
/// show the user two authorization dialogs.
pub struct PermissionGate {
    store: Arc<dyn MediaStore>,
    state: Mutex<PermissionState>,
}

impl PermissionGate {
    /// Create a gate over the given media store, starting at `Unknown`
    pub fn new(store: Arc<dyn MediaStore>) -> Self {
        Self {
            store,
            state: Mutex::new(PermissionState::Unknown),
        }
    }

    /// Current cached state, without prompting
    pub async fn status(&self) -> PermissionState {
        *self.state.lock().await
    }

    /// Resolve the permission state, prompting only if it was never asked
    ///
    /// `Granted` and `Denied` are returned from cache without re-prompting;
    /// this is the call for read paths that merely want to know where things
    /// stand (e.g., at screen mount).
    pub async fn check_or_request(&self) -> PermissionState {
        let mut state = self.state.lock().await;
        if *state == PermissionState::Unknown {
            *state = self.prompt().await;
        }
        *state
    }

    /// Resolve the permission state, re-prompting after an earlier denial
    ///
    /// The download pipeline calls this lazily on each attempt: the user may
    /// have enabled access in the device settings since the last denial, so
    /// `Denied` is re-queried. `Granted` is still served from cache; within a
    /// session it is never downgraded (an external revocation surfaces as a
    /// commit failure on the next write, not here).
    pub async fn recheck(&self) -> PermissionState {
        let mut state = self.state.lock().await;
        if *state != PermissionState::Granted {
            *state = self.prompt().await;
        }
        *state
    }

    /// Run the platform prompt and map the outcome to a terminal state
    ///
    /// A prompt that fails outright (rather than being denied) is treated as
    /// `Denied` conservatively.
    async fn prompt(&self) -> PermissionState {
        match self.store.request_authorization().await {
            Ok(Authorization::Granted) => {
                info!(store = %self.store.name(), "media collection access granted");
                PermissionState::Granted
            }
            Ok(Authorization::Denied) => {
                debug!(store = %self.store.name(), "media collection access denied");
                PermissionState::Denied
            }
            Err(e) => {
                warn!(store = %self.store.name(), error = %e, "authorization prompt failed, treating as denied");
                PermissionState::Denied
            }
        }
    }
}
