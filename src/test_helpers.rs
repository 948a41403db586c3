//! Shared test doubles for unit tests

use crate::error::ProviderError;
use crate::platform::{AssetHandle, Authorization, MediaStore};
use crate::provider::MediaProvider;
use crate::types::{FeedItem, ItemId, ProviderKind};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Scripted response for one authorization prompt
#[derive(Clone, Copy, Debug)]
pub(crate) enum AuthResponse {
    Grant,
    Deny,
    Fail,
}

/// Media store double with scriptable prompts and call recording
pub(crate) struct MockMediaStore {
    script: Mutex<VecDeque<AuthResponse>>,
    default_auth: AuthResponse,
    pub(crate) prompts: AtomicUsize,
    pub(crate) registered: Mutex<Vec<PathBuf>>,
    pub(crate) committed: Mutex<Vec<(String, String)>>,
    pub(crate) fail_register: AtomicBool,
    pub(crate) fail_commit: AtomicBool,
}

impl MockMediaStore {
    pub(crate) fn with_default(default_auth: AuthResponse) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            default_auth,
            prompts: AtomicUsize::new(0),
            registered: Mutex::new(Vec::new()),
            committed: Mutex::new(Vec::new()),
            fail_register: AtomicBool::new(false),
            fail_commit: AtomicBool::new(false),
        }
    }

    pub(crate) fn granting() -> Self {
        Self::with_default(AuthResponse::Grant)
    }

    pub(crate) fn denying() -> Self {
        Self::with_default(AuthResponse::Deny)
    }

    /// Queue responses consumed before the default kicks in
    pub(crate) fn script(self, responses: &[AuthResponse]) -> Self {
        self.script.lock().unwrap().extend(responses.iter().copied());
        self
    }

    pub(crate) fn prompt_count(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }

    pub(crate) fn register_count(&self) -> usize {
        self.registered.lock().unwrap().len()
    }

    pub(crate) fn commit_count(&self) -> usize {
        self.committed.lock().unwrap().len()
    }
}

#[async_trait]
impl MediaStore for MockMediaStore {
    async fn request_authorization(&self) -> crate::Result<Authorization> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        let response = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.default_auth);
        match response {
            AuthResponse::Grant => Ok(Authorization::Granted),
            AuthResponse::Deny => Ok(Authorization::Denied),
            AuthResponse::Fail => Err(crate::Error::Other("prompt service crashed".into())),
        }
    }

    async fn register_asset(&self, local_path: &Path) -> crate::Result<AssetHandle> {
        if self.fail_register.load(Ordering::SeqCst) {
            return Err(crate::Error::Other("unsupported format".into()));
        }
        self.registered
            .lock()
            .unwrap()
            .push(local_path.to_path_buf());
        Ok(AssetHandle {
            id: format!("asset-{}", self.register_count()),
            uri: local_path.to_path_buf(),
        })
    }

    async fn add_to_collection(&self, asset: &AssetHandle, collection: &str) -> crate::Result<()> {
        if self.fail_commit.load(Ordering::SeqCst) {
            return Err(crate::Error::Other("collection is read-only".into()));
        }
        self.committed
            .lock()
            .unwrap()
            .push((asset.id.clone(), collection.to_string()));
        Ok(())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Build `count` feed items with deterministic ids (`{tag}-{salt}-{index}`)
pub(crate) fn stub_items(kind: ProviderKind, salt: &str, count: usize) -> Vec<FeedItem> {
    (0..count)
        .map(|index| FeedItem {
            id: ItemId::new(format!("{}-{salt}-{index}", kind.tag())),
            source_url: format!("https://example.com/{}/{salt}/{index}.jpg", kind.tag()),
            provider: kind,
            display_label: None,
        })
        .collect()
}

/// Provider double returning canned batches
pub(crate) struct StubProvider {
    kind: ProviderKind,
    items: Vec<FeedItem>,
    fail: bool,
    hold: Option<Arc<Notify>>,
    pub(crate) calls: AtomicUsize,
}

impl StubProvider {
    pub(crate) fn returning(kind: ProviderKind, items: Vec<FeedItem>) -> Self {
        Self {
            kind,
            items,
            fail: false,
            hold: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing(kind: ProviderKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
            fail: true,
            hold: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Block each fetch until the notify is signalled (for gate tests)
    pub(crate) fn held_by(mut self, hold: Arc<Notify>) -> Self {
        self.hold = Some(hold);
        self
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaProvider for StubProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn fetch_batch(&self, _count: usize) -> Result<Vec<FeedItem>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(hold) = &self.hold {
            hold.notified().await;
        }
        if self.fail {
            return Err(ProviderError::Transport {
                provider: self.kind,
                reason: "stubbed transport failure".to_string(),
            });
        }
        Ok(self.items.clone())
    }
}
