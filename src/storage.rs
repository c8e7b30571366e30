//! Browser Storage
//!
//! `localStorage` backend for the draft store.

use draft_core::{storage_error, DraftError, DraftResult, KeyValueStore};

pub struct BrowserStorage {
    storage: Option<web_sys::Storage>,
}

impl BrowserStorage {
    /// Attach to `window.localStorage`. Without it (private mode, sandboxed
    /// iframe) reads miss and writes fail, which the store tolerates.
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|win| win.local_storage().ok().flatten());
        if storage.is_none() {
            tracing::warn!("[STORAGE] localStorage unavailable, drafts will not persist");
        }
        Self { storage }
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> DraftResult<()> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| DraftError::Storage("localStorage unavailable".to_string()))?;
        storage.set_item(key, value).map_err(|e| storage_error("setItem", e))
    }
}
