//! Application Context
//!
//! Owns the draft store and publishes each new snapshot to the UI store.

use chrono::NaiveDate;
use leptos::prelude::*;

use draft_core::{Action, DraftStore, Drafts, Item, ItemId, SystemClock};

use crate::storage::BrowserStorage;
use crate::store::{AppStateStoreFields, AppStore};

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Browser-only, so kept in local (non-Send) storage
    engine: StoredValue<DraftStore<BrowserStorage, SystemClock>, LocalStorage>,
    pub store: AppStore,
}

impl AppContext {
    pub fn new(engine: DraftStore<BrowserStorage, SystemClock>, store: AppStore) -> Self {
        Self {
            engine: StoredValue::new_local(engine),
            store,
        }
    }

    /// Apply an action; refused actions leave the UI as it is.
    pub fn dispatch(&self, action: Action) {
        let label = format!("{:?}", action);
        let outcome = self
            .engine
            .try_update_value(|engine| engine.dispatch(action).map(Drafts::clone));
        match outcome {
            Some(Ok(snapshot)) => *self.store.drafts().write() = snapshot,
            Some(Err(e)) if e.is_refusal() => tracing::debug!("[APP] {} refused: {}", label, e),
            Some(Err(e)) => tracing::warn!("[APP] {} failed: {}", label, e),
            None => tracing::error!("[APP] draft store disposed, dropped {}", label),
        }
    }

    pub fn item(&self, id: ItemId) -> Option<Item> {
        self.store.drafts().with(|drafts| drafts.get(id).cloned())
    }

    pub fn today(&self) -> NaiveDate {
        use draft_core::Clock;
        self.engine
            .try_with_value(|engine| engine.clock().today())
            .unwrap_or_default()
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
