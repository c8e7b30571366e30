//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use draft_core::{Drafts, Settings};

/// Rendered state. `drafts` is replaced wholesale after every action.
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Latest snapshot of the thread
    pub drafts: Drafts,
    pub settings: Settings,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}
