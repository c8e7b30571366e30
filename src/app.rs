//! Thread Drafter App
//!
//! Header, controls and the sortable list of post cards.

use leptos::prelude::*;
use reactive_stores::Store;

use draft_core::{DraftStore, Settings, SystemClock};

use crate::components::{ControlsBar, LogPanel, TweetList};
use crate::context::AppContext;
use crate::storage::BrowserStorage;
use crate::store::{AppState, AppStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let settings = Settings::default();
    let engine = DraftStore::open(BrowserStorage::open(), SystemClock, settings.clone());
    let store = Store::new(AppState {
        drafts: engine.snapshot().clone(),
        settings,
    });

    // Provide context to all children
    provide_context(store);
    provide_context(AppContext::new(engine, store));

    let summary = move || {
        store.drafts().with(|drafts| {
            let approved = drafts.items().iter().filter(|item| item.is_approved()).count();
            let locked = drafts.items().iter().filter(|item| item.is_locked()).count();
            format!("{} tweets, {} locked, {} approved", drafts.len(), locked, approved)
        })
    };

    view! {
        <div class="app">
            <header class="header">
                <h1>"Thread Drafter"</h1>
                <p class="subtitle">"Draft, lock and compare every post in your thread"</p>
            </header>

            <ControlsBar />

            <TweetList />

            <footer class="footer">
                <p class="item-count">{summary}</p>
                <p>"Your tweets are automatically saved to your browser"</p>
                <LogPanel />
            </footer>
        </div>
    }
}
