//! Controls Bar Component
//!
//! Add, clear and export actions for the whole thread.

use leptos::prelude::*;

use draft_core::{mailto_link, Action};

use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ControlsBar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let clear_all = move |_| {
        let confirmed = web_sys::window()
            .and_then(|win| win.confirm_with_message("Are you sure you want to clear all tweets?").ok())
            .unwrap_or(false);
        if confirmed {
            ctx.dispatch(Action::ClearAll);
        }
    };

    let export_to_email = move |_| {
        let settings = store.settings().get_untracked();
        let link = store
            .drafts()
            .with_untracked(|drafts| mailto_link(drafts.items(), &settings, ctx.today()));
        let Some(win) = web_sys::window() else { return };
        if let Err(e) = win.location().set_href(&link) {
            tracing::warn!("[EXPORT] could not open mail client: {:?}", e);
        }
    };

    view! {
        <div class="controls">
            <button class="btn btn-secondary" on:click=move |_| ctx.dispatch(Action::Add)>
                "➕ Add Tweet"
            </button>
            <button class="btn btn-secondary" on:click=clear_all>
                "🗑️ Clear All"
            </button>
            <button class="btn btn-primary" on:click=export_to_email>
                "📧 Export to Email"
            </button>
        </div>
    }
}
