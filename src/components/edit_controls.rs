//! Edit Controls Component

use leptos::prelude::*;

/// Shown under a card while it is in edit mode
#[component]
pub fn EditControls(#[prop(into)] on_cancel: Callback<()>) -> impl IntoView {
    view! {
        <div class="edit-mode-controls">
            <button class="btn btn-secondary btn-small" on:click=move |_| on_cancel.run(())>
                "Cancel"
            </button>
        </div>
    }
}
