//! Version Dropdown Component
//!
//! Version badge with a list of committed versions. Open/closed is local to
//! the component; it closes on selection or when focus leaves it.

use chrono::Local;
use leptos::html::Div;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use draft_core::Version;

fn version_label(version: &Version) -> String {
    version
        .created_at()
        .map(|at| at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

#[component]
pub fn VersionDropdown(
    #[prop(into)] versions: Signal<Vec<Version>>,
    /// Number on the badge
    #[prop(into)] badge: Signal<u32>,
    #[prop(into)] viewing: Signal<Option<u32>>,
    #[prop(into)] on_select: Callback<u32>,
    #[prop(into)] on_exit_view: Callback<()>,
) -> impl IntoView {
    let (open, set_open) = signal(false);
    let container = NodeRef::<Div>::new();

    let title = move || match (versions.with(Vec::is_empty), viewing.get()) {
        (true, _) => format!("Version {} (not locked yet)", badge.get()),
        (false, Some(n)) => format!("v{} (viewing v{})", badge.get(), n),
        (false, None) => format!("v{}", badge.get()),
    };

    // Focus moving to something outside the container closes the list
    let on_focusout = move |ev: web_sys::FocusEvent| {
        let next = ev.related_target().and_then(|t| t.dyn_into::<web_sys::Node>().ok());
        let inside = match (container.get(), next) {
            (Some(el), Some(node)) => el.contains(Some(&node)),
            _ => false,
        };
        if !inside {
            set_open.set(false);
        }
    };

    view! {
        <div class="version-dropdown-container" node_ref=container on:focusout=on_focusout>
            <button
                class="btn-header btn-version"
                title=title
                on:click=move |_| set_open.update(|o| *o = !*o)
            >
                <span class="version-label">{move || format!("v{}", badge.get())}</span>
            </button>
            <Show when=move || open.get()>
                <div class="version-dropdown">
                    <div class="version-dropdown-header">"Versions"</div>
                    <Show
                        when=move || versions.with(|v| !v.is_empty())
                        fallback=|| view! {
                            <div class="version-item version-placeholder">
                                <span class="version-number">"v1"</span>
                                <span class="version-date">"Not locked yet"</span>
                            </div>
                        }
                    >
                        {move || versions.get().into_iter().map(|version| {
                            let number = version.version_number;
                            let label = version_label(&version);
                            let class = move || {
                                if viewing.get() == Some(number) { "version-item active" } else { "version-item" }
                            };
                            view! {
                                <button
                                    class=class
                                    on:click=move |_| {
                                        on_select.run(number);
                                        set_open.set(false);
                                    }
                                >
                                    <span class="version-number">{format!("v{}", number)}</span>
                                    <span class="version-date">{label}</span>
                                </button>
                            }
                        }).collect_view()}
                        <Show when=move || viewing.get().is_some()>
                            <button
                                class="version-item version-exit"
                                on:click=move |_| {
                                    on_exit_view.run(());
                                    set_open.set(false);
                                }
                            >
                                "Back to latest"
                            </button>
                        </Show>
                    </Show>
                </div>
            </Show>
        </div>
    }
}
