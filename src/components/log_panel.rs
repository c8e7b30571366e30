//! Log Panel Component
//!
//! Collapsible view of the most recent log lines, for bug reports.

use leptos::prelude::*;

#[component]
pub fn LogPanel() -> impl IntoView {
    let (lines, set_lines) = signal(None::<Vec<String>>);

    let toggle = move |_| {
        set_lines.update(|lines| {
            *lines = match lines.take() {
                Some(_) => None,
                None => Some(rolling_logger::recent()),
            };
        });
    };

    view! {
        <div class="log-panel">
            <button class="btn btn-secondary btn-small" on:click=toggle>
                {move || if lines.with(Option::is_some) { "Hide activity log" } else { "Show activity log" }}
            </button>
            <Show when=move || lines.with(Option::is_some)>
                <pre class="log-lines">
                    {move || lines.get().unwrap_or_default().join("\n")}
                </pre>
            </Show>
        </div>
    }
}
