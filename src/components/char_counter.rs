//! Character Counter Component

use leptos::prelude::*;

/// Remaining-character count with warning and over-limit styling
#[component]
pub fn CharCounter(
    #[prop(into)] remaining: Signal<i64>,
    warning_threshold: usize,
) -> impl IntoView {
    let threshold = i64::try_from(warning_threshold).unwrap_or(i64::MAX);
    let state_class = move || {
        let left = remaining.get();
        if left < 0 {
            " over-limit"
        } else if left <= threshold {
            " warning"
        } else {
            ""
        }
    };

    view! {
        <div class="tweet-stats">
            <span class=move || format!("char-count{}", state_class())>{move || remaining.get()}</span>
            <svg class=move || format!("char-circle{}", state_class()) width="20" height="20" viewBox="0 0 20 20">
                <circle cx="10" cy="10" r="8.5" fill="none" stroke-width="2" />
            </svg>
        </div>
    }
}
