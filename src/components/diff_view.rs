//! Diff View Component

use leptos::prelude::*;

use draft_core::{DiffSegment, SegmentKind};

fn segment_class(kind: SegmentKind) -> &'static str {
    match kind {
        SegmentKind::Unchanged => "diff-segment diff-unchanged",
        SegmentKind::Added => "diff-segment diff-added",
        SegmentKind::Removed => "diff-segment diff-removed",
    }
}

/// Inline rendering of diff segments, colored by kind
#[component]
pub fn DiffView(segments: Vec<DiffSegment>) -> impl IntoView {
    view! {
        <div class="tweet-diff-view">
            {segments
                .into_iter()
                .map(|segment| view! { <span class=segment_class(segment.kind)>{segment.text}</span> })
                .collect_view()}
        </div>
    }
}
