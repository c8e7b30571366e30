//! Tweet Card Component
//!
//! One post: version badge, lock toggle, text or diff, and footer actions.
//! Reads its item from the store by id so typing never remounts the card.

use leptos::prelude::*;

use draft_core::{Action, DiffSegment, Drafts, Item, ItemId, Phase};

use crate::components::{CharCounter, DeleteConfirmButton, DiffView, EditControls, VersionDropdown};
use crate::context::use_app_context;
use crate::store::AppStateStoreFields;

/// Reactive view of one property of the card's item (default once deleted)
fn project<T, F>(item: Memo<Option<Item>>, f: F) -> impl Fn() -> T + Copy + Send + Sync + 'static
where
    T: Default,
    F: Fn(&Item) -> T + Copy + Send + Sync + 'static,
{
    move || item.with(|item| item.as_ref().map(f).unwrap_or_default())
}

fn phase_class(phase: Phase) -> &'static str {
    match phase {
        Phase::Fresh => "phase-fresh",
        Phase::Editing => "phase-editing",
        Phase::Locked => "phase-locked",
        Phase::Unlocked => "phase-unlocked",
        Phase::ViewingVersion => "phase-viewing",
    }
}

fn lock_title(item: &Item) -> &'static str {
    if item.is_locked() && !item.is_editing() {
        "Unlock Tweet"
    } else if !item.is_editable() {
        "Lock Changes (Start typing or click Edit first)"
    } else if item.is_viewing() {
        "Lock Changes (Exit version view first)"
    } else {
        "Lock Changes"
    }
}

fn diff_title(item: &Item) -> &'static str {
    if item.history().is_empty() {
        "Show Diff (No versions available)"
    } else if !item.diff_available() {
        "Show Diff (Need at least 2 versions)"
    } else if item.show_diff() {
        "Hide Diff"
    } else {
        "Show Diff"
    }
}

fn edit_title(item: &Item) -> &'static str {
    if item.is_viewing() {
        "Edit Tweet (Exit version view first)"
    } else if item.is_editable() {
        "Edit Tweet (Exit edit mode first)"
    } else {
        "Edit Tweet"
    }
}

#[component]
pub fn TweetCard(id: ItemId, index: usize) -> impl IntoView {
    let ctx = use_app_context();
    let settings = ctx.store.settings().get_untracked();

    let item = Memo::new(move |_| ctx.item(id));
    let diff = Memo::new(move |_| {
        item.with(|item| item.as_ref().and_then(|i| i.visible_diff().map(<[DiffSegment]>::to_vec)))
    });
    let versions = Memo::new(move |_| {
        item.with(|item| item.as_ref().map(|i| i.history().as_slice().to_vec()).unwrap_or_default())
    });

    let text = project(item, |i| i.text().to_string());
    let viewing = project(item, Item::is_viewing);
    let viewing_version = project(item, Item::viewing_version);
    let badge = project(item, Item::display_version);
    let editable = project(item, Item::is_editable);
    let editing = project(item, Item::is_editing);
    let locked_idle = project(item, |i| i.is_locked() && !i.is_editing());
    let approved = project(item, Item::is_approved);
    let lock_enabled = project(item, |i| i.is_lockable() || i.is_unlockable());
    let diff_available = project(item, Item::diff_available);
    let phase = project(item, |i| phase_class(i.phase()));
    let max_characters = settings.max_characters;
    let remaining = project(item, move |i| i.remaining_chars(max_characters));
    let can_remove = move || ctx.store.drafts().with(Drafts::can_remove);

    let card_class = move || format!("tweet-header {}", phase());

    view! {
        <div class=card_class>
            <div class="tweet-content-wrapper">
                <div class="tweet-meta">
                    <div class="tweet-author">
                        <span class="tweet-name">{format!("Tweet {}", index + 1)}</span>
                    </div>
                    <div class="tweet-header-actions">
                        <VersionDropdown
                            versions=Signal::from(versions)
                            badge=Signal::derive(badge)
                            viewing=Signal::derive(viewing_version)
                            on_select=move |version: u32| ctx.dispatch(Action::SwitchToVersion { id, version })
                            on_exit_view=move |_| ctx.dispatch(Action::ExitVersionView(id))
                        />
                        <button
                            class=move || if locked_idle() { "btn-header btn-lock locked" } else { "btn-header btn-lock" }
                            title=move || item.with(|i| i.as_ref().map_or("", lock_title))
                            disabled=move || !lock_enabled()
                            on:click=move |_| ctx.dispatch(Action::LockChanges(id))
                        >
                            {move || if locked_idle() { "🔒" } else { "🔓" }}
                        </button>
                    </div>
                </div>

                <div class="tweet-text-container">
                    <Show
                        when=move || diff.with(Option::is_none)
                        fallback=move || view! { <DiffView segments=diff.get().unwrap_or_default() /> }
                    >
                        <textarea
                            class="tweet-input"
                            placeholder=format!("Tweet {}", index + 1)
                            prop:value=text
                            disabled=move || !editable() || viewing()
                            readonly=viewing
                            on:input=move |ev| {
                                ctx.dispatch(Action::UpdateText { id, text: event_target_value(&ev) })
                            }
                        />
                    </Show>
                </div>

                <Show when=editing>
                    <EditControls on_cancel=move |_| ctx.dispatch(Action::ExitEditMode(id)) />
                </Show>

                <div class="tweet-footer">
                    <div class="tweet-footer-actions">
                        <button
                            class=move || if approved() { "btn-footer btn-approve approved" } else { "btn-footer btn-approve" }
                            title=move || if approved() { "Unapprove Tweet" } else { "Approve Tweet" }
                            disabled=viewing
                            on:click=move |_| ctx.dispatch(Action::ToggleApproved(id))
                        >
                            "✓"
                        </button>
                        <button
                            class="btn-footer btn-edit"
                            title=move || item.with(|i| i.as_ref().map_or("", edit_title))
                            disabled=move || viewing() || editable()
                            on:click=move |_| ctx.dispatch(Action::EnterEditMode(id))
                        >
                            "✎"
                        </button>
                        <button
                            class="btn-footer btn-diff"
                            title=move || item.with(|i| i.as_ref().map_or("", diff_title))
                            disabled=move || !diff_available()
                            on:click=move |_| ctx.dispatch(Action::ToggleDiff(id))
                        >
                            "±"
                        </button>
                        <DeleteConfirmButton
                            disabled=Signal::derive(move || !can_remove())
                            on_confirm=move |_| ctx.dispatch(Action::Remove(id))
                        />
                    </div>

                    <CharCounter
                        remaining=Signal::derive(remaining)
                        warning_threshold=settings.warning_threshold
                    />
                </div>
            </div>
        </div>
    }
}
