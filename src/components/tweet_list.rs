//! Tweet List Component
//!
//! Ordered cards with drag-to-reorder. Drop slots sit between cards; dropping
//! on a card takes that card's place.

use leptos::prelude::*;

use draft_core::Action;
use leptos_dragdrop::*;

use crate::components::TweetCard;
use crate::context::use_app_context;
use crate::store::AppStateStoreFields;

#[component]
pub fn TweetList() -> impl IntoView {
    let ctx = use_app_context();
    let dnd = create_dnd_signals();

    bind_global_handlers(dnd, move |dragged_id, target| {
        let order = ctx.store.drafts().with_untracked(|drafts| drafts.ids());
        match resolve_move(&order, dragged_id, target) {
            Some((from, to)) => {
                tracing::debug!("[DND] dragged={} from={} to={}", dragged_id, from, to);
                ctx.dispatch(Action::Reorder { from, to });
            }
            None => tracing::debug!("[DND] drop of {} on {:?} moves nothing", dragged_id, target),
        }
    });

    let rows = move || {
        ctx.store
            .drafts()
            .with(|drafts| drafts.ids().into_iter().enumerate().collect::<Vec<_>>())
    };
    let row_count = move || ctx.store.drafts().with(|drafts| drafts.len());

    view! {
        <div class="tweets-container">
            <For
                each=rows
                // Index is part of the key so placeholders and slots renumber after a move
                key=|(index, id)| (*index, *id)
                children=move |(index, id)| {
                    let on_mousedown = make_on_mousedown(dnd, id);
                    let on_mouseenter = make_on_item_mouseenter(dnd, id);
                    let on_mouseleave = make_on_mouseleave(dnd);

                    let row_class = move || {
                        let mut c = String::from("tweet-card");
                        if dnd.is_dragging_item(id) { c.push_str(" dragging"); }
                        if dnd.is_target(DropTarget::Item(id)) { c.push_str(" drop-target"); }
                        c
                    };

                    view! {
                        <DropSlot dnd=dnd slot_index=index />
                        <div class=row_class on:mouseenter=on_mouseenter on:mouseleave=on_mouseleave>
                            <div class="tweet-drag-handle" title="Drag to reorder" on:mousedown=on_mousedown>
                                "⠿"
                            </div>
                            <TweetCard id=id index=index />
                        </div>
                    }
                }
            />
            {move || view! { <DropSlot dnd=dnd slot_index=row_count() /> }}
        </div>
    }
}

/// Drop slot - a horizontal gap that accepts a dragged card
#[component]
pub fn DropSlot(dnd: DndSignals, slot_index: usize) -> impl IntoView {
    let on_mouseenter = make_on_slot_mouseenter(dnd, slot_index);
    let on_mouseleave = make_on_mouseleave(dnd);

    let slot_class = move || {
        let mut c = String::from("drop-zone");
        if !dnd.is_dragging() { c.push_str(" hidden"); }
        if dnd.is_target(DropTarget::Slot(slot_index)) { c.push_str(" active"); }
        c
    };

    view! {
        <div class=slot_class on:mouseenter=on_mouseenter on:mouseleave=on_mouseleave />
    }
}
