//! Leptos DragDrop Utilities
//!
//! Mouse-event drag and drop for a flat, ordered list.
//! A drag starts only after the pointer moves past a small threshold, so a
//! plain click on the handle is still a click.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Where a dragged row would land
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropTarget {
    /// Onto another row: take that row's place
    Item(u32),
    /// Into the gap before row `n` (`n == len` is the end of the list)
    Slot(usize),
}

/// DnD state
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_id: RwSignal<Option<u32>>,
    pub drop_target: RwSignal<Option<DropTarget>>,
    /// Mousedown seen, threshold not yet crossed
    pub pending_id: RwSignal<Option<u32>>,
    pub start: RwSignal<(i32, i32)>,
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

pub fn create_dnd_signals() -> DndSignals {
    DndSignals {
        dragging_id: RwSignal::new(None),
        drop_target: RwSignal::new(None),
        pending_id: RwSignal::new(None),
        start: RwSignal::new((0, 0)),
    }
}

impl DndSignals {
    pub fn is_dragging(&self) -> bool {
        self.dragging_id.get().is_some()
    }

    pub fn is_dragging_item(&self, id: u32) -> bool {
        self.dragging_id.get() == Some(id)
    }

    pub fn is_target(&self, target: DropTarget) -> bool {
        self.drop_target.get() == Some(target)
    }

    fn reset(&self) {
        self.dragging_id.set(None);
        self.drop_target.set(None);
        self.pending_id.set(None);
    }
}

/// Array-move indices for dropping `dragged` on `target` within `order`.
///
/// `None` when nothing would move or an id is unknown.
pub fn resolve_move(order: &[u32], dragged: u32, target: DropTarget) -> Option<(usize, usize)> {
    let from = order.iter().position(|id| *id == dragged)?;
    let to = match target {
        DropTarget::Item(id) => order.iter().position(|other| *other == id)?,
        // Gap indices count the dragged row itself; removing it first shifts
        // every later gap down by one.
        DropTarget::Slot(slot) if slot > from => slot.min(order.len()) - 1,
        DropTarget::Slot(slot) => slot,
    };
    (from != to).then_some((from, to))
}

/// Mousedown on a drag handle: remember the row and pointer position
pub fn make_on_mousedown(dnd: DndSignals, item_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlTextAreaElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
        }
        ev.prevent_default();
        dnd.pending_id.set(Some(item_id));
        dnd.start.set((ev.client_x(), ev.client_y()));
    }
}

/// Mouseenter on a row
pub fn make_on_item_mouseenter(dnd: DndSignals, item_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        match dnd.dragging_id.get_untracked() {
            Some(dragging) if dragging != item_id => dnd.drop_target.set(Some(DropTarget::Item(item_id))),
            _ => {}
        }
    }
}

/// Mouseenter on the gap before row `slot`
pub fn make_on_slot_mouseenter(dnd: DndSignals, slot: usize) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id.get_untracked().is_some() {
            dnd.drop_target.set(Some(DropTarget::Slot(slot)));
        }
    }
}

pub fn make_on_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id.get_untracked().is_some() {
            dnd.drop_target.set(None);
        }
    }
}

/// Bind document-level mousemove (drag start) and mouseup (drop).
/// `on_drop` runs only for a real drag that ended over a target.
pub fn bind_global_handlers<F>(dnd: DndSignals, on_drop: F)
where
    F: Fn(u32, DropTarget) + 'static,
{
    use wasm_bindgen::closure::Closure;

    let Some(doc) = web_sys::window().and_then(|win| win.document()) else {
        return;
    };

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let pending = dnd.pending_id.get_untracked();
        if pending.is_none() || dnd.dragging_id.get_untracked().is_some() {
            return;
        }
        let (start_x, start_y) = dnd.start.get_untracked();
        let dx = (ev.client_x() - start_x).abs();
        let dy = (ev.client_y() - start_y).abs();
        if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
            dnd.dragging_id.set(pending);
        }
    });

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let dragged = dnd.dragging_id.get_untracked();
        let target = dnd.drop_target.get_untracked();
        dnd.reset();
        if let (Some(dragged), Some(target)) = (dragged, target) {
            on_drop(dragged, target);
        }
    });

    let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
    let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    on_mousemove.forget();
    on_mouseup.forget();
}
