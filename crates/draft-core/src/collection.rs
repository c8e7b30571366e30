//! Collection Manager
//!
//! The ordered list of draft items. Always holds at least one item.

use std::collections::HashSet;

use crate::clock::Clock;
use crate::error::{DraftError, DraftResult};
use crate::item::{Item, ItemId, LockOutcome};
use crate::settings::Settings;

/// Every operation the UI can ask for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add,
    Remove(ItemId),
    /// Array move: take the item at `from`, insert it at `to`
    Reorder { from: usize, to: usize },
    /// Replace everything with a fresh default collection
    ClearAll,
    UpdateText { id: ItemId, text: String },
    EnterEditMode(ItemId),
    ExitEditMode(ItemId),
    LockChanges(ItemId),
    ToggleApproved(ItemId),
    SwitchToVersion { id: ItemId, version: u32 },
    ExitVersionView(ItemId),
    ToggleDiff(ItemId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Drafts {
    items: Vec<Item>,
}

impl Default for Drafts {
    fn default() -> Self {
        Self::with_defaults(Settings::default().default_item_count)
    }
}

impl Drafts {
    /// `count` empty items with ids `1..=count` (at least one)
    pub fn with_defaults(count: usize) -> Self {
        let count = u32::try_from(count.max(1)).unwrap_or(u32::MAX);
        Self { items: (1..=count).map(Item::new).collect() }
    }

    /// Wrap loaded items; `None` when there are none.
    pub fn from_items(items: Vec<Item>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self { items })
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(Item::id).collect()
    }

    /// One past the largest id in use. Once that would overflow, the lowest
    /// id not in use.
    pub fn next_id(&self) -> Option<ItemId> {
        let max = self.items.iter().map(Item::id).max().unwrap_or(0);
        max.checked_add(1).or_else(|| {
            let used: HashSet<ItemId> = self.items.iter().map(Item::id).collect();
            (1..=ItemId::MAX).find(|id| !used.contains(id))
        })
    }

    pub fn can_remove(&self) -> bool {
        self.items.len() > 1
    }

    // ========================
    // Collection operations
    // ========================

    pub fn add(&mut self) -> DraftResult<ItemId> {
        let id = self.next_id().ok_or(DraftError::IdsExhausted)?;
        self.items.push(Item::new(id));
        Ok(id)
    }

    pub fn remove(&mut self, id: ItemId) -> DraftResult<()> {
        let index = self.position(id).ok_or(DraftError::ItemNotFound(id))?;
        if !self.can_remove() {
            return Err(DraftError::LastItem);
        }
        self.items.remove(index);
        Ok(())
    }

    pub fn reorder(&mut self, from: usize, to: usize) -> DraftResult<()> {
        let len = self.items.len();
        for index in [from, to] {
            if index >= len {
                return Err(DraftError::IndexOutOfRange { index, len });
            }
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        Ok(())
    }

    pub fn clear_all(&mut self, count: usize) {
        *self = Self::with_defaults(count);
    }

    pub fn update_text(&mut self, id: ItemId, text: String) -> DraftResult<()> {
        self.item_mut(id)?.set_text(text)
    }

    fn item_mut(&mut self, id: ItemId) -> DraftResult<&mut Item> {
        self.items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or(DraftError::ItemNotFound(id))
    }

    // ========================
    // Snapshot application
    // ========================

    /// Apply `action` to a copy and return the new snapshot. On error the
    /// original is untouched.
    pub fn apply(&self, action: Action, clock: &impl Clock, settings: &Settings) -> DraftResult<Self> {
        let mut next = self.clone();
        match action {
            Action::Add => {
                let id = next.add()?;
                tracing::debug!(id, "added item");
            }
            Action::Remove(id) => next.remove(id)?,
            Action::Reorder { from, to } => next.reorder(from, to)?,
            Action::ClearAll => {
                next.clear_all(settings.default_item_count);
                tracing::info!(count = next.len(), "cleared collection");
            }
            Action::UpdateText { id, text } => next.update_text(id, text)?,
            Action::EnterEditMode(id) => next.item_mut(id)?.enter_edit_mode(),
            Action::ExitEditMode(id) => next.item_mut(id)?.exit_edit_mode(),
            Action::LockChanges(id) => match next.item_mut(id)?.lock_changes(clock.now_millis()) {
                LockOutcome::Locked(version) => tracing::debug!(id, version, "item locked"),
                LockOutcome::Unlocked => tracing::debug!(id, "item unlocked"),
            },
            Action::ToggleApproved(id) => next.item_mut(id)?.toggle_approved(),
            Action::SwitchToVersion { id, version } => next.item_mut(id)?.switch_to_version(version)?,
            Action::ExitVersionView(id) => next.item_mut(id)?.exit_version_view(),
            Action::ToggleDiff(id) => next.item_mut(id)?.toggle_diff(),
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn apply(drafts: &Drafts, action: Action) -> DraftResult<Drafts> {
        drafts.apply(action, &ManualClock::new(0), &Settings::default())
    }

    #[test]
    fn test_defaults() {
        let drafts = Drafts::default();
        assert_eq!(drafts.ids(), (1..=8).collect::<Vec<_>>());
        assert_eq!(Drafts::with_defaults(0).len(), 1);
    }

    #[test]
    fn test_add_uses_max_plus_one() {
        let mut drafts = Drafts::with_defaults(3);
        drafts.remove(2).unwrap();
        assert_eq!(drafts.add().unwrap(), 4);
        drafts.reorder(2, 0).unwrap();
        assert_eq!(drafts.add().unwrap(), 5);
    }

    #[test]
    fn test_add_after_max_id_takes_lowest_free() {
        let items = vec![Item::new(ItemId::MAX), Item::new(1), Item::new(3)];
        let mut drafts = Drafts::from_items(items).unwrap();

        assert_eq!(drafts.add().unwrap(), 2);
        assert_eq!(drafts.add().unwrap(), 4);
        assert_eq!(drafts.ids(), vec![ItemId::MAX, 1, 3, 2, 4]);
    }

    #[test]
    fn test_add_never_duplicates_max_id() {
        let mut drafts = Drafts::from_items(vec![Item::new(ItemId::MAX)]).unwrap();
        let next = apply(&drafts, Action::Add).unwrap();
        assert_eq!(next.ids(), vec![ItemId::MAX, 1]);

        drafts.add().unwrap();
        assert_eq!(drafts.ids(), next.ids());
    }

    #[test]
    fn test_remove_floor() {
        let mut drafts = Drafts::with_defaults(1);
        assert!(matches!(drafts.remove(1), Err(DraftError::LastItem)));
        assert_eq!(drafts.len(), 1);
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut drafts = Drafts::with_defaults(2);
        assert!(matches!(drafts.remove(9), Err(DraftError::ItemNotFound(9))));
        assert_eq!(drafts.len(), 2);
    }

    #[test]
    fn test_reorder_is_array_move() {
        let mut drafts = Drafts::with_defaults(4);
        drafts.reorder(0, 2).unwrap();
        assert_eq!(drafts.ids(), vec![2, 3, 1, 4]);
        drafts.reorder(3, 0).unwrap();
        assert_eq!(drafts.ids(), vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_reorder_out_of_range() {
        let mut drafts = Drafts::with_defaults(2);
        assert!(matches!(
            drafts.reorder(0, 2),
            Err(DraftError::IndexOutOfRange { index: 2, len: 2 })
        ));
        assert_eq!(drafts.ids(), vec![1, 2]);
    }

    #[test]
    fn test_reorder_keeps_item_state() {
        let drafts = Drafts::with_defaults(3);
        let drafts = apply(&drafts, Action::UpdateText { id: 1, text: "first".into() }).unwrap();
        let drafts = apply(&drafts, Action::LockChanges(1)).unwrap();
        let moved = apply(&drafts, Action::Reorder { from: 0, to: 2 }).unwrap();

        assert_eq!(moved.get(1), drafts.get(1));
        assert_eq!(moved.position(1), Some(2));
    }

    #[test]
    fn test_apply_leaves_source_snapshot_alone() {
        let drafts = Drafts::with_defaults(2);
        let next = apply(&drafts, Action::LockChanges(1)).unwrap();

        assert_eq!(drafts.get(1).unwrap().history().len(), 0);
        assert_eq!(next.get(1).unwrap().history().len(), 1);
    }

    #[test]
    fn test_apply_error_on_unknown_item() {
        let drafts = Drafts::with_defaults(2);
        for action in [
            Action::EnterEditMode(7),
            Action::LockChanges(7),
            Action::ToggleDiff(7),
            Action::SwitchToVersion { id: 7, version: 1 },
        ] {
            assert!(matches!(apply(&drafts, action), Err(DraftError::ItemNotFound(7))));
        }
    }

    #[test]
    fn test_clear_all_resets() {
        let mut drafts = Drafts::with_defaults(2);
        drafts.add().unwrap();
        drafts.update_text(1, "something".into()).unwrap();
        let cleared = apply(&drafts, Action::ClearAll).unwrap();
        assert_eq!(cleared, Drafts::default());
    }
}
