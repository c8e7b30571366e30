//! Thread Scenarios
//!
//! End-to-end action sequences through `DraftStore` with an in-memory store.

#[cfg(test)]
mod tests {
    use crate::{
        Action, DiffSegment, DraftError, DraftStore, Drafts, ItemId, ManualClock, MemoryStore,
        Mode, Settings,
    };

    fn open() -> DraftStore<MemoryStore, ManualClock> {
        DraftStore::open(MemoryStore::new(), ManualClock::new(1_700_000_000_000), Settings::default())
    }

    fn run(store: &mut DraftStore<MemoryStore, ManualClock>, actions: Vec<Action>) {
        for action in actions {
            store.dispatch(action).expect("action should apply");
        }
    }

    fn text(id: ItemId, text: &str) -> Action {
        Action::UpdateText { id, text: text.to_string() }
    }

    #[test]
    fn test_lock_empty_item_commits_empty_version() {
        let mut store = DraftStore::open(
            MemoryStore::new(),
            ManualClock::new(0),
            Settings { default_item_count: 1, ..Settings::default() },
        );

        let snapshot = store.dispatch(Action::LockChanges(1)).unwrap();
        let item = snapshot.get(1).unwrap();

        assert!(item.is_locked());
        assert_eq!(item.history().len(), 1);
        assert_eq!(item.history().find(1).unwrap().text, "");
    }

    #[test]
    fn test_two_versions_then_diff() {
        let mut store = open();
        run(
            &mut store,
            vec![
                text(1, "hello world"),
                Action::LockChanges(1),
                Action::EnterEditMode(1),
                text(1, "hello there world"),
                Action::LockChanges(1),
            ],
        );
        // Second lock happened while still flagged locked: that only unlocks
        let item = store.snapshot().get(1).unwrap();
        assert_eq!(item.history().len(), 1);
        assert!(!item.is_locked());

        let snapshot = store.dispatch(Action::LockChanges(1)).unwrap();
        assert_eq!(snapshot.get(1).unwrap().history().len(), 2);

        let snapshot = store.dispatch(Action::ToggleDiff(1)).unwrap();
        let item = snapshot.get(1).unwrap();
        assert!(item.show_diff());
        assert_eq!(
            item.visible_diff().unwrap(),
            &[
                DiffSegment::unchanged("hello"),
                DiffSegment::unchanged(" "),
                DiffSegment::added("there "),
                DiffSegment::unchanged("world"),
            ]
        );
    }

    #[test]
    fn test_unlock_edit_relock_path() {
        let mut store = open();
        run(
            &mut store,
            vec![
                text(1, "hello world"),
                Action::LockChanges(1),
                Action::LockChanges(1),
                text(1, "hello there world"),
                Action::LockChanges(1),
            ],
        );
        let item = store.snapshot().get(1).unwrap();
        assert_eq!(item.history().len(), 2);
        assert_eq!(item.history().find(2).unwrap().text, "hello there world");
        assert_eq!(item.original_text(), Some("hello world"));
    }

    #[test]
    fn test_first_version_diffs_against_original() {
        let mut store = open();
        run(
            &mut store,
            vec![
                text(1, "draft one"),
                Action::EnterEditMode(1),
                text(1, "draft two"),
                Action::LockChanges(1),
                Action::LockChanges(1),
                text(1, "draft three"),
                Action::LockChanges(1),
                Action::SwitchToVersion { id: 1, version: 1 },
                Action::ToggleDiff(1),
            ],
        );
        let item = store.snapshot().get(1).unwrap();
        assert_eq!(item.mode(), Mode::Viewing { version: 1 });
        assert_eq!(
            item.visible_diff().unwrap(),
            &[
                DiffSegment::unchanged("draft"),
                DiffSegment::unchanged(" "),
                DiffSegment::removed("one"),
                DiffSegment::added("two"),
            ]
        );
    }

    #[test]
    fn test_viewing_middle_version_diffs_against_previous() {
        let mut store = open();
        run(
            &mut store,
            vec![
                text(1, "hello world"),
                Action::LockChanges(1),
                Action::LockChanges(1),
                text(1, "hello there world"),
                Action::LockChanges(1),
                Action::LockChanges(1),
                text(1, "hello there big world"),
                Action::LockChanges(1),
                Action::SwitchToVersion { id: 1, version: 2 },
                Action::ToggleDiff(1),
            ],
        );
        let item = store.snapshot().get(1).unwrap();
        assert_eq!(item.history().len(), 3);
        assert_eq!(item.display_version(), 3);
        assert_eq!(item.mode(), Mode::Viewing { version: 2 });
        assert_eq!(item.text(), "hello there world");
        assert_eq!(
            item.visible_diff().unwrap(),
            &[
                DiffSegment::unchanged("hello"),
                DiffSegment::unchanged(" "),
                DiffSegment::added("there "),
                DiffSegment::unchanged("world"),
            ]
        );
    }

    #[test]
    fn test_switch_to_version_twice_is_stable() {
        let mut store = open();
        run(
            &mut store,
            vec![
                text(2, "a"),
                Action::LockChanges(2),
                Action::LockChanges(2),
                text(2, "b"),
                Action::LockChanges(2),
                Action::SwitchToVersion { id: 2, version: 1 },
            ],
        );
        let first = store.snapshot().clone();
        store.dispatch(Action::SwitchToVersion { id: 2, version: 1 }).unwrap();

        assert_eq!(store.snapshot(), &first);
        assert_eq!(first.get(2).unwrap().text(), "a");
    }

    #[test]
    fn test_switch_to_missing_version_is_noop() {
        let mut store = open();
        run(&mut store, vec![Action::LockChanges(3)]);
        let before = store.snapshot().clone();

        let err = store.dispatch(Action::SwitchToVersion { id: 3, version: 2 }).unwrap_err();
        assert!(matches!(err, DraftError::VersionNotFound { id: 3, version: 2 }));
        assert!(err.is_refusal());
        assert_eq!(store.snapshot(), &before);
    }

    #[test]
    fn test_add_and_remove_ids() {
        let mut store = open();
        let snapshot = store.dispatch(Action::Add).unwrap();
        assert_eq!(snapshot.ids().last(), Some(&9));

        let snapshot = store.dispatch(Action::Remove(5)).unwrap();
        assert_eq!(snapshot.ids(), vec![1, 2, 3, 4, 6, 7, 8, 9]);
    }

    #[test]
    fn test_remove_last_item_refused() {
        let mut store = DraftStore::open(
            MemoryStore::new(),
            ManualClock::new(0),
            Settings { default_item_count: 1, ..Settings::default() },
        );
        assert!(matches!(store.dispatch(Action::Remove(1)), Err(DraftError::LastItem)));
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn test_versions_never_shrink() {
        let mut store = open();
        let mut last_len = 0;
        let actions = vec![
            Action::LockChanges(1),
            Action::LockChanges(1),
            Action::EnterEditMode(1),
            Action::ExitEditMode(1),
            Action::LockChanges(1),
            Action::SwitchToVersion { id: 1, version: 1 },
            Action::ExitVersionView(1),
            Action::ToggleDiff(1),
            Action::LockChanges(1),
            Action::Reorder { from: 0, to: 7 },
        ];
        for action in actions {
            let snapshot = store.dispatch(action).unwrap();
            let len = snapshot.get(1).unwrap().history().len();
            assert!(len >= last_len);
            last_len = len;
        }
        assert_eq!(last_len, 2);
    }

    #[test]
    fn test_state_survives_reopen() {
        let store_backend = MemoryStore::new();
        {
            let mut store =
                DraftStore::open(&store_backend, ManualClock::new(5), Settings::default());
            store.dispatch(text(4, "persist me")).unwrap();
            store.dispatch(Action::LockChanges(4)).unwrap();
            store.dispatch(Action::ToggleApproved(4)).unwrap();
            store.dispatch(Action::Reorder { from: 3, to: 0 }).unwrap();
        }

        let reopened = DraftStore::open(&store_backend, ManualClock::new(0), Settings::default());
        let drafts: &Drafts = reopened.snapshot();
        assert_eq!(drafts.ids()[0], 4);
        let item = drafts.get(4).unwrap();
        assert!(item.is_locked());
        assert!(item.is_approved());
        assert_eq!(item.history().latest().unwrap().timestamp, 5);
    }

    #[test]
    fn test_clear_all_after_edits() {
        let mut store = open();
        run(&mut store, vec![text(1, "x"), Action::LockChanges(1), Action::Add, Action::ClearAll]);
        assert_eq!(store.snapshot(), &Drafts::default());
    }
}
