//! Item State Machine
//!
//! One draft post with its edit mode, lock flag and version history.
//!
//! `Mode` makes "editing" and "viewing a past version" mutually exclusive.
//! The lock flag stays separate because an item can be put back into edit
//! mode without being unlocked; locking again while still flagged is the
//! unlock half of the toggle.

use crate::diff::{compute_diff, DiffSegment};
use crate::error::{DraftError, DraftResult};
use crate::history::VersionHistory;

pub type ItemId = u32;

/// What the item is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Showing live text
    #[default]
    Idle,
    /// Live text is being edited
    Editing,
    /// Read-only display of a committed version
    Viewing { version: u32 },
}

/// Coarse lifecycle state, derived from mode, lock flag and history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Never locked, not editing
    Fresh,
    Editing,
    Locked,
    /// Has history but the lock was released
    Unlocked,
    ViewingVersion,
}

/// Result of a lock toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockOutcome {
    /// A new version with this number was committed
    Locked(u32),
    /// The lock flag was cleared; nothing else changed
    Unlocked,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: ItemId,
    text: String,
    original_text: Option<String>,
    mode: Mode,
    locked: bool,
    approved: bool,
    history: VersionHistory,
    show_diff: bool,
    diff: Option<Vec<DiffSegment>>,
}

impl Item {
    /// Empty, never-edited item
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            text: String::new(),
            original_text: None,
            mode: Mode::Idle,
            locked: false,
            approved: false,
            history: VersionHistory::new(),
            show_diff: false,
            diff: None,
        }
    }

    /// Reassemble an item from stored parts. A `Viewing` mode pointing at a
    /// missing version falls back to `Idle`.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn restore(
        id: ItemId,
        text: String,
        original_text: Option<String>,
        mode: Mode,
        locked: bool,
        approved: bool,
        history: VersionHistory,
        show_diff: bool,
        diff: Option<Vec<DiffSegment>>,
    ) -> Self {
        let mode = match mode {
            Mode::Viewing { version } if history.find(version).is_none() => Mode::Idle,
            other => other,
        };
        Self { id, text, original_text, mode, locked, approved, history, show_diff, diff }
    }

    // ========================
    // Accessors
    // ========================

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn original_text(&self) -> Option<&str> {
        self.original_text.as_deref()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == Mode::Editing
    }

    pub fn viewing_version(&self) -> Option<u32> {
        match self.mode {
            Mode::Viewing { version } => Some(version),
            Mode::Idle | Mode::Editing => None,
        }
    }

    pub fn is_viewing(&self) -> bool {
        self.viewing_version().is_some()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_approved(&self) -> bool {
        self.approved
    }

    pub fn history(&self) -> &VersionHistory {
        &self.history
    }

    pub fn show_diff(&self) -> bool {
        self.show_diff
    }

    /// Last computed diff, whether or not it is shown
    pub fn diff(&self) -> Option<&[DiffSegment]> {
        self.diff.as_deref()
    }

    /// Diff to render right now, if any
    pub fn visible_diff(&self) -> Option<&[DiffSegment]> {
        if self.show_diff {
            self.diff()
        } else {
            None
        }
    }

    pub fn phase(&self) -> Phase {
        match self.mode {
            Mode::Editing => Phase::Editing,
            Mode::Viewing { .. } => Phase::ViewingVersion,
            Mode::Idle if self.locked => Phase::Locked,
            Mode::Idle if self.history.is_empty() => Phase::Fresh,
            Mode::Idle => Phase::Unlocked,
        }
    }

    // ========================
    // Derived policy
    // ========================

    /// Blank text, no history, not locked
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.history.is_empty() && !self.locked
    }

    pub fn is_editable(&self) -> bool {
        self.is_editing() || self.is_empty() || !self.locked
    }

    pub fn is_lockable(&self) -> bool {
        self.is_editable() && !self.is_viewing()
    }

    /// Whether the lock control can release an existing lock
    pub fn is_unlockable(&self) -> bool {
        self.locked && !self.is_viewing()
    }

    pub fn diff_available(&self) -> bool {
        match self.history.len() {
            0 => false,
            1 => self.original_text.is_some(),
            _ => true,
        }
    }

    /// Number shown on the version badge: history length, or 1 before the
    /// first lock.
    pub fn display_version(&self) -> u32 {
        self.history.latest().map_or(1, |v| v.version_number)
    }

    /// Characters left under `max`; negative when over.
    pub fn remaining_chars(&self, max: usize) -> i64 {
        let used = self.text.chars().count();
        i64::try_from(max).unwrap_or(i64::MAX) - i64::try_from(used).unwrap_or(i64::MAX)
    }

    // ========================
    // Transitions
    // ========================

    /// Start editing. Seeds the text from the viewed version if one is shown.
    pub fn enter_edit_mode(&mut self) {
        let seed = match self.mode {
            Mode::Viewing { version } => self
                .history
                .find(version)
                .map_or_else(|| self.text.clone(), |v| v.text.clone()),
            Mode::Idle | Mode::Editing => self.text.clone(),
        };
        if self.original_text.is_none() {
            self.original_text = Some(seed.clone());
        }
        self.text = seed;
        self.mode = Mode::Editing;
        self.show_diff = false;
    }

    /// Stop editing and throw away uncommitted changes.
    ///
    /// While viewing a version this only re-syncs the text to that version.
    pub fn exit_edit_mode(&mut self) {
        let mode = self.mode;
        self.text = match mode {
            Mode::Viewing { version } => self
                .history
                .find(version)
                .map_or_else(|| self.committed_text(), |v| v.text.clone()),
            Mode::Editing | Mode::Idle => {
                self.mode = Mode::Idle;
                self.committed_text()
            }
        };
    }

    /// Lock toggle. Unlocked: commit the current text as a new version and
    /// lock. Locked: clear the lock flag only.
    ///
    /// No emptiness check happens here; callers gate with `is_lockable`.
    pub fn lock_changes(&mut self, now_millis: i64) -> LockOutcome {
        if self.locked {
            self.locked = false;
            return LockOutcome::Unlocked;
        }

        let version = self.history.append(self.text.clone(), now_millis);
        if self.original_text.is_none() {
            self.original_text = Some(self.text.clone());
        }
        self.locked = true;
        self.mode = Mode::Idle;
        self.show_diff = false;
        LockOutcome::Locked(version.version_number)
    }

    /// Show a committed version read-only.
    pub fn switch_to_version(&mut self, version_number: u32) -> DraftResult<()> {
        let version = self.history.find(version_number).ok_or(DraftError::VersionNotFound {
            id: self.id,
            version: version_number,
        })?;
        self.text = version.text.clone();
        self.mode = Mode::Viewing { version: version_number };
        self.show_diff = false;
        Ok(())
    }

    /// Leave version view and go back to the last committed text.
    pub fn exit_version_view(&mut self) {
        self.text = self.committed_text();
        self.mode = match self.mode {
            Mode::Viewing { .. } | Mode::Idle => Mode::Idle,
            Mode::Editing => Mode::Editing,
        };
        self.show_diff = false;
    }

    /// Flip diff visibility, recomputing the diff for the current context.
    pub fn toggle_diff(&mut self) {
        if let Some((from, to)) = self.diff_sources() {
            self.diff = Some(compute_diff(from, to));
        }
        self.show_diff = !self.show_diff;
    }

    pub fn toggle_approved(&mut self) {
        self.approved = !self.approved;
    }

    /// Replace the live text. Refused while read-only.
    pub fn set_text(&mut self, text: String) -> DraftResult<()> {
        if self.is_viewing() || !self.is_editable() {
            return Err(DraftError::ReadOnly(self.id));
        }
        self.text = text;
        Ok(())
    }

    /// Latest version's text, else the original, else the live text
    fn committed_text(&self) -> String {
        self.history
            .latest()
            .map(|v| v.text.as_str())
            .or(self.original_text.as_deref())
            .unwrap_or(&self.text)
            .to_string()
    }

    /// (older, newer) texts the diff compares.
    ///
    /// Viewing version v: v-1 against v, or the original against v1.
    /// Otherwise: second-latest against latest, or the original against the
    /// only version.
    fn diff_sources(&self) -> Option<(&str, &str)> {
        let baseline = self.original_text.as_deref().unwrap_or("");
        let newer = match self.mode {
            Mode::Viewing { version } => self.history.find(version)?,
            Mode::Idle | Mode::Editing => self.history.latest()?,
        };
        match newer.version_number {
            1 => Some((baseline, newer.text.as_str())),
            n => {
                let older = self.history.find(n - 1)?;
                Some((older.text.as_str(), newer.text.as_str()))
            }
        }
    }
}
