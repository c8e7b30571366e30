//! Draft Store
//!
//! Holds the current snapshot, applies actions one at a time and saves after
//! every successful change.

use crate::clock::{Clock, SystemClock};
use crate::collection::{Action, Drafts};
use crate::error::DraftResult;
use crate::persistence::{KeyValueStore, Persistence};
use crate::settings::Settings;

pub struct DraftStore<S, C = SystemClock> {
    drafts: Drafts,
    persistence: Persistence<S>,
    clock: C,
    settings: Settings,
}

impl<S: KeyValueStore, C: Clock> DraftStore<S, C> {
    /// Load from `store`, falling back to the default collection, and write
    /// the result back.
    pub fn open(store: S, clock: C, settings: Settings) -> Self {
        let persistence = Persistence::new(store, settings.storage_key.clone());
        let drafts = persistence.load_or_default(settings.default_item_count);
        let this = Self { drafts, persistence, clock, settings };
        this.persist();
        this
    }

    pub fn snapshot(&self) -> &Drafts {
        &self.drafts
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Apply one action. On success the new snapshot replaces the old one and
    /// is saved; on error nothing changes.
    pub fn dispatch(&mut self, action: Action) -> DraftResult<&Drafts> {
        let next = self.drafts.apply(action, &self.clock, &self.settings)?;
        self.drafts = next;
        self.persist();
        Ok(&self.drafts)
    }

    /// Save failures are logged and otherwise ignored.
    fn persist(&self) {
        if let Err(e) = self.persistence.save(&self.drafts) {
            tracing::warn!(error = %e, "failed to save drafts");
        }
    }
}
