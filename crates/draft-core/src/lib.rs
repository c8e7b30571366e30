//! Draft Core
//!
//! Per-item edit/lock/version state for a thread of short posts.
//!
//! Layered the same way as the rest of the workspace:
//! - diff: word-level text diff between two revisions
//! - history: append-only version snapshots of one item
//! - item: the per-item state machine and its derived policies
//! - collection: the ordered list of items and the actions applied to it
//! - persistence / store: key-value storage and the snapshot-per-change store
//!
//! Nothing in here touches the browser; the UI crate supplies the storage
//! backend and renders snapshots.

mod clock;
mod collection;
mod diff;
mod error;
mod export;
mod history;
mod item;
mod persistence;
mod settings;
mod store;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use collection::{Action, Drafts};
pub use diff::{compute_diff, tokenize, DiffSegment, SegmentKind};
pub use error::{DraftError, DraftResult};
pub use export::{email_body, mailto_link};
pub use history::{Version, VersionHistory};
pub use item::{Item, ItemId, LockOutcome, Mode, Phase};
pub use persistence::{storage_error, ItemRecord, KeyValueStore, MemoryStore, Persistence};
pub use settings::Settings;
pub use store::DraftStore;
