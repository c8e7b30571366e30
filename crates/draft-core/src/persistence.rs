//! Persistence
//!
//! The whole collection is stored as one JSON array under a single key.
//! Records use flat camelCase flags so data written by earlier builds of the
//! drafter still loads.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::collection::Drafts;
use crate::diff::DiffSegment;
use crate::error::{DraftError, DraftResult};
use crate::history::{Version, VersionHistory};
use crate::item::{Item, ItemId, Mode};

/// Minimal key-value backend (browser localStorage, or memory)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> DraftResult<()>;
}

/// In-memory store for tests and native use
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.entries.borrow_mut().insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> DraftResult<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> DraftResult<()> {
        (**self).set(key, value)
    }
}

/// Stored form of one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub id: ItemId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_editing: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_locked: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_approved: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub show_diff: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewing_version: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub versions: Vec<Version>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<Vec<DiffSegment>>,
}

/// Older builds wrote `null` for unset fields
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<&Item> for ItemRecord {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id(),
            text: item.text().to_string(),
            original_text: item.original_text().map(str::to_string),
            is_editing: item.is_editing(),
            is_locked: item.is_locked(),
            is_approved: item.is_approved(),
            show_diff: item.show_diff(),
            viewing_version: item.viewing_version(),
            versions: item.history().as_slice().to_vec(),
            diff: item.diff().map(<[DiffSegment]>::to_vec),
        }
    }
}

impl From<ItemRecord> for Item {
    /// A record flagged both editing and viewing resolves to viewing, as long
    /// as the viewed version exists.
    fn from(record: ItemRecord) -> Self {
        let history = VersionHistory::from_versions(record.versions);
        let mode = match record.viewing_version {
            Some(version) if history.find(version).is_some() => Mode::Viewing { version },
            _ if record.is_editing => Mode::Editing,
            _ => Mode::Idle,
        };
        Item::restore(
            record.id,
            record.text,
            record.original_text,
            mode,
            record.is_locked,
            record.is_approved,
            history,
            record.show_diff,
            record.diff,
        )
    }
}

/// Loads and saves the collection through a `KeyValueStore`
#[derive(Debug)]
pub struct Persistence<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self { store, key: key.into() }
    }

    /// Stored items, or `None` if nothing usable is stored.
    pub fn load(&self) -> Option<Vec<Item>> {
        let raw = self.store.get(&self.key)?;
        match serde_json::from_str::<Vec<ItemRecord>>(&raw) {
            Ok(records) => Some(records.into_iter().map(Item::from).collect()),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "discarding unreadable stored drafts");
                None
            }
        }
    }

    /// Stored collection, or `default_count` empty items.
    pub fn load_or_default(&self, default_count: usize) -> Drafts {
        match self.load().and_then(Drafts::from_items) {
            Some(drafts) => {
                tracing::info!(key = %self.key, count = drafts.len(), "loaded drafts");
                drafts
            }
            None => {
                tracing::info!(count = default_count, "starting with empty drafts");
                Drafts::with_defaults(default_count)
            }
        }
    }

    pub fn save(&self, drafts: &Drafts) -> DraftResult<()> {
        let records: Vec<ItemRecord> = drafts.items().iter().map(ItemRecord::from).collect();
        let json = serde_json::to_string(&records)?;
        self.store.set(&self.key, &json)
    }
}

/// Storage error with the backend call that failed
pub fn storage_error(context: &str, detail: impl std::fmt::Debug) -> DraftError {
    DraftError::Storage(format!("{}: {:?}", context, detail))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_gives_defaults() {
        let persistence = Persistence::new(MemoryStore::new(), "tweets");
        assert!(persistence.load().is_none());
        assert_eq!(persistence.load_or_default(8).len(), 8);
    }

    #[test]
    fn test_garbage_gives_defaults() {
        let persistence = Persistence::new(MemoryStore::with_entry("tweets", "{not json"), "tweets");
        assert!(persistence.load().is_none());
        assert_eq!(persistence.load_or_default(8).ids(), (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_list_gives_defaults() {
        let persistence = Persistence::new(MemoryStore::with_entry("tweets", "[]"), "tweets");
        assert_eq!(persistence.load_or_default(3).len(), 3);
    }

    #[test]
    fn test_loads_legacy_records() {
        let raw = r#"[
            {"id": 4, "text": "hi", "showMenu": false},
            {"id": 9, "text": "v1", "originalText": "", "isLocked": true,
             "isEditing": true, "viewingVersion": 1, "currentVersionIndex": 0,
             "versions": [{"text": "v1", "timestamp": 1700000000000, "versionNumber": 1, "isOriginal": false}]}
        ]"#;
        let persistence = Persistence::new(MemoryStore::with_entry("tweets", raw), "tweets");
        let items = persistence.load().unwrap();

        assert_eq!(items[0].id(), 4);
        assert_eq!(items[0].mode(), Mode::Idle);
        assert_eq!(items[1].mode(), Mode::Viewing { version: 1 });
        assert!(items[1].is_locked());
        assert_eq!(items[1].original_text(), Some(""));
    }

    #[test]
    fn test_null_fields_load_as_unset() {
        let raw = r#"[
            {"id": 1, "text": "keep me", "versions": null, "isEditing": null,
             "isLocked": null, "originalText": null, "viewingVersion": null, "diff": null},
            {"id": 2, "text": null, "showDiff": null, "isApproved": null}
        ]"#;
        let persistence = Persistence::new(MemoryStore::with_entry("tweets", raw), "tweets");
        let drafts = persistence.load_or_default(8);

        assert_eq!(drafts.ids(), vec![1, 2]);
        let first = drafts.get(1).unwrap();
        assert_eq!(first.text(), "keep me");
        assert_eq!(first.mode(), Mode::Idle);
        assert!(!first.is_locked());
        assert!(first.history().is_empty());
        assert_eq!(drafts.get(2).unwrap().text(), "");
    }

    #[test]
    fn test_save_omits_absent_fields() {
        let store = MemoryStore::new();
        let persistence = Persistence::new(&store, "tweets");
        persistence.save(&Drafts::with_defaults(1)).unwrap();

        let json: serde_json::Value = serde_json::from_str(&store.get("tweets").unwrap()).unwrap();
        let record = &json[0];
        assert_eq!(record["id"], 1);
        assert!(record.get("originalText").is_none());
        assert!(record.get("versions").is_none());
        assert_eq!(record["isLocked"], false);
    }

    #[test]
    fn test_save_then_load_keeps_state() {
        let store = MemoryStore::new();
        let persistence = Persistence::new(&store, "tweets");

        let mut drafts = Drafts::with_defaults(2);
        drafts.update_text(2, "hello".into()).unwrap();
        persistence.save(&drafts).unwrap();

        let loaded = persistence.load_or_default(8);
        assert_eq!(loaded, drafts);
    }

    #[test]
    fn test_storage_error_message() {
        let err = storage_error("setItem", "QuotaExceeded");
        assert_eq!(err.to_string(), "storage error: setItem: \"QuotaExceeded\"");
    }
}
