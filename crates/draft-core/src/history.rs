//! Version History
//!
//! Append-only list of committed snapshots for one item.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An immutable committed snapshot of an item's text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub text: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    /// 1-based, equal to the position in the history
    pub version_number: u32,
    #[serde(default)]
    pub is_original: bool,
}

impl Version {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.timestamp)
    }
}

/// Version history of a single item.
///
/// Cloning is cheap: the list is shared and only copied when a clone that
/// shares it appends, so an older snapshot never sees later versions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionHistory {
    versions: Arc<Vec<Version>>,
}

impl VersionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from stored versions, renumbering by position if the stored
    /// numbers are not exactly `1..=len`.
    pub fn from_versions(mut versions: Vec<Version>) -> Self {
        let contiguous = versions
            .iter()
            .zip(1u32..)
            .all(|(v, expected)| v.version_number == expected);
        if !contiguous {
            tracing::warn!("version numbers out of sequence, renumbering {} versions", versions.len());
            for (v, number) in versions.iter_mut().zip(1u32..) {
                v.version_number = number;
            }
        }
        Self { versions: Arc::new(versions) }
    }

    /// Commit `text` as the next version.
    pub fn append(&mut self, text: String, timestamp: i64) -> Version {
        let version = Version {
            text,
            timestamp,
            version_number: self.next_number(),
            is_original: false,
        };
        Arc::make_mut(&mut self.versions).push(version.clone());
        version
    }

    pub fn find(&self, version_number: u32) -> Option<&Version> {
        let index = usize::try_from(version_number).ok()?.checked_sub(1)?;
        self.versions.get(index)
    }

    pub fn latest(&self) -> Option<&Version> {
        self.versions.last()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Version> {
        self.versions.iter()
    }

    pub fn as_slice(&self) -> &[Version] {
        &self.versions
    }

    fn next_number(&self) -> u32 {
        u32::try_from(self.versions.len()).map_or(u32::MAX, |n| n.saturating_add(1))
    }
}
