//! Settings

use serde::{Deserialize, Serialize};

/// Tunables for the drafter. `Default` matches what the UI ships with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Number of empty items in a fresh or cleared collection
    pub default_item_count: usize,
    /// Character limit per post
    pub max_characters: usize,
    /// Remaining-character count at or below which the counter warns
    pub warning_threshold: usize,
    /// Key the collection is stored under
    pub storage_key: String,
    /// Prefix of the export mail subject
    pub export_subject_prefix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_item_count: 8,
            max_characters: 280,
            warning_threshold: 20,
            storage_key: "tweets".to_string(),
            export_subject_prefix: "Tweets".to_string(),
        }
    }
}
