//! Draft errors
//!
//! Every refused operation leaves the collection exactly as it was; callers
//! are free to log these and carry on.

use thiserror::Error;

use crate::item::ItemId;

/// Common result type for draft operations
pub type DraftResult<T> = Result<T, DraftError>;

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("item {0} not found")]
    ItemNotFound(ItemId),

    #[error("item {id} has no version {version}")]
    VersionNotFound { id: ItemId, version: u32 },

    #[error("cannot remove the last remaining item")]
    LastItem,

    #[error("no unused item id left")]
    IdsExhausted,

    #[error("index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("item {0} is read-only")]
    ReadOnly(ItemId),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DraftError {
    /// Lookup misses and guard refusals, as opposed to storage trouble.
    pub fn is_refusal(&self) -> bool {
        !matches!(self, DraftError::Storage(_) | DraftError::Serialization(_))
    }
}
