//! Record types stored in the index

use crate::id::{ItemId, ParentRef};
use serde::{Deserialize, Serialize};

/// Free-form record fields, the default payload
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// A record referencing its parent by id
///
/// The payload is carried for the caller and never inspected by the index.
/// When serialized, its fields sit beside `id` and `parent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item<T = Attributes> {
    /// Unique identifier (duplicates are tolerated, the last one wins)
    pub id: ItemId,

    /// Parent id or the root marker
    pub parent: ParentRef,

    /// Caller data
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Item<T> {
    /// Create a record with a payload
    pub fn new(id: impl Into<ItemId>, parent: impl Into<ParentRef>, payload: T) -> Self {
        Self {
            id: id.into(),
            parent: parent.into(),
            payload,
        }
    }

    /// Check if this record is top-level
    pub fn is_root(&self) -> bool {
        self.parent.is_root()
    }
}

impl Item<Attributes> {
    /// Create a record with no extra fields
    pub fn bare(id: impl Into<ItemId>, parent: impl Into<ParentRef>) -> Self {
        Self::new(id, parent, Attributes::new())
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    pub fn attr(&self, key: &str) -> Option<&serde_json::Value> {
        self.payload.get(key)
    }
}
