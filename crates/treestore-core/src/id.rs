//! Item identifiers and parent references

use serde::{Deserialize, Serialize};

/// Wire value of a top-level record's `parent` field
pub const ROOT_MARKER: &str = "root";

/// Identifier of an item, numeric or textual
///
/// `Int(1)` and `Str("1")` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Int(i64),
    Str(String),
}

impl ItemId {
    /// Parse user input: anything that reads as an `i64` becomes `Int`
    pub fn parse(s: &str) -> Self {
        match s.parse::<i64>() {
            Ok(n) => Self::Int(n),
            Err(_) => Self::Str(s.to_string()),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Int(_) => None,
            Self::Str(s) => Some(s),
        }
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for ItemId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

/// Parent link of a record
///
/// Serialized as the parent's id, or as the literal `"root"` for top-level
/// records. A string id equal to `"root"` therefore cannot be used as a parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "ItemId", into = "ItemId")]
pub enum ParentRef {
    Root,
    Item(ItemId),
}

impl ParentRef {
    pub fn item(id: impl Into<ItemId>) -> Self {
        Self::Item(id.into())
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }

    /// Parent id, `None` for top-level records
    pub fn id(&self) -> Option<&ItemId> {
        match self {
            Self::Root => None,
            Self::Item(id) => Some(id),
        }
    }
}

impl From<ItemId> for ParentRef {
    fn from(id: ItemId) -> Self {
        match id {
            ItemId::Str(s) if s == ROOT_MARKER => Self::Root,
            other => Self::Item(other),
        }
    }
}

impl From<ParentRef> for ItemId {
    fn from(parent: ParentRef) -> Self {
        match parent {
            ParentRef::Root => ItemId::Str(ROOT_MARKER.to_string()),
            ParentRef::Item(id) => id,
        }
    }
}

impl From<i64> for ParentRef {
    fn from(n: i64) -> Self {
        Self::Item(ItemId::Int(n))
    }
}

impl From<&str> for ParentRef {
    fn from(s: &str) -> Self {
        ItemId::from(s).into()
    }
}

impl std::fmt::Display for ParentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Root => f.write_str(ROOT_MARKER),
            Self::Item(id) => write!(f, "{}", id),
        }
    }
}
