//! The hierarchy index and its direct lookups

use crate::error::{Error, Result};
use crate::id::{ItemId, ParentRef};
use crate::item::{Attributes, Item};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Where an entry's record lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    /// Position of the record in the input
    Present(usize),
    /// Referenced as a parent, never supplied
    Absent,
}

/// Index entry for one id
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub(crate) id: ItemId,
    pub(crate) slot: Slot,
    /// Child entries in first-seen order
    pub(crate) children: Vec<usize>,
}

/// Summary counts for a built store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Records in the input, duplicates included
    pub records: usize,
    /// Distinct ids known to the index
    pub entries: usize,
    pub roots: usize,
    pub dangling: usize,
    pub max_children: usize,
}

/// Read-only index over parent-referencing records
///
/// Built once from the input list. Entries live in an arena addressed through
/// an id lookup table, so every query is a hash lookup followed by index hops.
/// There is no mutation API; share a built store across threads with `Arc`.
#[derive(Debug, Clone)]
pub struct TreeStore<T = Attributes> {
    pub(crate) items: Vec<Item<T>>,
    pub(crate) entries: Vec<Entry>,
    pub(crate) lookup: HashMap<ItemId, usize>,
}

impl<T> TreeStore<T> {
    /// Build the index
    ///
    /// Never fails. A repeated id repoints its entry at the later record and
    /// keeps the children gathered so far; a parent id that is never supplied
    /// gets an empty entry that fails lookups with `MissingRecord`.
    pub fn new(items: Vec<Item<T>>) -> Self {
        let mut entries: Vec<Entry> = Vec::new();
        let mut lookup: HashMap<ItemId, usize> = HashMap::with_capacity(items.len());

        for (position, item) in items.iter().enumerate() {
            let own = Self::entry_for(&mut entries, &mut lookup, &item.id);
            entries[own].slot = Slot::Present(position);

            if let ParentRef::Item(parent_id) = &item.parent {
                let parent = Self::entry_for(&mut entries, &mut lookup, parent_id);
                entries[parent].children.push(own);
            }
        }

        for entry in entries.iter().filter(|e| e.slot == Slot::Absent) {
            tracing::trace!("Dangling parent reference: {}", entry.id);
        }

        tracing::debug!(
            "Built tree store: {} records, {} entries",
            items.len(),
            entries.len()
        );

        Self {
            items,
            entries,
            lookup,
        }
    }

    /// Look up or lazily create the entry for `id`
    fn entry_for(
        entries: &mut Vec<Entry>,
        lookup: &mut HashMap<ItemId, usize>,
        id: &ItemId,
    ) -> usize {
        if let Some(&index) = lookup.get(id) {
            return index;
        }
        let index = entries.len();
        entries.push(Entry {
            id: id.clone(),
            slot: Slot::Absent,
            children: Vec::new(),
        });
        lookup.insert(id.clone(), index);
        index
    }

    /// The input records, unchanged and in input order
    pub fn all(&self) -> &[Item<T>] {
        &self.items
    }

    /// Get the record stored for an id
    pub fn item(&self, id: &ItemId) -> Result<&Item<T>> {
        let index = self.entry(id)?;
        self.resolve(index)
    }

    /// Get the direct children of an id, in the order they were first listed
    pub fn children(&self, id: &ItemId) -> Result<Vec<&Item<T>>> {
        let index = self.entry(id)?;
        self.resolve(index)?;
        self.children_of(index)
    }

    /// Check if an id has an entry (supplied or only referenced as a parent)
    pub fn contains(&self, id: &ItemId) -> bool {
        self.lookup.contains_key(id)
    }

    /// Map typed text to an index key
    ///
    /// Text that reads as an integer matches a numeric id first and falls
    /// back to the string id with the same spelling.
    pub fn key_for(&self, raw: &str) -> ItemId {
        let parsed = ItemId::parse(raw);
        if parsed.as_str().is_none() && !self.contains(&parsed) {
            let text = ItemId::from(raw);
            if self.contains(&text) {
                return text;
            }
        }
        parsed
    }

    /// Number of input records
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Top-level records, one per distinct id, in first-appearance order
    pub fn roots(&self) -> Vec<&Item<T>> {
        let mut seen: HashSet<&ItemId> = HashSet::new();
        self.items
            .iter()
            .filter(|item| seen.insert(&item.id))
            .filter_map(|item| self.item(&item.id).ok())
            .filter(|item| item.is_root())
            .collect()
    }

    /// Ids referenced as parents but never supplied, in first-mention order
    pub fn dangling(&self) -> Vec<&ItemId> {
        self.entries
            .iter()
            .filter(|e| e.slot == Slot::Absent)
            .map(|e| &e.id)
            .collect()
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            records: self.items.len(),
            entries: self.entries.len(),
            roots: self.roots().len(),
            dangling: self.dangling().len(),
            max_children: self
                .entries
                .iter()
                .map(|e| e.children.len())
                .max()
                .unwrap_or(0),
        }
    }

    pub(crate) fn entry(&self, id: &ItemId) -> Result<usize> {
        self.lookup
            .get(id)
            .copied()
            .ok_or_else(|| Error::NotFound(id.clone()))
    }

    pub(crate) fn resolve(&self, index: usize) -> Result<&Item<T>> {
        let entry = &self.entries[index];
        match entry.slot {
            Slot::Present(position) => Ok(&self.items[position]),
            Slot::Absent => Err(Error::MissingRecord(entry.id.clone())),
        }
    }

    pub(crate) fn children_of(&self, index: usize) -> Result<Vec<&Item<T>>> {
        self.entries[index]
            .children
            .iter()
            .map(|&child| self.resolve(child))
            .collect()
    }
}

impl<T> FromIterator<Item<T>> for TreeStore<T> {
    fn from_iter<I: IntoIterator<Item = Item<T>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T> From<Vec<Item<T>>> for TreeStore<T> {
    fn from(items: Vec<Item<T>>) -> Self {
        Self::new(items)
    }
}
