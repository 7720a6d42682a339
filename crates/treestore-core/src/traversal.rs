//! Multi-level walks over a built store

use crate::error::{Error, Result};
use crate::id::{ItemId, ParentRef};
use crate::item::Item;
use crate::limits::validate_traversal_depth;
use crate::store::TreeStore;
use std::collections::{HashSet, VecDeque};

impl<T> TreeStore<T> {
    /// Children and grandchildren of an id
    ///
    /// Direct children first, in order, then the children of each direct
    /// child in the same order. Stops at two levels; use
    /// [`TreeStore::descendants`] for a deeper walk.
    pub fn all_children(&self, id: &ItemId) -> Result<Vec<&Item<T>>> {
        let children = self.children(id)?;
        let mut grandchildren = Vec::new();

        for child in &children {
            grandchildren.extend(self.children(&child.id)?);
        }

        Ok(children.into_iter().chain(grandchildren).collect())
    }

    /// Ancestors of an id, nearest first
    ///
    /// The id itself is not included. Fails with `CyclicAncestry` as soon as
    /// the walk reaches an id it has already seen.
    pub fn all_parents(&self, id: &ItemId) -> Result<Vec<&Item<T>>> {
        let mut current = self.item(id)?;
        let mut visited: HashSet<&ItemId> = HashSet::new();
        visited.insert(&current.id);
        let mut ancestors = Vec::new();

        while let ParentRef::Item(parent_id) = &current.parent {
            if !visited.insert(parent_id) {
                tracing::debug!("Parent cycle from {} at {}", id, parent_id);
                return Err(Error::CyclicAncestry {
                    start: id.clone(),
                    repeated: parent_id.clone(),
                });
            }
            current = self.item(parent_id)?;
            ancestors.push(current);
        }

        Ok(ancestors)
    }

    /// Breadth-first subtree walk up to `max_depth` levels below `id`
    ///
    /// Each id is emitted once, so duplicated or cyclic child links end the
    /// walk instead of repeating it.
    pub fn descendants(&self, id: &ItemId, max_depth: u32) -> Result<Vec<&Item<T>>> {
        validate_traversal_depth(max_depth)?;

        let start = self.entry(id)?;
        self.resolve(start)?;

        let mut visited: HashSet<usize> = HashSet::new();
        let mut queue: VecDeque<(usize, u32)> = VecDeque::new();
        let mut result = Vec::new();
        let mut max_depth_reached = 0;

        visited.insert(start);
        queue.push_back((start, 0));

        while let Some((index, depth)) = queue.pop_front() {
            max_depth_reached = max_depth_reached.max(depth);

            if depth >= max_depth {
                continue;
            }

            for &child in &self.entries[index].children {
                if !visited.insert(child) {
                    continue;
                }
                result.push(self.resolve(child)?);
                queue.push_back((child, depth + 1));
            }
        }

        tracing::debug!(
            "Descendant walk from {} visited {} items, depth {}",
            id,
            result.len(),
            max_depth_reached
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::{ValidationError, MAX_TRAVERSAL_DEPTH};

    fn top(id: i64) -> Item {
        Item::bare(id, ParentRef::Root)
    }

    fn node(id: i64, parent: i64) -> Item {
        Item::bare(id, parent)
    }

    fn ids(items: &[&Item]) -> Vec<i64> {
        items.iter().filter_map(|item| item.id.as_int()).collect()
    }

    fn create_test_store() -> TreeStore {
        TreeStore::new(vec![
            top(1),
            node(2, 1),
            node(3, 1),
            node(4, 2),
            node(5, 2),
            node(6, 2),
            node(7, 4),
            node(8, 4),
        ])
    }

    #[test]
    fn test_all_children_two_levels() {
        let store = create_test_store();

        assert_eq!(ids(&store.all_children(&ItemId::Int(2)).unwrap()), vec![4, 5, 6, 7, 8]);
        // Great-grandchildren (7, 8) are not reached from 1
        assert_eq!(ids(&store.all_children(&ItemId::Int(1)).unwrap()), vec![2, 3, 4, 5, 6]);
        assert!(store.all_children(&ItemId::Int(8)).unwrap().is_empty());
    }

    #[test]
    fn test_all_children_grandchildren_grouped_by_child() {
        let store = TreeStore::new(vec![
            top(1),
            node(2, 1),
            node(3, 1),
            node(30, 3),
            node(20, 2),
            node(31, 3),
        ]);

        assert_eq!(
            ids(&store.all_children(&ItemId::Int(1)).unwrap()),
            vec![2, 3, 20, 30, 31]
        );
    }

    #[test]
    fn test_all_parents_nearest_first() {
        let store = create_test_store();

        assert_eq!(ids(&store.all_parents(&ItemId::Int(7)).unwrap()), vec![4, 2, 1]);
        assert!(store.all_parents(&ItemId::Int(1)).unwrap().is_empty());
    }

    #[test]
    fn test_all_parents_suffix_property() {
        let store = create_test_store();
        let chain = store.all_parents(&ItemId::Int(8)).unwrap();

        for (i, ancestor) in chain.iter().enumerate() {
            let rest = store.all_parents(&ancestor.id).unwrap();
            assert_eq!(ids(&rest), ids(&chain[i + 1..]));
        }
    }

    #[test]
    fn test_all_parents_flat_dataset() {
        let store = TreeStore::new(vec![top(1), top(2), top(3)]);
        assert!(store.all_parents(&ItemId::Int(1)).unwrap().is_empty());
    }

    #[test]
    fn test_all_parents_dangling_ancestor() {
        let store = TreeStore::new(vec![node(2, 10), node(3, 2)]);

        assert_eq!(
            store.all_parents(&ItemId::Int(3)),
            Err(Error::MissingRecord(ItemId::Int(10)))
        );
    }

    #[test]
    fn test_all_parents_unknown_id() {
        let store = create_test_store();
        assert_eq!(
            store.all_parents(&ItemId::Int(42)),
            Err(Error::NotFound(ItemId::Int(42)))
        );
    }

    #[test]
    fn test_all_parents_cycle() {
        // 1 -> 2 -> 3 -> 1
        let store = TreeStore::new(vec![node(1, 3), node(2, 1), node(3, 2), node(4, 3)]);

        assert_eq!(
            store.all_parents(&ItemId::Int(4)),
            Err(Error::CyclicAncestry {
                start: ItemId::Int(4),
                repeated: ItemId::Int(3),
            })
        );
        assert!(matches!(
            store.all_parents(&ItemId::Int(1)),
            Err(Error::CyclicAncestry { .. })
        ));
    }

    #[test]
    fn test_all_parents_self_parent() {
        let store = TreeStore::new(vec![node(1, 1)]);

        assert_eq!(
            store.all_parents(&ItemId::Int(1)),
            Err(Error::CyclicAncestry {
                start: ItemId::Int(1),
                repeated: ItemId::Int(1),
            })
        );
        // A self-parented record lists itself as a child
        assert_eq!(ids(&store.children(&ItemId::Int(1)).unwrap()), vec![1]);
    }

    #[test]
    fn test_descendants_full_subtree() {
        let store = create_test_store();

        assert_eq!(
            ids(&store.descendants(&ItemId::Int(1), 10).unwrap()),
            vec![2, 3, 4, 5, 6, 7, 8]
        );
        assert_eq!(ids(&store.descendants(&ItemId::Int(1), 1).unwrap()), vec![2, 3]);
        assert!(store.descendants(&ItemId::Int(1), 0).unwrap().is_empty());
    }

    #[test]
    fn test_descendants_matches_all_children_at_depth_two() {
        let store = create_test_store();

        for id in 1..=8 {
            let id = ItemId::Int(id);
            assert_eq!(
                ids(&store.descendants(&id, 2).unwrap()),
                ids(&store.all_children(&id).unwrap())
            );
        }
    }

    #[test]
    fn test_descendants_terminates_on_cycle() {
        let store = TreeStore::new(vec![node(1, 2), node(2, 1)]);

        assert_eq!(
            ids(&store.descendants(&ItemId::Int(1), MAX_TRAVERSAL_DEPTH).unwrap()),
            vec![2]
        );
    }

    #[test]
    fn test_descendants_depth_limit() {
        let store = create_test_store();

        assert_eq!(
            store.descendants(&ItemId::Int(1), MAX_TRAVERSAL_DEPTH + 1),
            Err(Error::Validation(ValidationError::TraversalDepthTooLarge {
                depth: MAX_TRAVERSAL_DEPTH + 1,
                max: MAX_TRAVERSAL_DEPTH,
            }))
        );
    }
}
