//! Keyed diff between what is displayed and what should be displayed.

use fxhash::FxHashSet;
use std::hash::Hash;

/// Outcome of reconciling two keyed sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation<K> {
    /// Keys in `next` but not in `previous`, in `next` order.
    pub added: Vec<K>,
    /// Keys in `previous` but not in `next`, in `previous` order.
    pub removed: Vec<K>,
    /// Keys present in both, in `next` order.
    pub unchanged: Vec<K>,
}

impl<K> Default for Reconciliation<K> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            removed: Vec::new(),
            unchanged: Vec::new(),
        }
    }
}

impl<K> Reconciliation<K> {
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Splits `next` against `previous` into additions, removals and survivors.
///
/// Duplicate keys in either input are treated as a single key.
pub fn reconcile<K>(previous: &[K], next: &[K]) -> Reconciliation<K>
where
    K: Eq + Hash + Clone,
{
    let before: FxHashSet<&K> = previous.iter().collect();
    let after: FxHashSet<&K> = next.iter().collect();

    let mut seen = FxHashSet::default();
    let mut added = Vec::new();
    let mut unchanged = Vec::new();
    for key in next {
        if !seen.insert(key) {
            continue;
        }
        if before.contains(key) {
            unchanged.push(key.clone());
        } else {
            added.push(key.clone());
        }
    }

    let mut seen = FxHashSet::default();
    let removed = previous
        .iter()
        .filter(|key| seen.insert(*key) && !after.contains(*key))
        .cloned()
        .collect();

    Reconciliation {
        added,
        removed,
        unchanged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::TileCoord;

    #[test]
    fn test_disjoint_sets() {
        let r = reconcile(&[1, 2], &[3, 4]);
        assert_eq!(r.added, vec![3, 4]);
        assert_eq!(r.removed, vec![1, 2]);
        assert!(r.unchanged.is_empty());
    }

    #[test]
    fn test_overlapping_tiles() {
        let a = TileCoord::new(10, 24, 6);
        let b = TileCoord::new(11, 24, 6);
        let c = TileCoord::new(12, 24, 6);

        let r = reconcile(&[a, b], &[b, c]);
        assert_eq!(r.added, vec![c]);
        assert_eq!(r.removed, vec![a]);
        assert_eq!(r.unchanged, vec![b]);
        assert!(!r.is_noop());
    }

    #[test]
    fn test_identical_sets_are_noop() {
        let r = reconcile(&["x", "y"], &["y", "x"]);
        assert!(r.is_noop());
        assert_eq!(r.unchanged, vec!["y", "x"]);
    }

    #[test]
    fn test_duplicates_collapse() {
        let r = reconcile(&[1, 1, 2], &[2, 3, 3]);
        assert_eq!(r.added, vec![3]);
        assert_eq!(r.removed, vec![1]);
        assert_eq!(r.unchanged, vec![2]);
    }

    #[test]
    fn test_empty_inputs() {
        let r: Reconciliation<u32> = reconcile(&[], &[]);
        assert!(r.is_noop());
        assert!(r.unchanged.is_empty());
    }
}
