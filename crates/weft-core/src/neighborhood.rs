//! Ordered adjacency list of cell handles.

use crate::id::CellId;
use smallvec::SmallVec;

/// The neighbours of a cell, as non-owning [`CellId`] handles.
///
/// Order is insertion order and is observable through [`iter`](Self::iter)
/// and [`map`](Self::map). Duplicates and self-references are kept as-is:
/// a torus narrower than three cells legitimately subscribes the same
/// neighbour twice, or the cell itself.
///
/// Inline storage covers the four entries of a 4-connected lattice without
/// a heap allocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Neighborhood {
    neighbors: SmallVec<[CellId; 4]>,
}

impl Neighborhood {
    /// An empty neighbourhood.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a neighbour. No deduplication, no capacity check.
    pub fn subscribe(&mut self, cell: CellId) {
        self.neighbors.push(cell);
    }

    /// Remove the first occurrence of `cell`.
    ///
    /// Returns `false` (and changes nothing) if `cell` is not subscribed.
    pub fn unsubscribe(&mut self, cell: CellId) -> bool {
        match self.neighbors.iter().position(|&c| c == cell) {
            Some(pos) => {
                self.neighbors.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Number of subscriptions, duplicates included.
    pub fn size(&self) -> usize {
        self.neighbors.len()
    }

    /// Alias for [`size`](Self::size).
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    /// Returns `true` if there are no subscriptions.
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Whether `cell` is subscribed at least once.
    pub fn contains(&self, cell: CellId) -> bool {
        self.neighbors.contains(&cell)
    }

    /// Iterate neighbours in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = CellId> + '_ {
        self.neighbors.iter().copied()
    }

    /// Apply `f` to each neighbour in order and collect the results.
    pub fn map<U>(&self, f: impl FnMut(CellId) -> U) -> Vec<U> {
        self.iter().map(f).collect()
    }

    /// The neighbours as a slice.
    pub fn as_slice(&self) -> &[CellId] {
        &self.neighbors
    }
}

impl<'a> IntoIterator for &'a Neighborhood {
    type Item = &'a CellId;
    type IntoIter = std::slice::Iter<'a, CellId>;

    fn into_iter(self) -> Self::IntoIter {
        self.neighbors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn subscribe_keeps_order_and_duplicates() {
        let mut n = Neighborhood::new();
        n.subscribe(CellId(2));
        n.subscribe(CellId(0));
        n.subscribe(CellId(2));
        assert_eq!(n.size(), 3);
        assert_eq!(n.as_slice(), &[CellId(2), CellId(0), CellId(2)]);
    }

    #[test]
    fn unsubscribe_removes_first_match_only() {
        let mut n = Neighborhood::new();
        n.subscribe(CellId(1));
        n.subscribe(CellId(5));
        n.subscribe(CellId(1));
        assert!(n.unsubscribe(CellId(1)));
        assert_eq!(n.as_slice(), &[CellId(5), CellId(1)]);
    }

    #[test]
    fn unsubscribe_absent_is_noop() {
        let mut n = Neighborhood::new();
        n.subscribe(CellId(1));
        assert!(!n.unsubscribe(CellId(9)));
        assert_eq!(n.size(), 1);
    }

    #[test]
    fn map_preserves_order() {
        let mut n = Neighborhood::new();
        for i in [3, 1, 4] {
            n.subscribe(CellId(i));
        }
        assert_eq!(n.map(|c| c.index() * 10), vec![30, 10, 40]);
    }

    #[test]
    fn borrowed_into_iter() {
        let mut n = Neighborhood::new();
        n.subscribe(CellId(0));
        let mut seen = Vec::new();
        for c in &n {
            seen.push(*c);
        }
        assert_eq!(seen, vec![CellId(0)]);
    }

    #[test]
    fn grows_past_inline_capacity() {
        let mut n = Neighborhood::new();
        for i in 0..9 {
            n.subscribe(CellId(i));
        }
        assert_eq!(n.len(), 9);
        assert!(n.contains(CellId(8)));
    }

    proptest! {
        #[test]
        fn subscribe_unsubscribe_restores_size(
            existing in proptest::collection::vec(0usize..16, 0..10),
            extra in 0usize..16,
        ) {
            let mut n = Neighborhood::new();
            for c in &existing {
                n.subscribe(CellId(*c));
            }
            let before = n.size();
            n.subscribe(CellId(extra));
            prop_assert_eq!(n.size(), before + 1);
            prop_assert!(n.unsubscribe(CellId(extra)));
            prop_assert_eq!(n.size(), before);
        }
    }
}
