use std::iter::FusedIterator;
use std::ops::Range;

use serde::Serialize;

/// A set of edge indices, stored as a bitmask where bit `i` selects edge `i`.
///
/// The mask is also the subset's position in the enumeration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EdgeSubset(u64);

impl EdgeSubset {
    pub const EMPTY: Self = Self(0);

    pub fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Every edge of a graph with `edge_count` edges.
    pub fn full(edge_count: usize) -> Self {
        if edge_count >= u64::BITS as usize {
            Self(u64::MAX)
        } else {
            Self((1u64 << edge_count) - 1)
        }
    }

    pub fn bits(self) -> u64 {
        self.0
    }

    pub fn contains(self, edge: usize) -> bool {
        edge < u64::BITS as usize && (self.0 >> edge) & 1 == 1
    }

    pub fn insert(&mut self, edge: usize) {
        assert!(edge < u64::BITS as usize, "edge index {} does not fit a subset", edge);
        self.0 |= 1 << edge;
    }

    pub fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Selected edge indices in ascending order.
    pub fn indices(self) -> Indices {
        Indices(self.0)
    }

    /// Sum of the weights of the selected edges.
    pub fn weight(self, weights: &[u32]) -> u64 {
        self.indices()
            .take_while(|&edge| edge < weights.len())
            .map(|edge| u64::from(weights[edge]))
            .sum()
    }

    /// The selected items of `items`, in order.
    pub fn select<T>(self, items: &[T]) -> impl Iterator<Item = &T> + '_ {
        self.indices().map_while(move |edge| items.get(edge))
    }
}

impl FromIterator<usize> for EdgeSubset {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut subset = Self::EMPTY;
        for edge in iter {
            subset.insert(edge);
        }
        subset
    }
}

/// Iterator over the set bits of an [`EdgeSubset`].
#[derive(Debug, Clone)]
pub struct Indices(u64);

impl Iterator for Indices {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let edge = self.0.trailing_zeros() as usize;
        // clear lowest set bit
        self.0 &= self.0 - 1;
        Some(edge)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Indices {}

impl FusedIterator for Indices {}

/// Lazy powerset of `n` edges: yields every [`EdgeSubset`] once, in
/// ascending mask order, starting with the empty subset.
///
/// Only the current index is kept, so a fresh call restarts the enumeration
/// and any contiguous index range can be enumerated on its own.
#[derive(Debug, Clone)]
pub struct Subsets {
    next: u64,
    end: u64,
}

impl Subsets {
    /// Panics when `edge_count` is 64 or more.
    pub fn new(edge_count: usize) -> Self {
        Self::range(0..Self::total(edge_count))
    }

    /// Subsets whose masks fall in `range`.
    pub fn range(range: Range<u64>) -> Self {
        Self {
            next: range.start,
            end: range.end.max(range.start),
        }
    }

    /// Size of the powerset of `edge_count` edges.
    pub fn total(edge_count: usize) -> u64 {
        assert!(
            edge_count < u64::BITS as usize,
            "cannot enumerate subsets of {} edges",
            edge_count
        );
        1u64 << edge_count
    }

    pub fn remaining(&self) -> u64 {
        self.end - self.next
    }
}

impl Iterator for Subsets {
    type Item = EdgeSubset;

    fn next(&mut self) -> Option<EdgeSubset> {
        if self.next >= self.end {
            return None;
        }
        let subset = EdgeSubset(self.next);
        self.next += 1;
        Some(subset)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(len) => (len, Some(len)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for Subsets {}

/// Every subset of `edges`, produced lazily one at a time.
///
/// Panics when given 64 or more edges.
pub fn enumerate_subsets<E>(edges: &[E]) -> impl Iterator<Item = Vec<&E>> + '_ {
    Subsets::new(edges.len()).map(move |subset| subset.select(edges).collect())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use itertools::Itertools;

    use crate::cuts::subsets::{enumerate_subsets, EdgeSubset, Subsets};

    #[test]
    fn enumerates_full_powerset_once() {
        let subsets: Vec<EdgeSubset> = Subsets::new(4).collect();
        assert_eq!(16, subsets.len());
        let unique: HashSet<EdgeSubset> = subsets.iter().copied().collect();
        assert_eq!(16, unique.len());
        assert_eq!(EdgeSubset::EMPTY, subsets[0]);
        assert_eq!(EdgeSubset::full(4), subsets[15]);
    }

    #[test]
    fn empty_edge_set_has_one_subset() {
        let subsets: Vec<EdgeSubset> = Subsets::new(0).collect();
        assert_eq!(vec![EdgeSubset::EMPTY], subsets);
    }

    #[test]
    fn enumeration_is_restartable_and_stable() {
        let first: Vec<EdgeSubset> = Subsets::new(5).collect();
        let second: Vec<EdgeSubset> = Subsets::new(5).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn ranges_partition_the_enumeration() {
        let whole: Vec<EdgeSubset> = Subsets::new(5).collect();
        let pieces: Vec<EdgeSubset> = [0..7, 7..20, 20..32]
            .into_iter()
            .flat_map(Subsets::range)
            .collect();
        assert_eq!(whole, pieces);
        assert_eq!(0, Subsets::range(9..3).count());
    }

    #[test]
    fn indices_are_ascending() {
        let subset: EdgeSubset = [5, 0, 3].into_iter().collect();
        assert_eq!(vec![0, 3, 5], subset.indices().collect_vec());
        assert_eq!(3, subset.len());
        assert!(!subset.is_empty());
        assert!(EdgeSubset::EMPTY.is_empty());
        assert!(subset.contains(3));
        assert!(!subset.contains(4));
        assert!(!subset.contains(200));
    }

    #[test]
    fn weight_sums_selected_edges() {
        let weights = [1, 4, 3, 6];
        assert_eq!(0, EdgeSubset::EMPTY.weight(&weights));
        assert_eq!(7, EdgeSubset::from_bits(0b0110).weight(&weights));
        assert_eq!(14, EdgeSubset::full(4).weight(&weights));
    }

    #[test]
    fn enumerate_subsets_yields_items() {
        let edges = ["ab", "bc", "ca"];
        let subsets = enumerate_subsets(&edges).collect_vec();
        assert_eq!(8, subsets.len());
        assert!(subsets[0].is_empty());
        assert_eq!(vec![&"ab", &"ca"], subsets[0b101]);
        assert_eq!(vec![&"ab", &"bc", &"ca"], subsets[7]);
        let sizes = subsets.iter().map(|subset| subset.len()).counts();
        assert_eq!(Some(&3), sizes.get(&2));
    }

    #[test]
    #[should_panic]
    fn refuses_oversized_powerset() {
        let _ = Subsets::new(64);
    }
}
