//! Min-heap keyed by `(distance, node id)`.
//!
//! Ties on distance pop the smaller node id first, so heap order is fully
//! determined by the graph. Entries are never updated in place: an improved
//! distance pushes a new entry and the old one goes stale (lazy deletion).

use crate::graph::NodeId;
use crate::step::{Distance, Distances, HeapEntry, HeapSnapshot};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Key {
    dist: Distance,
    id: NodeId,
}

impl Eq for Key {}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist
            .total_cmp(&other.dist)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Default)]
pub(crate) struct MinHeap {
    heap: BinaryHeap<Reverse<Key>>,
}

impl MinHeap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, id: NodeId, dist: Distance) {
        self.heap.push(Reverse(Key { dist, id }));
    }

    pub(crate) fn peek(&self) -> Option<(NodeId, Distance)> {
        self.heap.peek().map(|Reverse(k)| (k.id, k.dist))
    }

    pub(crate) fn pop(&mut self) -> Option<(NodeId, Distance)> {
        self.heap.pop().map(|Reverse(k)| (k.id, k.dist))
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    /// Ordered view of the heap; element 0 is the next pop.
    pub(crate) fn snapshot(&self, best: &Distances, visited: &HashSet<NodeId>) -> HeapSnapshot {
        let mut keys: Vec<Key> = self.heap.iter().map(|Reverse(k)| *k).collect();
        keys.sort();
        keys.into_iter()
            .map(|k| HeapEntry {
                id: k.id,
                dist: k.dist,
                stale: visited.contains(&k.id) || best.get(k.id).improves_on(&k.dist),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_distance_order() {
        let mut heap = MinHeap::new();
        heap.push(2, Distance::Finite(5.0));
        heap.push(1, Distance::Unreachable);
        heap.push(3, Distance::Finite(1.0));

        assert_eq!(heap.pop(), Some((3, Distance::Finite(1.0))));
        assert_eq!(heap.pop(), Some((2, Distance::Finite(5.0))));
        assert_eq!(heap.pop(), Some((1, Distance::Unreachable)));
        assert_eq!(heap.len(), 0);
    }

    #[test]
    fn test_ties_break_on_node_id() {
        let mut heap = MinHeap::new();
        heap.push(7, Distance::Finite(2.0));
        heap.push(3, Distance::Finite(2.0));
        heap.push(5, Distance::Unreachable);
        heap.push(4, Distance::Unreachable);

        assert_eq!(heap.peek(), Some((3, Distance::Finite(2.0))));
        let order: Vec<NodeId> = std::iter::from_fn(|| heap.pop().map(|(id, _)| id)).collect();
        assert_eq!(order, vec![3, 7, 4, 5]);
    }

    #[test]
    fn test_snapshot_marks_stale_entries() {
        let mut heap = MinHeap::new();
        heap.push(1, Distance::Unreachable);
        heap.push(1, Distance::Finite(4.0));
        heap.push(2, Distance::Finite(6.0));

        let best: Distances = [(1, Distance::Finite(4.0)), (2, Distance::Finite(6.0))]
            .into_iter()
            .collect();
        let visited: HashSet<NodeId> = [2].into_iter().collect();
        let snap = heap.snapshot(&best, &visited);

        assert_eq!(snap.len(), 3);
        assert_eq!(snap[0].id, 1);
        assert!(!snap[0].stale);
        assert_eq!(snap[1].id, 2);
        assert!(snap[1].stale);
        assert_eq!(snap[2].dist, Distance::Unreachable);
        assert!(snap[2].stale);
        assert_eq!(heap.len(), 3);
    }
}
