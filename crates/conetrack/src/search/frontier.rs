use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Frontier entry: a candidate cone and the distance it was pushed with.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FrontierEntry {
    pub(crate) distance: f64,
    pub(crate) index: usize,
}

// Total order on (distance, index). `total_cmp` keeps NaN from poisoning the
// heap; the index makes pops deterministic on equal distances.
impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.index.cmp(&other.index))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

/// Min-heap of frontier entries.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Reverse<FrontierEntry>>,
}

impl Frontier {
    pub(crate) fn push(&mut self, index: usize, distance: f64) {
        self.heap.push(Reverse(FrontierEntry { distance, index }));
    }

    pub(crate) fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop().map(|Reverse(e)| e)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_distance_then_index_order() {
        let mut f = Frontier::default();
        f.push(7, 3.0);
        f.push(2, 1.5);
        f.push(9, 1.5);
        f.push(1, 4.0);
        f.push(0, 1.5);
        let order: Vec<usize> = std::iter::from_fn(|| f.pop()).map(|e| e.index).collect();
        assert_eq!(order, vec![0, 2, 9, 7, 1]);
        assert!(f.is_empty());
    }

    #[test]
    fn duplicate_entries_are_kept() {
        let mut f = Frontier::default();
        f.push(4, 2.0);
        f.push(4, 2.0);
        assert_eq!(f.len(), 2);
    }
}
