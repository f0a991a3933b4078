use crate::graph::Hop;

/// Binary min-heap of hops, keyed by their (cumulative) distance.
#[derive(Debug, Default)]
pub struct MinHeap {
    heap: Vec<Hop>,
}

impl MinHeap {
    pub fn new() -> Self {
        Self { heap: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn insert(&mut self, hop: Hop) {
        self.heap.push(hop);
        self.sift_up(self.heap.len() - 1);
    }

    pub fn extract_min(&mut self) -> Option<Hop> {
        if self.heap.is_empty() {
            return None;
        }

        // The last element becomes the root.
        let min = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(min)
    }

    fn sift_up(&mut self, element_index: usize) {
        let mut index = element_index;
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.heap[parent].distance <= self.heap[index].distance {
                break;
            }
            self.heap.swap(parent, index);
            index = parent;
        }
    }

    fn sift_down(&mut self, element_index: usize) {
        let len = self.heap.len();
        let mut index = element_index;
        loop {
            let left = 2 * index + 1;
            if left >= len {
                return;
            }
            let right = left + 1;
            let smaller = if right < len && self.heap[right].distance < self.heap[left].distance {
                right
            } else {
                left
            };
            if self.heap[index].distance <= self.heap[smaller].distance {
                return;
            }
            self.heap.swap(index, smaller);
            index = smaller;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::graph::NodeIdx;
    use crate::primitives::Distance;

    fn hop(distance: Distance) -> Hop {
        Hop {
            to: NodeIdx(distance as u32),
            distance,
        }
    }

    #[test]
    fn test_empty() {
        let mut heap = MinHeap::new();
        assert!(heap.is_empty());
        assert_eq!(heap.extract_min(), None);
    }

    #[test]
    fn test_extracts_in_order() {
        let mut heap = MinHeap::new();
        for distance in [40, 10, 30, 10, 0, 20] {
            heap.insert(hop(distance));
        }
        assert_eq!(heap.len(), 6);

        let mut extracted = Vec::new();
        while let Some(min) = heap.extract_min() {
            extracted.push(min.distance);
        }
        assert_eq!(extracted, [0, 10, 10, 20, 30, 40]);
    }

    #[test]
    fn test_interleaved_against_sorted_vec() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut heap = MinHeap::new();
        let mut reference: Vec<Distance> = Vec::new();
        for _ in 0..500 {
            if rng.gen_bool(0.6) {
                let distance = rng.gen_range(0..100);
                heap.insert(hop(distance));
                reference.push(distance);
                reference.sort_unstable_by(|a, b| b.cmp(a));
            } else {
                assert_eq!(heap.extract_min().map(|it| it.distance), reference.pop());
            }
        }
    }
}
