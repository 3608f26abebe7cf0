//! Binary min-heap ordered by a caller-supplied comparator.
//!
//! Unlike [`std::collections::BinaryHeap`], the ordering is a closure rather
//! than an `Ord` impl, so the same element type can be queued under
//! different priorities. Elements that compare equal come out in an order
//! fixed by the heap layout, which in turn depends only on the sequence of
//! `put`/`get` calls.

use std::cmp::Ordering;
use std::fmt;

/// A min-heap over a dense `Vec`, smallest element first under `compare`.
///
/// `compare` must be a strict weak ordering; behaviour is unspecified
/// otherwise.
pub struct MinHeap<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    heap: Vec<T>,
    compare: F,
}

impl<T, F> MinHeap<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// Create an empty heap.
    pub fn new(compare: F) -> Self {
        Self {
            heap: Vec::new(),
            compare,
        }
    }

    /// Create an empty heap with room for `capacity` elements.
    pub fn with_capacity(capacity: usize, compare: F) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            compare,
        }
    }

    /// Insert an element. Duplicates are allowed.
    pub fn put(&mut self, element: T) {
        self.heap.push(element);
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove and return the smallest element, or `None` when empty.
    pub fn get(&mut self) -> Option<T> {
        if self.heap.is_empty() {
            return None;
        }
        let min = self.heap.swap_remove(0);
        self.sift_down(0);
        Some(min)
    }

    /// The smallest element without removing it, or `None` when empty.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.heap.first()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Drop all elements, keeping the allocation.
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    #[inline]
    fn less(&self, a: usize, b: usize) -> bool {
        (self.compare)(&self.heap[a], &self.heap[b]) == Ordering::Less
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if !self.less(idx, parent) {
                break;
            }
            self.heap.swap(idx, parent);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * idx + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut smaller = left;
            if right < len && self.less(right, left) {
                smaller = right;
            }
            // Stop once the parent is <= the smaller child.
            if !self.less(smaller, idx) {
                break;
            }
            self.heap.swap(idx, smaller);
            idx = smaller;
        }
    }
}

impl<T: fmt::Debug, F> fmt::Debug for MinHeap<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinHeap").field("heap", &self.heap).finish()
    }
}
