//! Binary min-heap used as the A* open set.
//!
//! # Layout
//!
//! The heap is two [`VectorCompleteTree`]s, one holding `f32` priorities and
//! one holding `u32` payload indices.  Every swap is applied to both trees,
//! so position `p` in one always pairs with position `p` in the other.
//! Trees are 1-based: slot 0 is a dummy so that the parent of `p` is `p / 2`
//! and its children are `2p` and `2p + 1`.
//!
//! # Capacity
//!
//! After an insert pushes the size above `capacity`, the last leaf is removed
//! from both trees.  The dropped entry is whatever sits in the last slot once
//! the new element has sifted up: usually a high priority, but not
//! necessarily the highest.  A* treats a dropped entry as never discovered,
//! so a small capacity bounds search effort on large maps at the price of
//! possibly missing a path.  `evicted()` counts the drops.

/// Open-set size the colony ships with.
pub const DEFAULT_CAPACITY: usize = 128;

// ── VectorCompleteTree ────────────────────────────────────────────────────────

/// A complete binary tree stored level by level in a `Vec`, 1-based.
#[derive(Clone, Debug)]
pub struct VectorCompleteTree<E> {
    nodes: Vec<E>,
}

impl<E: Copy + Default> Default for VectorCompleteTree<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Copy + Default> VectorCompleteTree<E> {
    pub fn new() -> Self {
        Self { nodes: vec![E::default()] }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity + 1);
        nodes.push(E::default());
        Self { nodes }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Position of the root.  Only meaningful when the tree is not empty.
    #[inline]
    pub const fn root() -> usize {
        1
    }

    #[inline]
    pub const fn parent(p: usize) -> usize {
        p / 2
    }

    #[inline]
    pub const fn left(p: usize) -> usize {
        2 * p
    }

    #[inline]
    pub const fn right(p: usize) -> usize {
        2 * p + 1
    }

    #[inline]
    pub fn get(&self, p: usize) -> E {
        self.nodes[p]
    }

    #[inline]
    pub fn swap(&mut self, a: usize, b: usize) {
        self.nodes.swap(a, b);
    }

    /// Append `e` as the new last leaf and return its position.
    #[inline]
    pub fn push(&mut self, e: E) -> usize {
        self.nodes.push(e);
        self.len()
    }

    /// Remove and return the last leaf.
    #[inline]
    pub fn pop(&mut self) -> Option<E> {
        if self.is_empty() { None } else { self.nodes.pop() }
    }

    pub fn clear(&mut self) {
        self.nodes.truncate(1);
    }
}

// ── HeapPriorityQueue ─────────────────────────────────────────────────────────

/// Min-priority queue of `u32` indices keyed by `f32` priority.
///
/// Equal priorities come out in an unspecified but deterministic order.
#[derive(Clone, Debug)]
pub struct HeapPriorityQueue {
    priorities: VectorCompleteTree<f32>,
    indices: VectorCompleteTree<u32>,
    capacity: usize,
    evicted: u64,
}

impl Default for HeapPriorityQueue {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl HeapPriorityQueue {
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "priority queue capacity must be at least 1");
        Self {
            priorities: VectorCompleteTree::with_capacity(capacity + 1),
            indices: VectorCompleteTree::with_capacity(capacity + 1),
            capacity,
            evicted: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.priorities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.priorities.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries dropped by the capacity bound since construction.
    #[inline]
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    pub fn clear(&mut self) {
        self.priorities.clear();
        self.indices.clear();
    }

    /// Insert `index` with `priority`, then enforce the capacity bound.
    pub fn insert(&mut self, index: u32, priority: f32) {
        let mut v = self.priorities.push(priority);
        self.indices.push(index);

        while v > VectorCompleteTree::<f32>::root() {
            let u = VectorCompleteTree::<f32>::parent(v);
            if self.priorities.get(v) < self.priorities.get(u) {
                self.swap(v, u);
                v = u;
            } else {
                break;
            }
        }

        if self.len() > self.capacity {
            self.priorities.pop();
            self.indices.pop();
            self.evicted += 1;
        }
    }

    /// Index with the lowest priority.
    ///
    /// # Panics
    /// Panics if the queue is empty.
    pub fn min(&self) -> u32 {
        assert!(!self.is_empty(), "min() called on an empty priority queue");
        self.indices.get(VectorCompleteTree::<u32>::root())
    }

    /// Lowest priority currently held, or `None` when empty.
    pub fn min_priority(&self) -> Option<f32> {
        if self.is_empty() {
            None
        } else {
            Some(self.priorities.get(VectorCompleteTree::<f32>::root()))
        }
    }

    /// Drop the entry returned by [`min`](Self::min).
    ///
    /// # Panics
    /// Panics if the queue is empty.
    pub fn remove_min(&mut self) {
        assert!(!self.is_empty(), "remove_min() called on an empty priority queue");
        let root = VectorCompleteTree::<f32>::root();
        let last = self.len();
        self.swap(root, last);
        self.priorities.pop();
        self.indices.pop();

        let len = self.len();
        let mut u = root;
        loop {
            let left = VectorCompleteTree::<f32>::left(u);
            if left > len {
                break;
            }
            let right = VectorCompleteTree::<f32>::right(u);
            let smaller = if right <= len && self.priorities.get(right) < self.priorities.get(left) {
                right
            } else {
                left
            };
            if self.priorities.get(smaller) < self.priorities.get(u) {
                self.swap(smaller, u);
                u = smaller;
            } else {
                break;
            }
        }
    }

    /// Remove and return the lowest-priority index, or `None` when empty.
    pub fn pop_min(&mut self) -> Option<u32> {
        if self.is_empty() {
            return None;
        }
        let index = self.min();
        self.remove_min();
        Some(index)
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.priorities.swap(a, b);
        self.indices.swap(a, b);
    }
}
