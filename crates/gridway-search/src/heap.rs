//! Indexed binary min-heap used as the A* open set.
//!
//! The heap stores cell indices in a 0-based binary tree layout
//! (`parent(i) = (i-1)/2`, children `2i+1` / `2i+2`) and keeps a position
//! table mapping each cell back to its slot. Membership tests are O(1) and
//! a key decrease re-sorts the single affected node in O(log n) by sifting
//! up from its recorded slot.
//!
//! Keys live outside the heap, in the caller's score arrays: ordering is
//! ascending `f`, ties broken by ascending `h` (heuristic distance to the
//! goal), and entries equal on both compare equal. Every operation takes
//! the score slices as arguments so the heap itself stays a plain index
//! structure.

/// Binary min-heap over cell indices with a position table.
#[derive(Debug, Default)]
pub struct IndexedMinHeap {
    /// Heap array of cell indices.
    slots: Vec<u32>,
    /// Slot of each cell, -1 when absent.
    pos: Vec<i32>,
}

#[inline]
fn before(a: usize, b: usize, f: &[i32], h: &[i32]) -> bool {
    f[a] < f[b] || (f[a] == f[b] && h[a] < h[b])
}

impl IndexedMinHeap {
    /// Create an empty heap with no capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Size the position table for `n` addressable cells, emptying the
    /// heap if the capacity changes. No-op when already sized to `n`.
    pub fn ensure_capacity(&mut self, n: usize) {
        if self.pos.len() != n {
            self.pos.clear();
            self.pos.resize(n, -1);
            self.slots.clear();
        }
    }

    /// Remove every entry, leaving capacity intact.
    pub fn clear(&mut self) {
        while let Some(s) = self.slots.pop() {
            self.pos[s as usize] = -1;
        }
    }

    /// Number of entries in the heap.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the heap is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether `node` is currently in the heap.
    #[inline]
    pub fn contains(&self, node: usize) -> bool {
        self.pos[node] >= 0
    }

    /// Insert `node`. The node must not already be present.
    pub fn push(&mut self, node: usize, f: &[i32], h: &[i32]) {
        debug_assert!(!self.contains(node));
        let slot = self.slots.len();
        self.slots.push(node as u32);
        self.pos[node] = slot as i32;
        self.sift_up(slot, f, h);
    }

    /// Remove and return the node with the smallest key.
    pub fn pop_min(&mut self, f: &[i32], h: &[i32]) -> Option<usize> {
        if self.slots.is_empty() {
            return None;
        }
        let last = self.slots.len() - 1;
        self.swap_slots(0, last);
        let min = self.slots.pop()? as usize;
        self.pos[min] = -1;
        if !self.slots.is_empty() {
            self.sift_down(0, f, h);
        }
        Some(min)
    }

    /// Restore heap order after `node`'s key strictly decreased.
    ///
    /// Sifting up from the recorded slot is sufficient for decrease-only
    /// updates. No-op if the node is not in the heap.
    pub fn decrease_key(&mut self, node: usize, f: &[i32], h: &[i32]) {
        let slot = self.pos[node];
        if slot >= 0 {
            self.sift_up(slot as usize, f, h);
        }
    }

    /// Swap two slots, keeping the position table in sync.
    #[inline]
    fn swap_slots(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
        self.pos[self.slots[a] as usize] = a as i32;
        self.pos[self.slots[b] as usize] = b as i32;
    }

    fn sift_up(&mut self, mut i: usize, f: &[i32], h: &[i32]) {
        while i > 0 {
            let p = (i - 1) / 2;
            if !before(self.slots[i] as usize, self.slots[p] as usize, f, h) {
                break;
            }
            self.swap_slots(p, i);
            i = p;
        }
    }

    fn sift_down(&mut self, mut i: usize, f: &[i32], h: &[i32]) {
        let n = self.slots.len();
        loop {
            let mut smallest = i;
            let l = 2 * i + 1;
            let r = 2 * i + 2;
            if l < n && before(self.slots[l] as usize, self.slots[smallest] as usize, f, h) {
                smallest = l;
            }
            if r < n && before(self.slots[r] as usize, self.slots[smallest] as usize, f, h) {
                smallest = r;
            }
            if smallest == i {
                break;
            }
            self.swap_slots(i, smallest);
            i = smallest;
        }
    }
}
