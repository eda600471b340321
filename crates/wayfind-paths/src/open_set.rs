//! The A* open set: a min-priority queue of search nodes.
//!
//! Entries are stored in a min-heap keyed by `(f, -g, discovery order)`:
//! lowest `f` first; among equal `f`, the entry with the larger `g` (closer
//! to the goal) first; remaining ties go to the entry pushed earliest, so
//! expansion order is fully determined by the inputs.
//!
//! Several entries for one vertex may be live at once. The queue never
//! invalidates them; the search core discards stale ones when they surface.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use wayfind_core::Vertex;

/// A search node in the open set.
#[derive(Debug, Clone, Copy)]
pub struct OpenEntry {
    pub vertex: Vertex,
    /// Cost from the start when this entry was pushed.
    pub g: f64,
    /// `g` plus the heuristic estimate to the goal.
    pub f: f64,
    /// Discovery counter assigned at push time. Tie-break only.
    pub seq: u64,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    /// "Smaller" means "expand first". Wrapped in `Reverse` for the heap.
    fn cmp(&self, other: &Self) -> Ordering {
        self.f
            .total_cmp(&other.f)
            .then_with(|| other.g.total_cmp(&self.g))
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Min-priority open set with deterministic tie-breaking.
#[derive(Debug, Default)]
pub struct OpenSet {
    heap: BinaryHeap<Reverse<OpenEntry>>,
    seq: u64,
    peak: usize,
}

impl OpenSet {
    /// Create an empty open set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a node and return the discovery order assigned to it.
    pub fn push(&mut self, vertex: Vertex, g: f64, f: f64) -> u64 {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(OpenEntry { vertex, g, f, seq }));
        self.peak = self.peak.max(self.heap.len());
        seq
    }

    /// Remove and return the entry to expand next.
    pub fn pop(&mut self) -> Option<OpenEntry> {
        self.heap.pop().map(|Reverse(e)| e)
    }

    /// The entry [`pop`](Self::pop) would return, without removing it.
    pub fn peek(&self) -> Option<&OpenEntry> {
        self.heap.peek().map(|Reverse(e)| e)
    }

    /// Number of live entries, stale ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// High-water mark of [`len`](Self::len) since the last clear.
    pub fn peak_len(&self) -> usize {
        self.peak
    }

    /// Drop every entry and restart discovery numbering, keeping capacity.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.seq = 0;
        self.peak = 0;
    }
}
