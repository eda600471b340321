use wayfind_core::Vertex;

/// A vertex with an associated cost, returned from distance-map queries.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub vertex: Vertex,
    pub cost: f64,
}

/// Sentinel cost meaning "unreachable" / "no path".
pub const UNREACHABLE: f64 = f64::INFINITY;

pub(crate) const NO_PARENT: u32 = u32::MAX;

// ---------------------------------------------------------------------------
// Per-vertex search state
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: f64,
    pub(crate) parent: u32,
    pub(crate) generation: u32,
    pub(crate) closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHABLE,
            parent: NO_PARENT,
            generation: 0,
            closed: false,
        }
    }
}

/// Dense g-score, parent and closed tables, indexed by vertex id.
///
/// Entries are stamped with the generation of the search that wrote them.
/// Starting a new search bumps the generation, which invalidates every entry
/// at once without touching the array.
#[derive(Default)]
pub(crate) struct NodeTable {
    nodes: Vec<Node>,
    generation: u32,
}

impl NodeTable {
    /// Prepare the table for a new search over `len` vertices.
    pub(crate) fn reset(&mut self, len: usize) {
        if self.nodes.len() < len {
            self.nodes.resize(len, Node::default());
        }
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stamps from 2^32 searches ago would look current.
            self.nodes.fill(Node::default());
            self.generation = 1;
        }
    }

    #[inline]
    fn current(&self, v: Vertex) -> Option<&Node> {
        self.nodes
            .get(v.index())
            .filter(|n| n.generation == self.generation)
    }

    /// Best known g for `v` in the current search.
    #[inline]
    pub(crate) fn g(&self, v: Vertex) -> Option<f64> {
        self.current(v).map(|n| n.g)
    }

    #[inline]
    pub(crate) fn parent(&self, v: Vertex) -> Option<Vertex> {
        self.current(v)
            .map(|n| n.parent)
            .filter(|&p| p != NO_PARENT)
            .map(Vertex)
    }

    #[inline]
    pub(crate) fn is_closed(&self, v: Vertex) -> bool {
        self.current(v).is_some_and(|n| n.closed)
    }

    /// Record a new best g for `v` together with its parent.
    #[inline]
    pub(crate) fn record(&mut self, v: Vertex, g: f64, parent: Option<Vertex>) {
        let generation = self.generation;
        let n = &mut self.nodes[v.index()];
        if n.generation != generation {
            n.generation = generation;
            n.closed = false;
        }
        n.g = g;
        n.parent = parent.map_or(NO_PARENT, Vertex::id);
    }

    #[inline]
    pub(crate) fn set_closed(&mut self, v: Vertex, closed: bool) {
        let generation = self.generation;
        if let Some(n) = self.nodes.get_mut(v.index()) {
            if n.generation == generation {
                n.closed = closed;
            }
        }
    }
}
