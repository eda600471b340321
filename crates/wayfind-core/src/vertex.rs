//! Dense vertex identifiers.
//!
//! [`Vertex`] is a newtype over `u32`. Ids are allocated once per graph,
//! starting at zero with no gaps, and never renumbered afterwards, so
//! per-search tables can be plain `Vec`s indexed by [`Vertex::index`].

use std::fmt;

/// An opaque vertex identifier. Identity and ordering are by id only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex(pub u32);

impl Vertex {
    /// Create a vertex from its id.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the underlying id.
    pub const fn id(self) -> u32 {
        self.0
    }

    /// The id as a table index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for Vertex {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl From<Vertex> for u32 {
    fn from(v: Vertex) -> Self {
        v.0
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}
