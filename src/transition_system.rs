use crate::Show;

mod edge;
pub use edge::{Edge, Label};

mod store;
pub use store::{EdgesFrom, Store};

/// Identifies a vertex inside one [`Store`]. Vertices carry no payload and are never removed,
/// an index stays valid for as long as the store that created it lives. Indices of two
/// different stores must not be mixed, when stores are merged via [`Store::absorb`] the
/// indices of the absorbed store are shifted.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Vertex(usize);

impl Vertex {
    /// Creates a vertex identifier from a raw arena index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw arena index of `self`.
    pub fn index(&self) -> usize {
        self.0
    }

    pub(crate) fn shifted(self, offset: usize) -> Self {
        Self(self.0 + offset)
    }
}

impl From<usize> for Vertex {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl Show for Vertex {
    fn show(&self) -> String {
        format!("q{}", self.0)
    }
}
