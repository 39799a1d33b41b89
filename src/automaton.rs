use crate::prelude::*;

mod construction;

mod simulation;
pub use simulation::SubsetIterator;

/// A nondeterministic finite automaton with epsilon edges, a single designated start vertex and
/// a single designated accept vertex. The automaton exclusively owns the [`Store`] that holds its
/// vertices and edges.
///
/// There is deliberately no `Clone` implementation. The combinators in [`Nfa::union`],
/// [`Nfa::concat`] and [`Nfa::kleene_star`] consume their operands and move the underlying
/// arenas into the result, so an operand can never be observed after it was combined.
///
/// # Example
/// ```
/// use nfa_residue::prelude::*;
///
/// // (a + b)*c
/// let nfa = Nfa::atom('a')
///     .union(Nfa::atom('b'))
///     .kleene_star()
///     .concat(Nfa::atom('c'));
/// assert!(nfa.accepts("abbac"));
/// assert!(nfa.accepts("c"));
/// assert!(!nfa.accepts("ab"));
/// ```
#[derive(Debug)]
pub struct Nfa {
    store: Store,
    start: Vertex,
    accept: Vertex,
}

impl Nfa {
    /// Creates the automaton for the empty word, which consists of a single vertex that is both
    /// start and accept. Further vertices and edges can be added by hand with
    /// [`Nfa::add_vertex`] and [`Nfa::add_edge`].
    pub fn new() -> Self {
        let mut store = Store::new();
        let q = store.new_vertex();
        Self {
            store,
            start: q,
            accept: q,
        }
    }

    /// Builds an automaton from its constituent parts. Panics if `start` or `accept` does not
    /// belong to `store`.
    pub fn from_parts(store: Store, start: Vertex, accept: Vertex) -> Self {
        assert!(store.contains(start), "start vertex does not exist");
        assert!(store.contains(accept), "accept vertex does not exist");
        Self {
            store,
            start,
            accept,
        }
    }

    /// Decomposes `self` into a tuple of its constituents.
    pub fn into_parts(self) -> (Store, Vertex, Vertex) {
        (self.store, self.start, self.accept)
    }

    /// Returns the start vertex.
    pub fn start(&self) -> Vertex {
        self.start
    }

    /// Returns the accept vertex.
    pub fn accept(&self) -> Vertex {
        self.accept
    }

    /// Designates `vertex` as the start vertex. Panics if it does not exist.
    pub fn set_start(&mut self, vertex: Vertex) {
        assert!(self.store.contains(vertex), "start vertex does not exist");
        self.start = vertex;
    }

    /// Designates `vertex` as the accept vertex. Panics if it does not exist.
    pub fn set_accept(&mut self, vertex: Vertex) {
        assert!(self.store.contains(vertex), "accept vertex does not exist");
        self.accept = vertex;
    }

    /// Adds a fresh vertex without any edges.
    pub fn add_vertex(&mut self) -> Vertex {
        self.store.new_vertex()
    }

    /// Adds an edge, see [`Store::add_edge`].
    pub fn add_edge<L: Into<Label>>(&mut self, from: Vertex, to: Vertex, label: L) {
        self.store.add_edge(from, to, label)
    }

    /// Gives access to the underlying arena.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Returns the edges leaving `vertex`, in insertion order. Vertices that do not exist have
    /// no edges.
    pub fn edges_from(&self, vertex: Vertex) -> impl Iterator<Item = &Edge> + '_ {
        self.store.edges_from(vertex).into_iter().flatten()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.store.vertex_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.store.edge_count()
    }

    /// Starts a subset simulation of `self`.
    pub fn iter(&self) -> SubsetIterator<'_> {
        SubsetIterator::new(self)
    }

    /// Returns true if `self` accepts `word`.
    pub fn accepts<W: AsRef<str>>(&self, word: W) -> bool {
        let mut it = self.iter();
        it.run(word.as_ref().chars());
        it.is_accepting()
    }
}

impl Default for Nfa {
    fn default() -> Self {
        Self::new()
    }
}
