use tracing::trace;

use crate::prelude::*;

/// Stores information characterizing a vertex, which are the indices of the first and last
/// edge leaving it.
#[derive(Clone, Debug, Default)]
struct VertexData {
    first_edge: Option<usize>,
    last_edge: Option<usize>,
}

/// An edge together with a pointer to the next edge leaving the same source.
#[derive(Clone, Debug)]
struct StoredEdge {
    edge: Edge,
    next: Option<usize>,
}

/// Arena that owns the vertices and edges of an automaton. It stores a list of vertices and a
/// list of edges, each vertex points to the first and last edge leaving it and each edge points
/// to the next one with the same source. This keeps the edges of every vertex in insertion
/// order while appending stays constant time.
///
/// Nothing is ever removed from a store. Two stores are combined with [`Store::absorb`], which
/// moves the edges and vertices of the absorbed store to the end of the arena.
#[derive(Clone, Debug, Default)]
pub struct Store {
    vertices: Vec<VertexData>,
    edges: Vec<StoredEdge>,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that has room for the given number of vertices and edges.
    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            edges: Vec::with_capacity(edges),
        }
    }

    /// Allocates a fresh vertex without incident edges.
    pub fn new_vertex(&mut self) -> Vertex {
        let id = self.vertices.len();
        self.vertices.push(VertexData::default());
        Vertex::new(id)
    }

    /// Appends an edge from `from` to `to` with the given label. Parallel edges are kept, there
    /// is no de-duplication. Panics if one of the endpoints does not belong to `self`.
    pub fn add_edge<L: Into<Label>>(&mut self, from: Vertex, to: Vertex, label: L) {
        assert!(
            self.contains(from) && self.contains(to),
            "cannot add edge from {} to {}, there are only {} vertices",
            from.show(),
            to.show(),
            self.vertices.len()
        );
        let edge_id = self.edges.len();
        let source = &mut self.vertices[from.index()];
        match source.last_edge {
            Some(last) => {
                debug_assert!(self.edges[last].next.is_none());
                self.edges[last].next = Some(edge_id);
            }
            None => {
                debug_assert!(source.first_edge.is_none());
                source.first_edge = Some(edge_id);
            }
        }
        source.last_edge = Some(edge_id);
        self.edges.push(StoredEdge {
            edge: Edge::new(from, label.into(), to),
            next: None,
        });
    }

    /// Returns true if `vertex` was created by this store.
    pub fn contains(&self, vertex: Vertex) -> bool {
        vertex.index() < self.vertices.len()
    }

    /// Number of vertices ever created in this store.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges ever added to this store.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterates over all vertices in the order in which they were created.
    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        (0..self.vertices.len()).map(Vertex::new)
    }

    /// Iterates over all edges in the order in which they were added.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().map(|stored| &stored.edge)
    }

    /// Returns an iterator over the edges leaving `vertex` in insertion order, or `None` if
    /// the vertex does not exist.
    pub fn edges_from(&self, vertex: Vertex) -> Option<EdgesFrom<'_>> {
        let data = self.vertices.get(vertex.index())?;
        Some(EdgesFrom::new(&self.edges, data.first_edge))
    }

    /// Moves all vertices and edges of `other` into `self`. The vertices of `other` are
    /// renumbered by adding the returned offset to their index, their relative order and the
    /// order of their outgoing edges is preserved.
    pub fn absorb(&mut self, other: Store) -> usize {
        let offset = self.vertices.len();
        let edge_offset = self.edges.len();
        trace!(
            "absorbing {} vertices and {} edges at offset {offset}",
            other.vertices.len(),
            other.edges.len()
        );

        self.vertices
            .extend(other.vertices.into_iter().map(|data| VertexData {
                first_edge: data.first_edge.map(|e| e + edge_offset),
                last_edge: data.last_edge.map(|e| e + edge_offset),
            }));
        self.edges
            .extend(other.edges.into_iter().map(|stored| StoredEdge {
                edge: stored.edge.shifted(offset),
                next: stored.next.map(|e| e + edge_offset),
            }));
        offset
    }
}

/// Iterator over the edges leaving a vertex of a [`Store`].
#[derive(Clone)]
pub struct EdgesFrom<'a> {
    edges: &'a [StoredEdge],
    current: Option<usize>,
}

impl<'a> EdgesFrom<'a> {
    fn new(edges: &'a [StoredEdge], current: Option<usize>) -> Self {
        Self { edges, current }
    }
}

impl<'a> Iterator for EdgesFrom<'a> {
    type Item = &'a Edge;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.current?;
        let stored = &self.edges[idx];
        self.current = stored.next;
        Some(&stored.edge)
    }
}
