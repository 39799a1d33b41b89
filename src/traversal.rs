use bit_set::BitSet;
use tracing::trace;

use crate::{prelude::*, transition_system::EdgesFrom};

/// Receives the events of a depth first traversal, see [`Nfa::visit_dfs`]. The traversal has no
/// notion of visited vertices itself, it is up to the visitor to prune edges that would lead
/// somewhere it has already been. A visitor that never prunes does not terminate on automata
/// with cycles.
pub trait Visitor {
    /// Called when the traversal enters `vertex`, including the start vertex.
    fn on_vertex(&mut self, vertex: Vertex);

    /// Called for every edge leaving the current vertex, in insertion order. Returning `true`
    /// descends into the target of `edge`, returning `false` prunes it.
    fn on_edge(&mut self, edge: &Edge) -> bool;

    /// Called after the traversal returns from an edge for which [`Visitor::on_edge`] returned
    /// `true`, so the visitor can undo whatever it did when descending.
    fn on_edge_return(&mut self, _edge: &Edge) {}
}

impl<V: Visitor + ?Sized> Visitor for &mut V {
    fn on_vertex(&mut self, vertex: Vertex) {
        (**self).on_vertex(vertex)
    }

    fn on_edge(&mut self, edge: &Edge) -> bool {
        (**self).on_edge(edge)
    }

    fn on_edge_return(&mut self, edge: &Edge) {
        (**self).on_edge_return(edge)
    }
}

struct Frame<'a> {
    edges: Option<EdgesFrom<'a>>,
    via: Option<&'a Edge>,
}

impl Nfa {
    /// Runs a depth first traversal from the start vertex which reports to `visitor`. For each
    /// vertex `q` that is entered, `on_vertex(q)` is called, then every edge `e` leaving `q` is
    /// offered via `on_edge(e)`, and if it is accepted, the target is traversed before
    /// `on_edge_return(e)` is called and the next edge is offered.
    ///
    /// The traversal uses an explicit stack, so its depth is not limited by the call stack.
    pub fn visit_dfs<V: Visitor>(&self, mut visitor: V) {
        let store = self.store();
        visitor.on_vertex(self.start());
        let mut stack = vec![Frame {
            edges: store.edges_from(self.start()),
            via: None,
        }];

        while let Some(frame) = stack.last_mut() {
            match frame.edges.as_mut().and_then(|edges| edges.next()) {
                Some(edge) => {
                    if visitor.on_edge(edge) {
                        visitor.on_vertex(edge.target());
                        stack.push(Frame {
                            edges: store.edges_from(edge.target()),
                            via: Some(edge),
                        });
                    } else {
                        trace!("pruned {}", edge.show());
                    }
                }
                None => {
                    if let Some(edge) = stack.pop().and_then(|frame| frame.via) {
                        visitor.on_edge_return(edge);
                    }
                }
            }
        }
    }
}

/// A [`Visitor`] that explores every vertex reachable from the start exactly once.
#[derive(Debug, Clone)]
pub struct ReachableVertices {
    size: usize,
    visited: BitSet,
}

impl ReachableVertices {
    /// Creates a visitor for the given automaton.
    pub fn new(nfa: &Nfa) -> Self {
        Self {
            size: nfa.vertex_count(),
            visited: BitSet::with_capacity(nfa.vertex_count()),
        }
    }

    /// Runs the traversal on `nfa` and returns the visitor afterwards.
    pub fn explore(nfa: &Nfa) -> Self {
        let mut visitor = Self::new(nfa);
        nfa.visit_dfs(&mut visitor);
        visitor
    }

    /// Returns true if `vertex` was reached.
    pub fn is_reachable(&self, vertex: Vertex) -> bool {
        self.visited.contains(vertex.index())
    }

    /// Iterates over all reached vertices in increasing order.
    pub fn reachable(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.visited.iter().map(Vertex::new)
    }

    /// Returns true if every vertex of the automaton was reached.
    pub fn all_reachable(&self) -> bool {
        self.visited.len() == self.size
    }
}

impl Visitor for ReachableVertices {
    fn on_vertex(&mut self, vertex: Vertex) {
        self.visited.insert(vertex.index());
    }

    fn on_edge(&mut self, edge: &Edge) -> bool {
        !self.visited.contains(edge.target().index())
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::prelude::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Enter(usize),
        Take(usize, usize),
        Prune(usize, usize),
        Return(usize, usize),
    }

    #[derive(Default)]
    struct Recorder {
        seen: Vec<bool>,
        events: Vec<Event>,
    }

    impl Visitor for Recorder {
        fn on_vertex(&mut self, vertex: Vertex) {
            if self.seen.len() <= vertex.index() {
                self.seen.resize(vertex.index() + 1, false);
            }
            self.seen[vertex.index()] = true;
            self.events.push(Event::Enter(vertex.index()));
        }

        fn on_edge(&mut self, edge: &Edge) -> bool {
            let (s, t) = (edge.source().index(), edge.target().index());
            if self.seen.get(t).copied().unwrap_or(false) {
                self.events.push(Event::Prune(s, t));
                false
            } else {
                self.events.push(Event::Take(s, t));
                true
            }
        }

        fn on_edge_return(&mut self, edge: &Edge) {
            self.events
                .push(Event::Return(edge.source().index(), edge.target().index()));
        }
    }

    #[test]
    fn event_order() {
        let mut nfa = Nfa::new();
        let (q1, q2) = (nfa.add_vertex(), nfa.add_vertex());
        nfa.add_edge(nfa.start(), q1, 'a');
        nfa.add_edge(q1, q2, 'b');
        nfa.add_edge(q1, nfa.start(), Label::Epsilon);
        nfa.add_edge(nfa.start(), q2, 'c');

        let mut recorder = Recorder::default();
        nfa.visit_dfs(&mut recorder);

        use Event::*;
        assert_eq!(
            recorder.events,
            vec![
                Enter(0),
                Take(0, 1),
                Enter(1),
                Take(1, 2),
                Enter(2),
                Return(1, 2),
                Prune(1, 0),
                Return(0, 1),
                Prune(0, 2),
            ]
        );
    }

    #[test]
    fn all_reachable() {
        let nfa = Nfa::atom('a')
            .union(Nfa::atom('b').concat(Nfa::atom('a')))
            .kleene_star()
            .concat(Nfa::atom('a').concat(Nfa::atom('g').kleene_star()));
        let visitor = ReachableVertices::explore(&nfa);
        assert!(visitor.all_reachable());
        assert_eq!(visitor.reachable().count(), nfa.vertex_count());
    }

    #[test]
    fn unreachable_vertex() {
        let mut nfa = Nfa::atom('a');
        let lonely = nfa.add_vertex();
        nfa.add_edge(lonely, nfa.accept(), 'b');
        let visitor = ReachableVertices::explore(&nfa);
        assert!(!visitor.all_reachable());
        assert!(!visitor.is_reachable(lonely));
        assert_eq!(
            visitor.reachable().map(|q| q.index()).collect_vec(),
            vec![0, 1]
        );
    }

    #[test_log::test]
    fn epsilon_cycles_terminate() {
        let nfa = Nfa::epsilon()
            .kleene_star()
            .kleene_star()
            .union(Nfa::epsilon().kleene_star())
            .kleene_star();
        let visitor = ReachableVertices::explore(&nfa);
        assert!(visitor.all_reachable());
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        let nfa = (0..50_000).fold(Nfa::epsilon(), |acc, _| acc.concat(Nfa::atom('a')));
        let visitor = ReachableVertices::explore(&nfa);
        assert!(visitor.is_reachable(nfa.accept()));
    }
}
