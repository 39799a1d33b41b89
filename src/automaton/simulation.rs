use std::collections::VecDeque;

use bit_set::BitSet;
use tracing::trace;

use crate::prelude::*;

/// Simulates an [`Nfa`] on the fly by tracking the set of vertices that are currently active.
/// The set is always closed under epsilon edges, i.e. no active vertex has an epsilon edge to
/// an inactive one.
#[derive(Clone, Debug)]
pub struct SubsetIterator<'a> {
    nfa: &'a Nfa,
    active: BitSet,
}

impl<'a> SubsetIterator<'a> {
    /// Starts in the epsilon closure of the start vertex.
    pub fn new(nfa: &'a Nfa) -> Self {
        let mut active = BitSet::with_capacity(nfa.vertex_count());
        active.insert(nfa.start().index());
        let mut out = Self { nfa, active };
        out.close();
        out
    }

    /// Reads `c`, the active set becomes the epsilon closure of all targets of edges labeled
    /// with `c` that leave an active vertex.
    pub fn step(&mut self, c: char) {
        let mut next = BitSet::with_capacity(self.nfa.vertex_count());
        for q in self.active.iter() {
            for edge in self.nfa.edges_from(Vertex::new(q)) {
                if edge.label().matches(c) {
                    next.insert(edge.target().index());
                }
            }
        }
        self.active = next;
        self.close();
        trace!("read {c}, active {}", self.active().collect::<Vec<_>>().show());
    }

    /// Calls [`Self::step`] for every symbol in `word`.
    pub fn run<I: IntoIterator<Item = char>>(&mut self, word: I) {
        for c in word {
            self.step(c);
        }
    }

    /// Returns true if the accept vertex is active.
    pub fn is_accepting(&self) -> bool {
        self.active.contains(self.nfa.accept().index())
    }

    /// Returns true if no vertex is active anymore, in which case no extension of the input
    /// read so far can be accepted.
    pub fn is_dead(&self) -> bool {
        self.active.is_empty()
    }

    /// Iterates over the active vertices in increasing order.
    pub fn active(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.active.iter().map(Vertex::new)
    }

    fn close(&mut self) {
        let mut queue: VecDeque<usize> = self.active.iter().collect();
        while let Some(q) = queue.pop_front() {
            for edge in self.nfa.edges_from(Vertex::new(q)) {
                if edge.is_epsilon() && self.active.insert(edge.target().index()) {
                    queue.push_back(edge.target().index());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::prelude::*;

    #[test]
    fn closure_of_start() {
        let nfa = Nfa::atom('a').kleene_star().concat(Nfa::atom('b'));
        let it = nfa.iter();
        // start of a, hub, start of b
        assert_eq!(
            it.active().map(|q| q.index()).collect_vec(),
            vec![0, 2, 3]
        );
        assert!(!it.is_accepting());
    }

    #[test]
    fn stepping() {
        let nfa = Nfa::atom('a').kleene_star().concat(Nfa::atom('b'));
        let mut it = nfa.iter();
        it.run("aa".chars());
        assert!(!it.is_accepting());
        it.step('b');
        assert!(it.is_accepting());
        it.step('b');
        assert!(!it.is_accepting());
        assert!(it.is_dead());
    }

    #[test]
    fn empty_word_through_epsilon_chain() {
        let nfa = Nfa::epsilon()
            .concat(Nfa::epsilon())
            .union(Nfa::atom('x'))
            .kleene_star()
            .kleene_star();
        assert!(nfa.accepts(""));
        assert!(nfa.accepts("xx"));
        assert!(!nfa.accepts("y"));
    }

    #[test_log::test]
    fn null_character_is_not_epsilon() {
        let nfa = Nfa::atom('a');
        let mut it = nfa.iter();
        it.step('\0');
        assert!(it.is_dead());
    }
}
