use std::ops::{BitAnd, BitOr};

use tracing::trace;

use crate::prelude::*;

/// Thompson style combinators. Every combinator moves the arena of its operand into `self`,
/// shifting the operand's vertex indices, and then connects the pieces with epsilon edges.
/// The vertex counts are
/// - [`Nfa::epsilon`]: 1
/// - [`Nfa::atom`]: 2
/// - [`Nfa::concat`]: `m + n`
/// - [`Nfa::union`]: `m + n + 2`
/// - [`Nfa::kleene_star`]: `n + 1`
impl Nfa {
    /// The automaton accepting only the empty word, same as [`Nfa::new`].
    pub fn epsilon() -> Self {
        Self::new()
    }

    /// The automaton accepting exactly the one-symbol word `c`.
    pub fn atom(c: char) -> Self {
        let mut store = Store::with_capacity(2, 1);
        let start = store.new_vertex();
        let accept = store.new_vertex();
        store.add_edge(start, accept, c);
        Self::from_parts(store, start, accept)
    }

    /// Accepts the union of the languages of `self` and `other`.
    pub fn union(mut self, other: Nfa) -> Nfa {
        self.union_with(other);
        self
    }

    /// Accepts every word that splits into a word of `self` followed by a word of `other`.
    pub fn concat(mut self, other: Nfa) -> Nfa {
        self.concat_with(other);
        self
    }

    /// Accepts every finite repetition of words of `self`, including the empty word.
    pub fn kleene_star(mut self) -> Nfa {
        self.star_in_place();
        self
    }

    /// In-place variant of [`Nfa::union`]. A fresh start vertex gets epsilon edges to both old
    /// start vertices and both old accept vertices get epsilon edges to a fresh accept vertex.
    pub fn union_with(&mut self, other: Nfa) {
        let (other_start, other_accept) = self.absorb(other);
        let start = self.add_vertex();
        let accept = self.add_vertex();

        self.add_edge(start, self.start(), Label::Epsilon);
        self.add_edge(start, other_start, Label::Epsilon);
        self.add_edge(self.accept(), accept, Label::Epsilon);
        self.add_edge(other_accept, accept, Label::Epsilon);

        trace!(
            "union: {} -> {{{}, {}}}, {{{}, {}}} -> {}",
            start.show(),
            self.start().show(),
            other_start.show(),
            self.accept().show(),
            other_accept.show(),
            accept.show()
        );
        self.set_start(start);
        self.set_accept(accept);
    }

    /// In-place variant of [`Nfa::concat`]. The accept vertex of `self` gets an epsilon edge to
    /// the start of `other`, whose accept vertex becomes the new accept vertex.
    pub fn concat_with(&mut self, other: Nfa) {
        let (other_start, other_accept) = self.absorb(other);
        self.add_edge(self.accept(), other_start, Label::Epsilon);
        trace!(
            "concat: {} -> {}",
            self.accept().show(),
            other_start.show()
        );
        self.set_accept(other_accept);
    }

    /// In-place variant of [`Nfa::kleene_star`]. A fresh hub vertex gets an epsilon edge to the
    /// old start and the old accept gets an epsilon edge back to the hub, which becomes both
    /// start and accept.
    ///
    /// The loop has to go through a fresh vertex. Looping from the old accept straight back to
    /// the old start would let a run re-enter the start in the middle of an iteration whenever
    /// the old start already has incoming edges, as it does for `(b*c)*`.
    pub fn star_in_place(&mut self) {
        let hub = self.add_vertex();
        self.add_edge(hub, self.start(), Label::Epsilon);
        self.add_edge(self.accept(), hub, Label::Epsilon);
        trace!("star: hub {}", hub.show());
        self.set_start(hub);
        self.set_accept(hub);
    }

    /// Moves the arena of `other` into `self` and returns the renumbered start and accept
    /// vertex of `other`.
    fn absorb(&mut self, other: Nfa) -> (Vertex, Vertex) {
        let (store, start, accept) = other.into_parts();
        let offset = self.store.absorb(store);
        (start.shifted(offset), accept.shifted(offset))
    }
}

impl BitOr for Nfa {
    type Output = Nfa;

    /// Same as [`Nfa::union`].
    fn bitor(self, rhs: Nfa) -> Self::Output {
        self.union(rhs)
    }
}

impl BitAnd for Nfa {
    type Output = Nfa;

    /// Same as [`Nfa::concat`].
    fn bitand(self, rhs: Nfa) -> Self::Output {
        self.concat(rhs)
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::prelude::*;

    /// All words over `alphabet` of length at most `max_len`.
    fn words(alphabet: &[char], max_len: usize) -> Vec<String> {
        std::iter::once(String::new())
            .chain((1..=max_len).flat_map(|len| {
                std::iter::repeat(alphabet.iter().copied())
                    .take(len)
                    .multi_cartesian_product()
                    .map(|w| w.into_iter().collect::<String>())
            }))
            .collect()
    }

    #[test]
    fn word_enumeration() {
        assert_eq!(words(&['a', 'b'], 1), vec!["", "a", "b"]);
        assert_eq!(words(&['a', 'b'], 2).len(), 7);
    }

    #[test]
    fn atom_accepts_exactly_one_symbol() {
        for c in ['a', 'b', 'z'] {
            let nfa = Nfa::atom(c);
            for w in words(&['a', 'b', 'z'], 3) {
                assert_eq!(nfa.accepts(&w), w == c.to_string(), "{c} on {w:?}");
            }
        }
    }

    #[test]
    fn epsilon_accepts_only_empty_word() {
        let nfa = Nfa::epsilon();
        for w in words(&['a', 'b'], 3) {
            assert_eq!(nfa.accepts(&w), w.is_empty());
        }
    }

    #[test]
    fn union_is_disjunction() {
        let a = || Nfa::atom('a').concat(Nfa::atom('b'));
        let b = || Nfa::atom('b').kleene_star();
        let union = a().union(b());
        for w in words(&['a', 'b'], 4) {
            assert_eq!(union.accepts(&w), a().accepts(&w) || b().accepts(&w), "{w:?}");
        }
    }

    #[test]
    fn concat_splits() {
        let a = || Nfa::atom('a').union(Nfa::epsilon());
        let b = || Nfa::atom('a').concat(Nfa::atom('b')).kleene_star();
        let concat = a().concat(b());
        for w in words(&['a', 'b'], 5) {
            let expected = (0..=w.len()).any(|i| a().accepts(&w[..i]) && b().accepts(&w[i..]));
            assert_eq!(concat.accepts(&w), expected, "{w:?}");
        }
    }

    #[test]
    fn star_repeats() {
        let nfa = Nfa::atom('a');
        assert!(!nfa.accepts("aa"));
        let nfa = nfa.kleene_star();
        assert!(nfa.accepts(""));
        assert!(nfa.accepts("a"));
        assert!(nfa.accepts("aaaa"));
        assert!(!nfa.accepts("ab"));
    }

    #[test]
    fn star_of_concat_with_starred_prefix() {
        // (b*c)* must not accept "b", which a loop straight into the old start would allow
        let nfa = Nfa::atom('b')
            .kleene_star()
            .concat(Nfa::atom('c'))
            .kleene_star();
        assert!(nfa.accepts(""));
        assert!(nfa.accepts("c"));
        assert!(nfa.accepts("bbcbc"));
        assert!(!nfa.accepts("b"));
        assert!(!nfa.accepts("cb"));
    }

    #[test]
    fn union_with_starred_operand() {
        // a* + b must not accept "ab"
        let nfa = Nfa::atom('a').kleene_star().union(Nfa::atom('b'));
        assert!(nfa.accepts("aaa"));
        assert!(nfa.accepts("b"));
        assert!(!nfa.accepts("ab"));
        assert!(!nfa.accepts("bb"));
    }

    #[test]
    fn mixed_operations() {
        let mut nfa = Nfa::atom('a');
        nfa.union_with(Nfa::atom('b'));
        nfa.concat_with(Nfa::atom('c') | Nfa::atom('a'));

        assert_ne!(nfa.start(), nfa.accept());
        for w in ["ac", "aa", "bc", "ba"] {
            assert!(nfa.accepts(w), "{w}");
        }
        for w in ["bb", "a", "b", "c", ""] {
            assert!(!nfa.accepts(w), "{w}");
        }

        nfa.star_in_place();
        assert!(nfa.accepts("acaabcbaba"));

        nfa.union_with(Nfa::atom('a') & Nfa::atom('b').kleene_star());
        assert!(nfa.accepts("a"));
        assert!(nfa.accepts("abb"));
        assert!(nfa.accepts("abbbb"));
        assert!(!nfa.accepts("abba"));
    }

    #[test]
    fn vertex_counts() {
        let atom = Nfa::atom('a');
        assert_eq!((atom.vertex_count(), atom.edge_count()), (2, 1));
        assert_eq!(Nfa::epsilon().vertex_count(), 1);

        let union = Nfa::atom('a').union(Nfa::epsilon());
        assert_eq!(union.vertex_count(), 2 + 1 + 2);
        assert_eq!(union.edge_count(), 1 + 4);

        let concat = union.concat(Nfa::atom('b'));
        assert_eq!(concat.vertex_count(), 5 + 2);
        assert_eq!(concat.edge_count(), 5 + 1 + 1);

        let star = concat.kleene_star();
        assert_eq!(star.vertex_count(), 7 + 1);
        assert_eq!(star.edge_count(), 7 + 2);
        assert_eq!(star.start(), star.accept());
    }

    #[test]
    fn operands_keep_their_edges() {
        let nfa = Nfa::atom('a').concat(Nfa::atom('b'));
        let labels = nfa
            .store()
            .edges()
            .map(|e| (e.source().index(), e.label(), e.target().index()))
            .collect_vec();
        assert_eq!(
            labels,
            vec![
                (0, Label::Symbol('a'), 1),
                (2, Label::Symbol('b'), 3),
                (1, Label::Epsilon, 2)
            ]
        );
        assert_eq!((nfa.start().index(), nfa.accept().index()), (0, 3));
    }
}
