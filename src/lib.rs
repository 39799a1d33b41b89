//! Library for compiling postfix regular expressions into nondeterministic finite automata
//! and deciding questions about the lengths of the words they accept.
//!
//! An expression such as `ab+c.` is written in reverse-Polish notation over the operators
//! `.` (concatenation), `+` (alternation) and `*` (Kleene star), with lowercase letters as
//! symbols and `1` standing for the empty word. The [`token`] module reads such a string into
//! a sequence of [`token::Token`]s, which are then reduced by the generic stack machine in
//! [`rpn`]. Every reduction step calls one of the combinators of [`Nfa`], which builds the
//! automaton Thompson-style: each operand owns its own arena of vertices and edges, and
//! combining two operands moves the second arena into the first with shifted indices, so
//! no graph is ever copied.
//!
//! The main question answered by the crate is whether the language of an automaton contains
//! a word whose length is congruent to a residue `r` modulo `m`. This is solved in
//! [`solver`] by a depth first search over the product of the automaton's vertices with
//! `Z/mZ`, without ever materializing that product. The search itself is implemented in
//! [`traversal`] as a protocol that is generic over a [`traversal::Visitor`], which decides
//! what "visited" means, when to prune and how to undo its own state when backtracking.
//!
//! ```
//! use nfa_residue::prelude::*;
//!
//! assert!(solve("ab+c.aba.*.bac.+.+*", 3, 2).unwrap());
//! assert!(!solve("acb..bab.c.*.ab.ba.+.+*a.", 3, 0).unwrap());
//! ```
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use nfa_residue::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        automaton::{Nfa, SubsetIterator},
        math,
        rpn::{evaluate, EvaluationError, Operation},
        solver::{reachable_residues, solve, ResidueVisitor, SolveError},
        token::{parse_postfix, ExpressionError, ParseError, Token},
        transition_system::{Edge, Label, Store, Vertex},
        traversal::{ReachableVertices, Visitor},
        Show,
    };
}

/// This module contains the hash map alias and the residue arithmetic which are used
/// throughout the crate.
pub mod math;

/// Vertices, labels, edges and the arena that stores them.
pub mod transition_system;

/// Defines the [`Nfa`] together with its construction algebra and subset simulation.
pub mod automaton;
pub use automaton::Nfa;

/// Generic depth first traversal of an [`Nfa`] driven by a visitor.
pub mod traversal;

/// Decides whether an automaton accepts a word of a given length modulo some number.
pub mod solver;
pub use solver::solve;

/// Stack machine for evaluating expressions given in reverse-Polish notation.
pub mod rpn;

/// Reads postfix regular expressions into tokens.
pub mod token;

/// Graphviz export of automata. This is feature gated behind the `dot` feature.
#[cfg(feature = "dot")]
pub mod dot;

/// Helper trait which can be used to display vertices, labels, edges and such.
pub trait Show {
    /// Returns a human readable representation of `self`, for a vertex that should be
    /// for example q0, q1, q2, ... and for an edge (q0, a, q1) it should be (q0, a, q1).
    /// This is mainly used for logging and for rendering.
    fn show(&self) -> String;

    /// Show a collection of the thing, for a collection of vertices this should be
    /// {q0, q1, q2, ...}.
    fn show_collection<'a, I>(iter: I) -> String
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        format!(
            "{{{}}}",
            itertools::Itertools::join(&mut iter.into_iter().map(|x| x.show()), ", ")
        )
    }
}

impl Show for usize {
    fn show(&self) -> String {
        self.to_string()
    }
    fn show_collection<'a, I: IntoIterator<Item = &'a Self>>(iter: I) -> String
    where
        Self: 'a,
    {
        format!(
            "[{}]",
            itertools::Itertools::join(&mut iter.into_iter().map(|x| x.show()), ", ")
        )
    }
}

impl Show for char {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for bool {
    fn show(&self) -> String {
        match self {
            true => "+",
            false => "-",
        }
        .to_string()
    }
}

impl<S: Show> Show for [S] {
    fn show(&self) -> String {
        S::show_collection(self.iter())
    }
}

impl<S: Show> Show for Vec<S> {
    fn show(&self) -> String {
        S::show_collection(self.iter())
    }
}

impl<S: Show, T: Show> Show for (S, T) {
    fn show(&self) -> String {
        format!("({}, {})", self.0.show(), self.1.show())
    }
}

impl<S: Show> Show for &S {
    fn show(&self) -> String {
        S::show(*self)
    }
}
