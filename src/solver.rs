use bit_set::BitSet;
use thiserror::Error;
use tracing::{debug, trace};

use crate::{math::Residue, prelude::*};

/// A [`Visitor`] that explores the product of the vertices of an automaton with the residues
/// of path lengths modulo some fixed modulus. A pair (vertex, residue) is explored at most once,
/// epsilon edges keep the residue and every other edge advances it by one. Once the traversal
/// is done, [`ResidueVisitor::has_solution`] tells whether the accept vertex was reached with a
/// given residue, i.e. whether a word of such a length is accepted.
#[derive(Debug, Clone)]
pub struct ResidueVisitor {
    accept: Vertex,
    current: Residue,
    visited: math::Map<Vertex, BitSet>,
}

impl ResidueVisitor {
    /// Creates a visitor for `nfa` with the given modulus. Panics if `modulus` is zero.
    pub fn new(nfa: &Nfa, modulus: usize) -> Self {
        Self {
            accept: nfa.accept(),
            current: Residue::zero(modulus),
            visited: math::Map::default(),
        }
    }

    /// Runs the traversal on `nfa` and returns the visitor afterwards. Panics if `modulus`
    /// is zero.
    pub fn explore(nfa: &Nfa, modulus: usize) -> Self {
        let mut visitor = Self::new(nfa, modulus);
        nfa.visit_dfs(&mut visitor);
        debug!(
            "explored {} (vertex, residue) pairs modulo {modulus}, accepting residues {}",
            visitor.explored(),
            visitor.residues().show()
        );
        visitor
    }

    /// The modulus.
    pub fn modulus(&self) -> usize {
        self.current.modulus()
    }

    /// The residue of the length of the path the traversal is currently on.
    pub fn current_residue(&self) -> usize {
        self.current.value()
    }

    /// Returns true if `vertex` has been reached by a path whose length is congruent to
    /// `residue`.
    pub fn is_visited(&self, vertex: Vertex, residue: usize) -> bool {
        self.visited
            .get(&vertex)
            .is_some_and(|residues| residues.contains(residue))
    }

    /// Returns true if the accept vertex has been reached with `residue`.
    pub fn has_solution(&self, residue: usize) -> bool {
        self.is_visited(self.accept, residue)
    }

    /// All residues with which the accept vertex has been reached, in increasing order.
    pub fn residues(&self) -> Vec<usize> {
        self.visited
            .get(&self.accept)
            .map(|residues| residues.iter().collect())
            .unwrap_or_default()
    }

    /// Number of (vertex, residue) pairs that have been explored.
    pub fn explored(&self) -> usize {
        self.visited.values().map(BitSet::len).sum()
    }

    fn next_residue(&self, edge: &Edge) -> Residue {
        if edge.is_epsilon() {
            self.current
        } else {
            self.current.advance()
        }
    }
}

impl Visitor for ResidueVisitor {
    fn on_vertex(&mut self, vertex: Vertex) {
        let modulus = self.modulus();
        self.visited
            .entry(vertex)
            .or_insert_with(|| BitSet::with_capacity(modulus))
            .insert(self.current.value());
    }

    fn on_edge(&mut self, edge: &Edge) -> bool {
        let next = self.next_residue(edge);
        if self.is_visited(edge.target(), next.value()) {
            return false;
        }
        trace!(
            "following {} with residue {} -> {}",
            edge.show(),
            self.current.value(),
            next.value()
        );
        self.current = next;
        true
    }

    fn on_edge_return(&mut self, edge: &Edge) {
        if !edge.is_epsilon() {
            self.current = self.current.retreat();
        }
    }
}

/// Errors that can occur in [`solve`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum SolveError {
    /// The expression could not be turned into an automaton.
    #[error(transparent)]
    Expression(#[from] ExpressionError),
    /// The modulus was zero.
    #[error("modulus must be strictly positive")]
    InvalidModulus,
    /// The residue is not smaller than the modulus.
    #[error("residue {residue} is out of range for modulus {modulus}")]
    ResidueOutOfRange {
        /// The requested residue.
        residue: usize,
        /// The modulus.
        modulus: usize,
    },
}

impl From<ParseError> for SolveError {
    fn from(value: ParseError) -> Self {
        SolveError::Expression(value.into())
    }
}

impl From<EvaluationError> for SolveError {
    fn from(value: EvaluationError) -> Self {
        SolveError::Expression(value.into())
    }
}

/// Decides whether the language of the postfix expression `expression` contains a word whose
/// length is congruent to `residue` modulo `modulus`.
///
/// # Example
/// ```
/// use nfa_residue::prelude::*;
///
/// assert!(solve("1", 10, 0).unwrap());
/// assert!(!solve("1", 10, 1).unwrap());
/// assert!(solve("aa++", 1, 0).is_err());
/// ```
pub fn solve(expression: &str, modulus: usize, residue: usize) -> Result<bool, SolveError> {
    if modulus == 0 {
        return Err(SolveError::InvalidModulus);
    }
    if residue >= modulus {
        return Err(SolveError::ResidueOutOfRange { residue, modulus });
    }
    let nfa = Nfa::from_postfix(expression)?;
    Ok(ResidueVisitor::explore(&nfa, modulus).has_solution(residue))
}

/// Returns every residue modulo `modulus` for which `nfa` accepts a word of such a length.
/// Panics if `modulus` is zero.
pub fn reachable_residues(nfa: &Nfa, modulus: usize) -> Vec<usize> {
    ResidueVisitor::explore(nfa, modulus).residues()
}
