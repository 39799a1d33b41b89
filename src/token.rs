use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::prelude::*;

/// A single token of a postfix regular expression. Each token is an [`Operation`] on automata.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Token {
    /// A lowercase letter, pushes [`Nfa::atom`].
    Symbol(char),
    /// `1`, pushes [`Nfa::epsilon`].
    Epsilon,
    /// `+`, pops two automata and pushes their [`Nfa::union`].
    Union,
    /// `.`, pops two automata and pushes their [`Nfa::concat`].
    Concat,
    /// `*`, pops one automaton and pushes its [`Nfa::kleene_star`].
    Star,
}

impl Token {
    /// Reads a single character, spaces and other characters are not tokens.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='z' => Some(Token::Symbol(c)),
            '1' => Some(Token::Epsilon),
            '+' => Some(Token::Union),
            '.' => Some(Token::Concat),
            '*' => Some(Token::Star),
            _ => None,
        }
    }
}

impl Operation for Token {
    type Value = Nfa;

    fn arity(&self) -> usize {
        match self {
            Token::Symbol(_) | Token::Epsilon => 0,
            Token::Star => 1,
            Token::Union | Token::Concat => 2,
        }
    }

    fn apply(&self, operands: Vec<Nfa>) -> Nfa {
        let mut operands = operands.into_iter();
        match (self, operands.next(), operands.next(), operands.next()) {
            (Token::Symbol(c), None, None, None) => Nfa::atom(*c),
            (Token::Epsilon, None, None, None) => Nfa::epsilon(),
            (Token::Star, Some(inner), None, None) => inner.kleene_star(),
            (Token::Union, Some(left), Some(right), None) => left.union(right),
            (Token::Concat, Some(left), Some(right), None) => left.concat(right),
            _ => unreachable!("evaluator passes exactly `arity` operands"),
        }
    }
}

/// The syntax error raised when reading a postfix expression.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ParseError {
    /// A character that is neither a letter, `1`, an operator nor a space.
    #[error("unexpected symbol `{symbol}` at position {position}")]
    UnknownSymbol {
        /// The offending character.
        symbol: char,
        /// Its position (counted in characters) in the input.
        position: usize,
    },
}

/// Errors that can occur when building an automaton from a postfix expression.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ExpressionError {
    /// The expression contains an unknown symbol.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The tokens do not form a single well-formed expression.
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

/// Reads a postfix expression into a sequence of tokens, skipping spaces.
///
/// # Example
/// ```
/// use nfa_residue::prelude::*;
///
/// assert_eq!(
///     parse_postfix("a1 +*").unwrap(),
///     vec![Token::Symbol('a'), Token::Epsilon, Token::Union, Token::Star]
/// );
/// assert!(parse_postfix("ab|").is_err());
/// ```
pub fn parse_postfix(input: &str) -> Result<Vec<Token>, ParseError> {
    input
        .chars()
        .enumerate()
        .filter(|(_, c)| *c != ' ')
        .map(|(position, symbol)| {
            Token::from_char(symbol).ok_or(ParseError::UnknownSymbol { symbol, position })
        })
        .collect()
}

impl Nfa {
    /// Reads and evaluates a postfix expression.
    pub fn from_postfix(input: &str) -> Result<Nfa, ExpressionError> {
        let tokens = parse_postfix(input)?;
        let nfa = evaluate(tokens)?;
        debug!(
            "built automaton for {input:?} with {} vertices and {} edges",
            nfa.vertex_count(),
            nfa.edge_count()
        );
        Ok(nfa)
    }
}

impl FromStr for Nfa {
    type Err = ExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Nfa::from_postfix(s)
    }
}
