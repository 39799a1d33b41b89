use thiserror::Error;
use tracing::trace;

/// An operation that can be evaluated by the stack machine in [`evaluate`]. It pops
/// [`Operation::arity`] values and pushes the result of [`Operation::apply`]. Constants are
/// simply operations with arity zero.
pub trait Operation {
    /// The type of values on the stack.
    type Value;

    /// The number of operands that are consumed.
    fn arity(&self) -> usize;

    /// Computes the result. `operands` contains exactly [`Operation::arity`] values in the order
    /// in which they were pushed, so for `a b -` it is `[a, b]`.
    fn apply(&self, operands: Vec<Self::Value>) -> Self::Value;
}

impl<O: Operation> Operation for &O {
    type Value = O::Value;

    fn arity(&self) -> usize {
        (**self).arity()
    }

    fn apply(&self, operands: Vec<Self::Value>) -> Self::Value {
        (**self).apply(operands)
    }
}

/// Abstracts the ways in which the evaluation of a postfix expression can fail.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum EvaluationError {
    /// An operation found fewer operands on the stack than it consumes.
    #[error("operation {position} needs {arity} operands but only {available} are available")]
    Underflow {
        /// Index of the offending operation in the sequence.
        position: usize,
        /// Number of operands the operation needs.
        arity: usize,
        /// Number of values that were on the stack.
        available: usize,
    },
    /// More than one value remained on the stack.
    #[error("expression is malformed, {0} values remain on the stack")]
    Dangling(usize),
    /// The stack was empty at the end.
    #[error("expression is empty")]
    Empty,
}

/// Evaluates a sequence of operations given in postfix order and returns the single value
/// that remains on the stack.
///
/// # Example
/// ```
/// use nfa_residue::prelude::*;
///
/// let tokens = parse_postfix("ab.").unwrap();
/// let nfa = evaluate(&tokens).unwrap();
/// assert!(nfa.accepts("ab"));
/// ```
pub fn evaluate<O, I>(operations: I) -> Result<O::Value, EvaluationError>
where
    O: Operation,
    I: IntoIterator<Item = O>,
{
    let mut stack: Vec<O::Value> = Vec::new();
    for (position, operation) in operations.into_iter().enumerate() {
        let arity = operation.arity();
        if stack.len() < arity {
            return Err(EvaluationError::Underflow {
                position,
                arity,
                available: stack.len(),
            });
        }
        let operands = stack.split_off(stack.len() - arity);
        stack.push(operation.apply(operands));
        trace!(
            "applied operation {position} of arity {arity}, stack size {}",
            stack.len()
        );
    }

    let value = stack.pop().ok_or(EvaluationError::Empty)?;
    if !stack.is_empty() {
        return Err(EvaluationError::Dangling(stack.len() + 1));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy)]
    enum Arith {
        Num(i64),
        Plus,
        Minus,
        Negate,
    }

    impl Operation for Arith {
        type Value = i64;

        fn arity(&self) -> usize {
            match self {
                Arith::Num(_) => 0,
                Arith::Negate => 1,
                Arith::Plus | Arith::Minus => 2,
            }
        }

        fn apply(&self, operands: Vec<i64>) -> i64 {
            match (self, operands.as_slice()) {
                (Arith::Num(n), []) => *n,
                (Arith::Negate, [x]) => -x,
                (Arith::Plus, [x, y]) => x + y,
                (Arith::Minus, [x, y]) => x - y,
                _ => unreachable!("evaluator passes exactly `arity` operands"),
            }
        }
    }

    use Arith::*;

    #[test]
    fn calculator() {
        let mut expr = vec![Num(15)];
        assert_eq!(evaluate(&expr), Ok(15));
        expr.extend([Num(16), Plus]);
        assert_eq!(evaluate(&expr), Ok(31));
        expr.extend([Num(10), Minus]);
        assert_eq!(evaluate(&expr), Ok(21));
        expr.push(Negate);
        assert_eq!(evaluate(expr.iter()), Ok(-21));
    }

    #[test]
    fn operand_order() {
        assert_eq!(evaluate([Num(2), Num(5), Minus]), Ok(-3));
    }

    #[test]
    fn underflow() {
        assert_eq!(
            evaluate([Num(15), Negate, Minus]),
            Err(EvaluationError::Underflow {
                position: 2,
                arity: 2,
                available: 1
            })
        );
        assert_eq!(
            evaluate([Plus]),
            Err(EvaluationError::Underflow {
                position: 0,
                arity: 2,
                available: 0
            })
        );
    }

    #[test]
    fn dangling_and_empty() {
        assert_eq!(
            evaluate([Num(12), Num(13), Num(14), Minus]),
            Err(EvaluationError::Dangling(2))
        );
        assert_eq!(evaluate(Vec::<Arith>::new()), Err(EvaluationError::Empty));
    }
}
