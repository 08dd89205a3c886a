use std::time::Duration;
use thiserror::Error;

/// Everything that can go wrong while turning formula text into an `Expression`.
///
/// Positions are 0-based byte offsets into the original input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("formula is empty")]
    Empty,

    #[error("unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character: char, position: usize },

    #[error("invalid number '{literal}' at position {position}")]
    InvalidNumber { literal: String, position: usize },

    #[error("unexpected '{found}' at position {position}")]
    UnexpectedToken { found: String, position: usize },

    #[error("operator '{operator}' at position {position} is missing an operand")]
    MissingOperand { operator: char, position: usize },

    #[error("delimiter opened at position {position} is never closed")]
    UnclosedDelimiter { position: usize },

    #[error("closing delimiter at position {position} has no opening match")]
    UnmatchedClosing { position: usize },

    #[error("unknown function '{name}' at position {position}")]
    UnknownFunction { name: String, position: usize },

    #[error("function '{name}' at position {position} takes exactly one argument")]
    ArgumentCount { name: String, position: usize },

    #[error("unexpected trailing input at position {position}")]
    TrailingInput { position: usize },

    #[error("formula nests deeper than {limit} levels")]
    NestingTooDeep { limit: usize },

    #[error("formula tree is deeper than {limit} levels")]
    TreeTooDeep { limit: usize },

    #[error("formula is {length} bytes long, the limit is {limit}")]
    InputTooLong { length: usize, limit: usize },
}

/// Arithmetic conditions raised while reducing an expression.
///
/// These never leave the evaluator as failures: `evaluate` replaces them with
/// [`EvalError::sentinel`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum EvalError {
    #[error("{function} is undefined at {argument}")]
    Domain {
        function: &'static str,
        argument: f64,
    },

    #[error("{operation} overflowed")]
    Overflow { operation: &'static str },
}

impl EvalError {
    /// Value substituted for the whole evaluation: 0 for domain errors
    /// (functions are extended to all of ℝ), +∞ for overflow.
    pub fn sentinel(&self) -> f64 {
        match self {
            EvalError::Domain { .. } => 0.0,
            EvalError::Overflow { .. } => f64::INFINITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TaskError {
    #[error("reference formula could not be parsed: {0}")]
    Reference(#[from] ParseError),

    #[error("invalid domain [{lo}, {hi}]")]
    InvalidDomain { lo: f64, hi: f64 },

    #[error("a task needs at least one scoring point")]
    NoPoints,

    #[error("scoring point at x = {x} has invalid weight {weight}")]
    InvalidWeight { x: f64, weight: f64 },

    #[error("no usable formula after {attempts} attempts")]
    GenerationExhausted { attempts: usize },
}

#[derive(Debug, Error)]
pub enum GuardError {
    #[error("computation did not finish within {0:?}")]
    TimedOut(Duration),

    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels() {
        let domain = EvalError::Domain {
            function: "sqrt",
            argument: -1.0,
        };
        let overflow = EvalError::Overflow { operation: "exp" };
        assert_eq!(domain.sentinel(), 0.0);
        assert_eq!(overflow.sentinel(), f64::INFINITY);
    }

    #[test]
    fn test_messages_carry_position() {
        let err = ParseError::MissingOperand {
            operator: '+',
            position: 2,
        };
        assert_eq!(
            err.to_string(),
            "operator '+' at position 2 is missing an operand"
        );
        let err = TaskError::from(ParseError::Empty);
        assert!(err.to_string().contains("formula is empty"));
    }
}
