pub mod ast;
pub mod cache;
pub mod derivative;
pub mod error;
pub mod functions;
pub mod generator;
pub mod guard;
pub mod scoring;
pub mod task;

pub use ast::{Expression, Parser, ParserConfig};
pub use derivative::{DerivativeConfig, Univariate};
pub use error::{EvalError, GuardError, ParseError, TaskError};
pub use scoring::{Scorer, ScoringConfig, ScoringPoint, ToleranceTier};
pub use task::{Domain, FunctionSpec, Task};

/// Parses formula text with the default limits.
pub fn parse(input: &str) -> Result<Expression, ParseError> {
    Parser::default().parse(input)
}

/// Value of `expression` at `x`. Never fails: domain errors give 0,
/// overflows give +∞ and division by zero gives +∞.
pub fn evaluate(expression: &Expression, x: f64) -> f64 {
    ast::evaluate(expression, x)
}

pub fn derivative(expression: &Expression, x: f64) -> f64 {
    derivative::derivative(expression, x)
}

/// Percentage (0 to 100) of the weighted points at which the numerical
/// derivative of `submitted` matches `reference`.
pub fn score(reference: &Expression, submitted: &Expression, points: &[ScoringPoint]) -> u8 {
    scoring::score(reference, submitted, points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline() {
        let reference = parse("3*x^2 + exp(x)").unwrap();
        let submitted = parse("x^3 + exp(x) - 4").unwrap();
        assert_eq!(evaluate(&reference, 0.0), 1.0);
        assert!((derivative(&submitted, 0.0) - 1.0).abs() < 1e-9);
        let points: Vec<ScoringPoint> = task::linspace(-1.0, 1.0, 8).map(ScoringPoint::at).collect();
        assert_eq!(score(&reference, &submitted, &points), 100);
        assert_eq!(score(&reference, &reference, &[]), 0);
    }

    #[test]
    fn test_documented_properties() {
        assert_eq!(evaluate(&parse("2+3*4").unwrap(), 7.0), 14.0);
        assert_eq!(evaluate(&parse("2^3^2").unwrap(), 0.0), 512.0);
        assert_eq!(evaluate(&parse("-2^2").unwrap(), 0.0), -4.0);
        assert_eq!(evaluate(&parse("1/0").unwrap(), 0.0), f64::INFINITY);
        assert_eq!(evaluate(&parse("sqrt(-1)").unwrap(), 0.0), 0.0);
        assert!(parse("2 + (3").is_err());
        assert!(parse("2 + * 3").is_err());
    }
}
