//! Central-difference numerical derivatives.

use crate::ast::Expression;

/// A real function of one real variable.
///
/// Implemented for parsed expressions and for any `Fn(f64) -> f64`, so the
/// scorer can compare a reference formula against either.
pub trait Univariate {
    fn value_at(&self, x: f64) -> f64;
}

impl<F> Univariate for F
where
    F: Fn(f64) -> f64,
{
    fn value_at(&self, x: f64) -> f64 {
        self(x)
    }
}

impl Univariate for Expression {
    fn value_at(&self, x: f64) -> f64 {
        self.evaluate(x)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DerivativeConfig {
    /// Step size relative to `max(|x|, 1)`.
    pub relative_step: f64,
}

impl Default for DerivativeConfig {
    fn default() -> Self {
        Self {
            relative_step: 1e-6,
        }
    }
}

impl DerivativeConfig {
    pub fn step(&self, x: f64) -> f64 {
        self.relative_step * x.abs().max(1.0)
    }
}

pub fn derivative<U: Univariate + ?Sized>(function: &U, x: f64) -> f64 {
    derivative_with(function, x, &DerivativeConfig::default())
}

/// `(f(x + ε) - f(x - ε)) / 2ε` with a step that grows with `|x|`.
///
/// Sentinel values from the evaluator flow through unchanged, so the result
/// may be infinite or NaN.
pub fn derivative_with<U: Univariate + ?Sized>(
    function: &U,
    x: f64,
    config: &DerivativeConfig,
) -> f64 {
    let step = config.step(x);
    (function.value_at(x + step) - function.value_at(x - step)) / (2.0 * step)
}
