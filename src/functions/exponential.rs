use super::checked;
use crate::error::EvalError;

pub fn exp(x: f64) -> Result<f64, EvalError> {
    checked("exp", x, x.exp())
}

/// IEEE logarithms return -∞ at zero; zero is outside the domain here.
fn logarithm(function: &'static str, x: f64, log: fn(f64) -> f64) -> Result<f64, EvalError> {
    if x <= 0.0 {
        return Err(EvalError::Domain {
            function,
            argument: x,
        });
    }
    checked(function, x, log(x))
}

pub fn ln(x: f64) -> Result<f64, EvalError> {
    logarithm("ln", x, f64::ln)
}

pub fn log10(x: f64) -> Result<f64, EvalError> {
    logarithm("log10", x, f64::log10)
}

pub fn log2(x: f64) -> Result<f64, EvalError> {
    logarithm("log2", x, f64::log2)
}
