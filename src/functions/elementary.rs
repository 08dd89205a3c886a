use super::checked;
use crate::error::EvalError;

/// Rounding an infinite value has no integer result; NaN has none either.
fn integral(function: &'static str, x: f64, value: f64) -> Result<f64, EvalError> {
    if x.is_nan() {
        Err(EvalError::Domain {
            function,
            argument: x,
        })
    } else if x.is_infinite() {
        Err(EvalError::Overflow {
            operation: function,
        })
    } else {
        Ok(value)
    }
}

pub fn floor(x: f64) -> Result<f64, EvalError> {
    integral("floor", x, x.floor())
}

pub fn ceil(x: f64) -> Result<f64, EvalError> {
    integral("ceil", x, x.ceil())
}

pub fn sqrt(x: f64) -> Result<f64, EvalError> {
    checked("sqrt", x, x.sqrt())
}
