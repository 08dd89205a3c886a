use super::checked;
use crate::error::EvalError;

pub fn sin(x: f64) -> Result<f64, EvalError> {
    checked("sin", x, x.sin())
}

pub fn cos(x: f64) -> Result<f64, EvalError> {
    checked("cos", x, x.cos())
}

pub fn tan(x: f64) -> Result<f64, EvalError> {
    checked("tan", x, x.tan())
}

pub fn asin(x: f64) -> Result<f64, EvalError> {
    checked("asin", x, x.asin())
}

pub fn acos(x: f64) -> Result<f64, EvalError> {
    checked("acos", x, x.acos())
}
