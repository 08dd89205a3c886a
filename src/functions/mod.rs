//! The closed set of single-argument functions and named constants a
//! formula may use.
//!
//! Every function is total over `f64` in the sense that it never panics; it
//! reports a mathematically undefined argument as [`EvalError::Domain`] and a
//! finite argument with an unrepresentable result as [`EvalError::Overflow`].

pub mod constants;
mod elementary;
mod exponential;
mod hyperbolic;
mod special;
mod trigonometric;

pub use constants::Constant;

use crate::error::EvalError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Function {
    Abs,
    Acos,
    Acosh,
    Asin,
    Asinh,
    Atan,
    Atanh,
    Ceil,
    Cos,
    Cosh,
    Erf,
    Erfc,
    Exp,
    Floor,
    Gamma,
    Ln,
    Log10,
    Log2,
    Sin,
    Sinh,
    Sqrt,
    Tan,
    Tanh,
}

impl Function {
    pub const ALL: [Function; 23] = [
        Function::Abs,
        Function::Acos,
        Function::Acosh,
        Function::Asin,
        Function::Asinh,
        Function::Atan,
        Function::Atanh,
        Function::Ceil,
        Function::Cos,
        Function::Cosh,
        Function::Erf,
        Function::Erfc,
        Function::Exp,
        Function::Floor,
        Function::Gamma,
        Function::Ln,
        Function::Log10,
        Function::Log2,
        Function::Sin,
        Function::Sinh,
        Function::Sqrt,
        Function::Tan,
        Function::Tanh,
    ];

    /// Canonical spelling; aliases such as `arcsin` or `log` print as `asin` and `ln`.
    pub fn name(&self) -> &'static str {
        match self {
            Function::Abs => "abs",
            Function::Acos => "acos",
            Function::Acosh => "acosh",
            Function::Asin => "asin",
            Function::Asinh => "asinh",
            Function::Atan => "atan",
            Function::Atanh => "atanh",
            Function::Ceil => "ceil",
            Function::Cos => "cos",
            Function::Cosh => "cosh",
            Function::Erf => "erf",
            Function::Erfc => "erfc",
            Function::Exp => "exp",
            Function::Floor => "floor",
            Function::Gamma => "gamma",
            Function::Ln => "ln",
            Function::Log10 => "log10",
            Function::Log2 => "log2",
            Function::Sin => "sin",
            Function::Sinh => "sinh",
            Function::Sqrt => "sqrt",
            Function::Tan => "tan",
            Function::Tanh => "tanh",
        }
    }

    pub fn apply(&self, x: f64) -> Result<f64, EvalError> {
        match self {
            Function::Abs => Ok(x.abs()),
            Function::Ceil => elementary::ceil(x),
            Function::Floor => elementary::floor(x),
            Function::Sqrt => elementary::sqrt(x),
            Function::Exp => exponential::exp(x),
            Function::Ln => exponential::ln(x),
            Function::Log10 => exponential::log10(x),
            Function::Log2 => exponential::log2(x),
            Function::Sin => trigonometric::sin(x),
            Function::Cos => trigonometric::cos(x),
            Function::Tan => trigonometric::tan(x),
            Function::Asin => trigonometric::asin(x),
            Function::Acos => trigonometric::acos(x),
            Function::Atan => Ok(x.atan()),
            Function::Sinh => hyperbolic::sinh(x),
            Function::Cosh => hyperbolic::cosh(x),
            Function::Tanh => Ok(x.tanh()),
            Function::Asinh => Ok(x.asinh()),
            Function::Acosh => hyperbolic::acosh(x),
            Function::Atanh => hyperbolic::atanh(x),
            Function::Gamma => special::gamma(x),
            Function::Erf => Ok(special::erf(x)),
            Function::Erfc => Ok(special::erfc(x)),
        }
    }
}

impl TryFrom<&str> for Function {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "abs" => Ok(Function::Abs),
            "acos" | "arccos" => Ok(Function::Acos),
            "acosh" => Ok(Function::Acosh),
            "asin" | "arcsin" => Ok(Function::Asin),
            "asinh" => Ok(Function::Asinh),
            "atan" | "arctan" => Ok(Function::Atan),
            "atanh" => Ok(Function::Atanh),
            "ceil" => Ok(Function::Ceil),
            "cos" => Ok(Function::Cos),
            "cosh" => Ok(Function::Cosh),
            "erf" => Ok(Function::Erf),
            "erfc" => Ok(Function::Erfc),
            "exp" => Ok(Function::Exp),
            "floor" => Ok(Function::Floor),
            "gamma" => Ok(Function::Gamma),
            "ln" | "log" => Ok(Function::Ln),
            "log10" => Ok(Function::Log10),
            "log2" => Ok(Function::Log2),
            "sin" => Ok(Function::Sin),
            "sinh" => Ok(Function::Sinh),
            "sqrt" => Ok(Function::Sqrt),
            "tan" => Ok(Function::Tan),
            "tanh" => Ok(Function::Tanh),
            _ => Err(format!("Unknown function: {}", value)),
        }
    }
}

/// Classifies a raw IEEE result: NaN from a non-NaN argument is a domain
/// error, infinity from a finite argument is an overflow.
pub(crate) fn checked(function: &'static str, argument: f64, value: f64) -> Result<f64, EvalError> {
    if value.is_nan() && !argument.is_nan() {
        Err(EvalError::Domain { function, argument })
    } else if value.is_infinite() && argument.is_finite() {
        Err(EvalError::Overflow {
            operation: function,
        })
    } else {
        Ok(value)
    }
}
