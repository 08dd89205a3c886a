use crate::ast::{Expression, VARIABLE};
use crate::error::EvalError;
use log::debug;

/// Reduces `expression` at `x`, stopping at the first domain violation or
/// overflow.
pub fn try_evaluate(expression: &Expression, x: f64) -> Result<f64, EvalError> {
    match expression {
        Expression::Number(value) => Ok(*value),
        Expression::Constant(constant) => Ok(constant.value()),
        Expression::Variable(name) => Ok(if name == VARIABLE { x } else { 0.0 }),
        Expression::UnaryOperation { operator, operand } => {
            Ok(operator.apply(try_evaluate(operand, x)?))
        }
        Expression::BinaryOperation {
            left,
            operator,
            right,
        } => {
            let left = try_evaluate(left, x)?;
            let right = try_evaluate(right, x)?;
            operator.apply(left, right)
        }
        Expression::FunctionCall { function, argument } => {
            function.apply(try_evaluate(argument, x)?)
        }
    }
}

/// Total evaluation: a domain violation anywhere yields 0 for the whole
/// expression and an overflow yields +∞.
pub fn evaluate(expression: &Expression, x: f64) -> f64 {
    match try_evaluate(expression, x) {
        Ok(value) => value,
        Err(err) => {
            let sentinel = err.sentinel();
            debug!("Evaluation at x = {} failed ({}), using {}", x, err, sentinel);
            sentinel
        }
    }
}
