use crate::error::{EvalError, ParseError};
use crate::functions::{Constant, Function};
use std::str::FromStr;

mod display;
mod evaluator;
mod latex;
mod lexer;
mod parser;

pub use evaluator::{evaluate, try_evaluate};
pub use parser::{FormulaParser as Parser, ParserConfig};

/// Name of the single free variable a formula is evaluated in.
pub const VARIABLE: &str = "x";

/// Parsed formula. Built once by the parser and only read afterwards, so a
/// tree can be shared between threads without locking.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number(f64),
    /// Any bare name that is not a constant. Only [`VARIABLE`] is bound;
    /// every other name evaluates to 0.
    Variable(String),
    Constant(Constant),
    UnaryOperation {
        operator: UnaryOperator,
        operand: Box<Expression>,
    },
    BinaryOperation {
        left: Box<Expression>,
        operator: Operator,
        right: Box<Expression>,
    },
    FunctionCall {
        function: Function,
        argument: Box<Expression>,
    },
}

impl Expression {
    pub fn unary(operator: UnaryOperator, operand: Expression) -> Self {
        Expression::UnaryOperation {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn binary(left: Expression, operator: Operator, right: Expression) -> Self {
        Expression::BinaryOperation {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn call(function: Function, argument: Expression) -> Self {
        Expression::FunctionCall {
            function,
            argument: Box::new(argument),
        }
    }

    pub fn variable(name: &str) -> Self {
        Expression::Variable(name.to_string())
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            Expression::Number(_) | Expression::Variable(_) | Expression::Constant(_) => 1,
            Expression::UnaryOperation { operand, .. } => 1 + operand.depth(),
            Expression::BinaryOperation { left, right, .. } => {
                1 + left.depth().max(right.depth())
            }
            Expression::FunctionCall { argument, .. } => 1 + argument.depth(),
        }
    }

    /// Value at `x`, with arithmetic failures replaced by their sentinels.
    pub fn evaluate(&self, x: f64) -> f64 {
        evaluate(self, x)
    }

    pub fn try_evaluate(&self, x: f64) -> Result<f64, EvalError> {
        try_evaluate(self, x)
    }

    pub fn to_latex(&self) -> String {
        latex::render(self)
    }
}

impl FromStr for Expression {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parser::default().parse(s)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Plus,
    Minus,
}

impl UnaryOperator {
    pub fn apply(&self, operand: f64) -> f64 {
        match self {
            UnaryOperator::Plus => operand,
            UnaryOperator::Minus => -operand,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            UnaryOperator::Plus => '+',
            UnaryOperator::Minus => '-',
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl Operator {
    pub const ALL: [Operator; 5] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
        Operator::Power,
    ];

    /// Division by an exact zero yields +∞ right here instead of failing the
    /// whole evaluation. A power with no real value is a domain error, a
    /// finite power with an unrepresentable result an overflow.
    pub fn apply(&self, left: f64, right: f64) -> Result<f64, EvalError> {
        match self {
            Operator::Add => Ok(left + right),
            Operator::Subtract => Ok(left - right),
            Operator::Multiply => Ok(left * right),
            Operator::Divide => {
                if right == 0.0 {
                    Ok(f64::INFINITY)
                } else {
                    Ok(left / right)
                }
            }
            Operator::Power => power(left, right),
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Power => '^',
        }
    }

    /// Binding power; higher binds tighter. Unary sign sits between
    /// products (2) and powers (4).
    pub fn precedence(&self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 1,
            Operator::Multiply | Operator::Divide => 2,
            Operator::Power => 4,
        }
    }
}

fn power(base: f64, exponent: f64) -> Result<f64, EvalError> {
    if base == 0.0 && exponent < 0.0 {
        return Err(EvalError::Domain {
            function: "pow",
            argument: exponent,
        });
    }
    let value = base.powf(exponent);
    if value.is_nan() && !base.is_nan() && !exponent.is_nan() {
        Err(EvalError::Domain {
            function: "pow",
            argument: base,
        })
    } else if value.is_infinite() && base.is_finite() && exponent.is_finite() {
        Err(EvalError::Overflow { operation: "pow" })
    } else {
        Ok(value)
    }
}
