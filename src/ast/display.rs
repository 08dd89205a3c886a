use crate::ast::{Expression, Operator};
use std::fmt;

pub(super) const UNARY: u8 = 3;
pub(super) const ATOM: u8 = 5;

/// How tightly a node holds together when printed; see [`Operator::precedence`].
pub(super) fn binding(expression: &Expression) -> u8 {
    match expression {
        Expression::Number(_)
        | Expression::Variable(_)
        | Expression::Constant(_)
        | Expression::FunctionCall { .. } => ATOM,
        Expression::UnaryOperation { .. } => UNARY,
        Expression::BinaryOperation { operator, .. } => operator.precedence(),
    }
}

/// Whether the left and right operands of `operator` need parentheses to
/// parse back into the same tree.
pub(super) fn needs_parentheses(
    operator: Operator,
    left: &Expression,
    right: &Expression,
) -> (bool, bool) {
    match operator {
        // base is a primary, exponent is anything from the unary level up
        Operator::Power => (binding(left) < ATOM, binding(right) < UNARY),
        _ => {
            let precedence = operator.precedence();
            (binding(left) < precedence, binding(right) <= precedence)
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, operand: &Expression, parenthesize: bool) -> fmt::Result {
    if parenthesize {
        write!(f, "({})", operand)
    } else {
        write!(f, "{}", operand)
    }
}

pub(super) fn format_number(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude.is_infinite() {
        // the smallest literal that overflows to the same value
        "1e400".to_string()
    } else if magnitude.is_nan() || magnitude == 0.0 || (1e-5..1e16).contains(&magnitude) {
        format!("{}", magnitude)
    } else {
        format!("{:e}", magnitude)
    }
}

/// Prints the formula with the fewest parentheses that still parse back to a
/// structurally identical tree.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Number(value) if value.is_sign_negative() && !value.is_nan() => {
                write!(f, "(-{})", format_number(*value))
            }
            Expression::Number(value) => write!(f, "{}", format_number(*value)),
            Expression::Variable(name) => write!(f, "{}", name),
            Expression::Constant(constant) => write!(f, "{}", constant.name()),
            Expression::UnaryOperation { operator, operand } => {
                write!(f, "{}", operator.symbol())?;
                write_operand(f, operand, binding(operand) < UNARY)
            }
            Expression::BinaryOperation {
                left,
                operator,
                right,
            } => {
                let (left_parentheses, right_parentheses) = needs_parentheses(*operator, left, right);
                write_operand(f, left, left_parentheses)?;
                match operator {
                    Operator::Add | Operator::Subtract => write!(f, " {} ", operator.symbol())?,
                    _ => write!(f, "{}", operator.symbol())?,
                }
                write_operand(f, right, right_parentheses)
            }
            Expression::FunctionCall { function, argument } => {
                write!(f, "{}({})", function.name(), argument)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Expression, Parser, UnaryOperator};

    fn reprint(source: &str) -> String {
        Parser::default().parse(source).unwrap().to_string()
    }

    #[test]
    fn test_minimal_parentheses() {
        assert_eq!(reprint("(x+1)*2"), "(x + 1)*2");
        assert_eq!(reprint("((x))*{2}"), "x*2");
        assert_eq!(reprint("x-(y-z)"), "x - (y - z)");
        assert_eq!(reprint("(x-y)-z"), "x - y - z");
        assert_eq!(reprint("x/(y*z)"), "x/(y*z)");
        assert_eq!(reprint("2^3^2"), "2^3^2");
        assert_eq!(reprint("(2^3)^2"), "(2^3)^2");
        assert_eq!(reprint("-x^2"), "-x^2");
        assert_eq!(reprint("(-x)^2"), "(-x)^2");
        assert_eq!(reprint("2^-x"), "2^-x");
        assert_eq!(reprint("-(x+1)"), "-(x + 1)");
    }

    #[test]
    fn test_canonical_names() {
        assert_eq!(reprint("arcsin(x) + log(x)"), "asin(x) + ln(x)");
        assert_eq!(reprint("2*pi"), "2*pi");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(reprint("0.5 + 12"), "0.5 + 12");
        assert_eq!(reprint("1e20"), "1e20");
        assert_eq!(reprint("2.5e-7"), "2.5e-7");
        assert_eq!(Expression::Number(-2.0).to_string(), "(-2)");
        assert_eq!(reprint("1e400 - x"), "1e400 - x");
        assert_eq!(Expression::Number(f64::NEG_INFINITY).to_string(), "(-1e400)");
    }

    #[test]
    fn test_printing_round_trips() {
        let sources = [
            "3 + exp((-x^9 - 7*x)/2)",
            "sin(x)^2 + cos(x)^-2",
            "-(-x)",
            "x/(2/x)/3",
            "{1 - x}^{1/3} * gamma(x + 1)",
            "2^-3^2 - +x",
            "sqrt(abs(x - 1e-9))",
            "1e400 - x",
            "x*-1e999",
        ];
        for source in sources {
            let parsed = Parser::default().parse(source).unwrap();
            let printed = parsed.to_string();
            assert_eq!(Parser::default().parse(&printed).unwrap(), parsed, "{}", printed);
        }
    }

    #[test]
    fn test_nested_unary() {
        let expression = Expression::unary(
            UnaryOperator::Minus,
            Expression::unary(UnaryOperator::Minus, Expression::variable("x")),
        );
        assert_eq!(expression.to_string(), "--x");
    }
}
