use super::display::{binding, format_number, needs_parentheses, ATOM, UNARY};
use crate::ast::{Expression, Operator};
use crate::functions::{Constant, Function};

pub(super) fn render(expression: &Expression) -> String {
    let mut out = String::new();
    write_expression(&mut out, expression);
    out
}

fn write_expression(out: &mut String, expression: &Expression) {
    match expression {
        Expression::Number(value) => {
            if value.is_sign_negative() && !value.is_nan() {
                out.push('-');
            }
            write_number(out, *value);
        }
        Expression::Variable(name) if name.chars().count() > 1 => {
            out.push_str(&format!("\\mathrm{{{}}}", name));
        }
        Expression::Variable(name) => out.push_str(name),
        Expression::Constant(constant) => out.push_str(match constant {
            Constant::Pi => "\\pi",
            Constant::Tau => "\\tau",
            Constant::E => "e",
        }),
        Expression::UnaryOperation { operator, operand } => {
            out.push(operator.symbol());
            write_operand(out, operand, latex_binding(operand) < UNARY);
        }
        Expression::BinaryOperation {
            left,
            operator: Operator::Divide,
            right,
        } => {
            out.push_str("\\frac{");
            write_expression(out, left);
            out.push_str("}{");
            write_expression(out, right);
            out.push('}');
        }
        Expression::BinaryOperation {
            left,
            operator: Operator::Power,
            right,
        } => {
            write_operand(out, left, binding(left) < ATOM);
            out.push_str("^{");
            write_expression(out, right);
            out.push('}');
        }
        Expression::BinaryOperation {
            left,
            operator,
            right,
        } => {
            let (mut left_parentheses, mut right_parentheses) =
                needs_parentheses(*operator, left, right);
            left_parentheses &= !is_fraction(left);
            right_parentheses &= !is_fraction(right);
            write_operand(out, left, left_parentheses);
            match operator {
                Operator::Multiply => out.push_str(" \\cdot "),
                _ => {
                    out.push(' ');
                    out.push(operator.symbol());
                    out.push(' ');
                }
            }
            write_operand(out, right, right_parentheses);
        }
        Expression::FunctionCall { function, argument } => write_call(out, *function, argument),
    }
}

fn write_call(out: &mut String, function: Function, argument: &Expression) {
    let (open, close) = match function {
        Function::Sqrt => ("\\sqrt{", "}"),
        Function::Abs => ("\\left|", "\\right|"),
        Function::Floor => ("\\left\\lfloor ", " \\right\\rfloor"),
        Function::Ceil => ("\\left\\lceil ", " \\right\\rceil"),
        _ => {
            out.push_str(&function_name(function));
            ("\\left(", "\\right)")
        }
    };
    out.push_str(open);
    write_expression(out, argument);
    out.push_str(close);
}

fn function_name(function: Function) -> String {
    match function {
        Function::Sin
        | Function::Cos
        | Function::Tan
        | Function::Sinh
        | Function::Cosh
        | Function::Tanh
        | Function::Exp
        | Function::Ln => format!("\\{}", function.name()),
        Function::Asin => "\\arcsin".to_string(),
        Function::Acos => "\\arccos".to_string(),
        Function::Atan => "\\arctan".to_string(),
        Function::Log10 => "\\log_{10}".to_string(),
        Function::Log2 => "\\log_{2}".to_string(),
        Function::Gamma => "\\Gamma".to_string(),
        other => format!("\\operatorname{{{}}}", other.name()),
    }
}

fn write_number(out: &mut String, value: f64) {
    if value.is_infinite() {
        out.push_str("\\infty");
        return;
    }
    let text = format_number(value);
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            if mantissa != "1" {
                out.push_str(mantissa);
                out.push_str(" \\cdot ");
            }
            out.push_str(&format!("10^{{{}}}", exponent));
        }
        None => out.push_str(&text),
    }
}

fn is_fraction(expression: &Expression) -> bool {
    matches!(
        expression,
        Expression::BinaryOperation {
            operator: Operator::Divide,
            ..
        }
    )
}

/// Fractions are typeset as a block and never need surrounding parentheses.
fn latex_binding(expression: &Expression) -> u8 {
    if is_fraction(expression) {
        ATOM
    } else {
        binding(expression)
    }
}

fn write_operand(out: &mut String, operand: &Expression, parenthesize: bool) {
    if parenthesize {
        out.push_str("\\left(");
        write_expression(out, operand);
        out.push_str("\\right)");
    } else {
        write_expression(out, operand);
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::Parser;

    fn latex(source: &str) -> String {
        Parser::default().parse(source).unwrap().to_latex()
    }

    #[test]
    fn test_fractions_and_powers() {
        assert_eq!(latex("1/x"), "\\frac{1}{x}");
        assert_eq!(latex("x^(2*x)"), "x^{2 \\cdot x}");
        assert_eq!(latex("(x+1)^2"), "\\left(x + 1\\right)^{2}");
        assert_eq!(latex("(1/2)^x"), "\\left(\\frac{1}{2}\\right)^{x}");
        assert_eq!(latex("3*(1/x)"), "3 \\cdot \\frac{1}{x}");
    }

    #[test]
    fn test_functions_and_constants() {
        assert_eq!(latex("sin(pi*x)"), "\\sin\\left(\\pi \\cdot x\\right)");
        assert_eq!(latex("sqrt(x)"), "\\sqrt{x}");
        assert_eq!(latex("abs(x)"), "\\left|x\\right|");
        assert_eq!(latex("arctan(x)"), "\\arctan\\left(x\\right)");
        assert_eq!(latex("log10(x)"), "\\log_{10}\\left(x\\right)");
        assert_eq!(latex("erf(x)"), "\\operatorname{erf}\\left(x\\right)");
    }

    #[test]
    fn test_signs_and_numbers() {
        assert_eq!(latex("-(x - 1)"), "-\\left(x - 1\\right)");
        assert_eq!(latex("-x^2"), "-x^{2}");
        assert_eq!(latex("2.5e-7*x"), "2.5 \\cdot 10^{-7} \\cdot x");
        assert_eq!(latex("1e20"), "10^{20}");
        assert_eq!(latex("y2"), "\\mathrm{y2}");
        assert_eq!(latex("1e400 - x"), "\\infty - x");
    }
}
