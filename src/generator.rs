//! Random formulas for automatically authored tasks.

use crate::ast::{Operator, VARIABLE};
use crate::functions::Function;
use rand::Rng;

const TERMINALS: [&str; 11] = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "e", "pi"];

/// Random formula text with at most `depth` levels of calls and operators.
pub fn generate(depth: usize) -> String {
    generate_with(&mut rand::rng(), depth)
}

/// Like [`generate`], drawing from the given generator.
///
/// At depth 1 or less the result is the variable or, with equal chance, a
/// digit, `e` or `pi`. Deeper, it is either a call of a random function or
/// two smaller formulas joined by a random operator. Operators are written
/// without surrounding parentheses, so the usual precedence applies when the
/// text is parsed back.
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, depth: usize) -> String {
    let mut out = String::new();
    write_formula(rng, depth, &mut out);
    out
}

fn write_formula<R: Rng + ?Sized>(rng: &mut R, depth: usize, out: &mut String) {
    if depth <= 1 {
        if rng.random_bool(0.5) {
            out.push_str(VARIABLE);
        } else {
            out.push_str(TERMINALS[rng.random_range(0..TERMINALS.len())]);
        }
    } else if rng.random_bool(0.5) {
        let function = Function::ALL[rng.random_range(0..Function::ALL.len())];
        out.push_str(function.name());
        out.push('(');
        write_formula(rng, depth - 1, out);
        out.push(')');
    } else {
        let operator = Operator::ALL[rng.random_range(0..Operator::ALL.len())];
        write_formula(rng, depth - 1, out);
        out.push(' ');
        out.push(operator.symbol());
        out.push(' ');
        write_formula(rng, depth - 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expression, Parser};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_formulas_parse() {
        let parser = Parser::default();
        let mut rng = StdRng::seed_from_u64(7);
        for depth in 0..=6 {
            for _ in 0..200 {
                let formula = generate_with(&mut rng, depth);
                assert!(
                    parser.parse(&formula).is_ok(),
                    "depth {}: {}",
                    depth,
                    formula
                );
            }
        }
    }

    #[test]
    fn test_shallow_formulas_are_terminals() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let formula = generate_with(&mut rng, 1);
            assert!(formula == VARIABLE || TERMINALS.contains(&formula.as_str()));
        }
    }

    #[test]
    fn test_depth_bounds_the_tree() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let expression: Expression = generate_with(&mut rng, 4).parse().unwrap();
            // regrouping by precedence can deepen an operator chain but never
            // beyond one node per call, operator and terminal
            assert!(expression.depth() <= 15);
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let first = generate_with(&mut StdRng::seed_from_u64(42), 5);
        let second = generate_with(&mut StdRng::seed_from_u64(42), 5);
        assert_eq!(first, second);
        assert!(!generate(3).is_empty());
    }
}
