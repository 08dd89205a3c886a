use crate::error::ParseError;
use log::debug;
use pest::error::InputLocation;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "ast/formula.pest"]
struct FormulaLexer;

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Number(f64),
    Identifier,
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Open,
    Close,
    Comma,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub position: usize,
}

impl Token<'_> {
    /// First character of the token, used when reporting operators.
    pub fn symbol(&self) -> char {
        self.text.chars().next().unwrap_or(' ')
    }
}

/// Splits formula text into tokens. Whitespace is skipped; any character
/// outside the formula alphabet is rejected with its position.
pub(crate) fn tokenize(input: &str) -> Result<Vec<Token<'_>>, ParseError> {
    let mut pairs = FormulaLexer::parse(Rule::tokens, input)
        .map_err(|e| unexpected_character(input, &e.location))?;
    let stream = pairs.next().ok_or(ParseError::Empty)?;

    let mut tokens = Vec::new();
    for pair in stream.into_inner() {
        let text = pair.as_str();
        let position = pair.as_span().start();
        let kind = match pair.as_rule() {
            Rule::number => {
                let value = text
                    .parse::<f64>()
                    .map_err(|_| ParseError::InvalidNumber {
                        literal: text.to_string(),
                        position,
                    })?;
                TokenKind::Number(value)
            }
            Rule::identifier => TokenKind::Identifier,
            Rule::plus => TokenKind::Plus,
            Rule::minus => TokenKind::Minus,
            Rule::star => TokenKind::Star,
            Rule::slash => TokenKind::Slash,
            Rule::caret => TokenKind::Caret,
            Rule::open => TokenKind::Open,
            Rule::close => TokenKind::Close,
            Rule::comma => TokenKind::Comma,
            // EOI and the silent rules carry no token
            _ => continue,
        };
        tokens.push(Token {
            kind,
            text,
            position,
        });
    }

    debug!("Tokens: {:?}", tokens);
    Ok(tokens)
}

fn unexpected_character(input: &str, location: &InputLocation) -> ParseError {
    let position = match location {
        InputLocation::Pos(position) => *position,
        InputLocation::Span((start, _)) => *start,
    };
    match input.get(position..).and_then(|rest| rest.chars().next()) {
        Some(character) => ParseError::UnexpectedCharacter {
            character,
            position,
        },
        None => ParseError::TrailingInput { position },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn test_operators_and_delimiters() {
        assert_eq!(
            kinds("+-*/^(){},"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Caret,
                TokenKind::Open,
                TokenKind::Close,
                TokenKind::Open,
                TokenKind::Close,
                TokenKind::Comma,
            ]
        );
    }

    #[test]
    fn test_number_notations() {
        assert_eq!(
            kinds("12 3.5 .25 7. 1e3 2.5E-2 4e+1"),
            vec![
                TokenKind::Number(12.0),
                TokenKind::Number(3.5),
                TokenKind::Number(0.25),
                TokenKind::Number(7.0),
                TokenKind::Number(1000.0),
                TokenKind::Number(0.025),
                TokenKind::Number(40.0),
            ]
        );
    }

    #[test]
    fn test_exponent_needs_digits() {
        // "2e" is the number 2 followed by the constant e
        let tokens = tokenize("2e").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Number(2.0));
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].text, "e");
    }

    #[test]
    fn test_identifiers_with_digits() {
        let tokens = tokenize("log10(x2)").unwrap();
        assert_eq!(tokens[0].text, "log10");
        assert_eq!(tokens[2].text, "x2");
        assert_eq!(tokens[2].position, 6);
    }

    #[test]
    fn test_whitespace_is_skipped() {
        let tokens = tokenize("  x\t+\n1 ").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].position, 2);
        assert_eq!(tokens[2].position, 6);
    }

    #[test]
    fn test_unsupported_character() {
        assert_eq!(
            tokenize("x + 2 @ 3"),
            Err(ParseError::UnexpectedCharacter {
                character: '@',
                position: 6
            })
        );
        assert!(tokenize("x % 2").is_err());
    }

    #[test]
    fn test_empty_input_has_no_tokens() {
        assert!(tokenize("   ").unwrap().is_empty());
    }
}
