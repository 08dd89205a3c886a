use super::lexer::{tokenize, Token, TokenKind};
use crate::ast::{Expression, Operator, UnaryOperator};
use crate::error::ParseError;
use crate::functions::{Constant, Function};
use log::debug;

/// Limits applied to untrusted formula text before and during parsing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Caps both the parser's recursion and the depth of the resulting tree.
    pub max_depth: usize,
    /// Longest accepted input, in bytes.
    pub max_length: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: 256,
            max_length: 4096,
        }
    }
}

/// Recursive-descent parser for infix formulas in one variable.
///
/// Binding power, loosest first: sums, products, unary sign, powers. Sums and
/// products associate to the left, sign and power to the right, so `-x^2` is
/// `-(x^2)` and `2^3^2` is `2^(3^2)`.
#[derive(Debug, Default, Clone)]
pub struct FormulaParser {
    config: ParserConfig,
}

impl FormulaParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn parse(&self, input: &str) -> Result<Expression, ParseError> {
        debug!("Parsing formula: {}", input);
        if input.len() > self.config.max_length {
            return Err(ParseError::InputTooLong {
                length: input.len(),
                limit: self.config.max_length,
            });
        }

        let tokens = tokenize(input)?;
        if tokens.is_empty() {
            return Err(ParseError::Empty);
        }

        let mut state = ParseState {
            tokens,
            cursor: 0,
            nesting: 0,
            max_depth: self.config.max_depth,
            end: input.len(),
        };
        let node = state.parse_sum()?;

        if let Some(token) = state.peek() {
            return Err(match token.kind {
                TokenKind::Close => ParseError::UnmatchedClosing {
                    position: token.position,
                },
                _ => ParseError::TrailingInput {
                    position: token.position,
                },
            });
        }

        debug!("Parsed expression: {:?}", node.expression);
        Ok(node.expression)
    }
}

/// A subtree together with its depth, so the limit is checked as it grows.
struct Node {
    expression: Expression,
    depth: usize,
}

impl Node {
    fn leaf(expression: Expression) -> Self {
        Node {
            expression,
            depth: 1,
        }
    }
}

struct ParseState<'a> {
    tokens: Vec<Token<'a>>,
    cursor: usize,
    nesting: usize,
    max_depth: usize,
    end: usize,
}

impl<'a> ParseState<'a> {
    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.cursor).copied()
    }

    fn advance(&mut self) -> Option<Token<'a>> {
        let token = self.peek()?;
        self.cursor += 1;
        Some(token)
    }

    fn descend(&mut self) -> Result<(), ParseError> {
        self.nesting += 1;
        if self.nesting > self.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    fn ascend(&mut self) {
        self.nesting -= 1;
    }

    fn check_depth(&self, depth: usize) -> Result<(), ParseError> {
        if depth > self.max_depth {
            return Err(ParseError::TreeTooDeep {
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    fn combine(&self, left: Node, operator: Operator, right: Node) -> Result<Node, ParseError> {
        let depth = 1 + left.depth.max(right.depth);
        self.check_depth(depth)?;
        Ok(Node {
            expression: Expression::binary(left.expression, operator, right.expression),
            depth,
        })
    }

    fn wrap(
        &self,
        inner: Node,
        build: impl FnOnce(Expression) -> Expression,
    ) -> Result<Node, ParseError> {
        let depth = inner.depth + 1;
        self.check_depth(depth)?;
        Ok(Node {
            expression: build(inner.expression),
            depth,
        })
    }

    /// Fails unless the token after `operator` can start an operand.
    fn expect_operand(&self, operator: &Token) -> Result<(), ParseError> {
        match self.peek().map(|token| token.kind) {
            None
            | Some(TokenKind::Star)
            | Some(TokenKind::Slash)
            | Some(TokenKind::Caret)
            | Some(TokenKind::Close)
            | Some(TokenKind::Comma) => Err(ParseError::MissingOperand {
                operator: operator.symbol(),
                position: operator.position,
            }),
            _ => Ok(()),
        }
    }

    fn parse_sum(&mut self) -> Result<Node, ParseError> {
        let mut node = self.parse_product()?;
        while let Some(token) = self.peek() {
            let operator = match token.kind {
                TokenKind::Plus => Operator::Add,
                TokenKind::Minus => Operator::Subtract,
                _ => break,
            };
            self.advance();
            self.expect_operand(&token)?;
            let right = self.parse_product()?;
            node = self.combine(node, operator, right)?;
        }
        Ok(node)
    }

    fn parse_product(&mut self) -> Result<Node, ParseError> {
        let mut node = self.parse_unary()?;
        while let Some(token) = self.peek() {
            let operator = match token.kind {
                TokenKind::Star => Operator::Multiply,
                TokenKind::Slash => Operator::Divide,
                _ => break,
            };
            self.advance();
            self.expect_operand(&token)?;
            let right = self.parse_unary()?;
            node = self.combine(node, operator, right)?;
        }
        Ok(node)
    }

    fn parse_unary(&mut self) -> Result<Node, ParseError> {
        self.descend()?;
        let node = match self.peek() {
            Some(token) if matches!(token.kind, TokenKind::Plus | TokenKind::Minus) => {
                self.advance();
                self.expect_operand(&token)?;
                let operator = match token.kind {
                    TokenKind::Plus => UnaryOperator::Plus,
                    _ => UnaryOperator::Minus,
                };
                let operand = self.parse_unary()?;
                self.wrap(operand, |operand| Expression::unary(operator, operand))?
            }
            _ => self.parse_power()?,
        };
        self.ascend();
        Ok(node)
    }

    fn parse_power(&mut self) -> Result<Node, ParseError> {
        let base = self.parse_primary()?;
        match self.peek() {
            Some(token) if token.kind == TokenKind::Caret => {
                self.advance();
                self.expect_operand(&token)?;
                // the exponent may carry its own sign: 2^-x
                let exponent = self.parse_unary()?;
                self.combine(base, Operator::Power, exponent)
            }
            _ => Ok(base),
        }
    }

    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        let token = self.advance().ok_or(ParseError::UnexpectedToken {
            found: "end of input".to_string(),
            position: self.end,
        })?;

        match token.kind {
            TokenKind::Number(value) => Ok(Node::leaf(Expression::Number(value))),
            TokenKind::Identifier => self.parse_name(token),
            TokenKind::Open => self.parse_group(token),
            TokenKind::Close => Err(ParseError::UnmatchedClosing {
                position: token.position,
            }),
            TokenKind::Star | TokenKind::Slash | TokenKind::Caret => {
                Err(ParseError::MissingOperand {
                    operator: token.symbol(),
                    position: token.position,
                })
            }
            TokenKind::Plus | TokenKind::Minus | TokenKind::Comma => {
                Err(ParseError::UnexpectedToken {
                    found: token.text.to_string(),
                    position: token.position,
                })
            }
        }
    }

    /// A name directly followed by an opening delimiter is a call; otherwise
    /// it is a constant if the table knows it and a variable if not.
    fn parse_name(&mut self, name: Token<'a>) -> Result<Node, ParseError> {
        let open = match self.peek() {
            Some(token) if token.kind == TokenKind::Open => token,
            _ => {
                let expression = match Constant::try_from(name.text) {
                    Ok(constant) => Expression::Constant(constant),
                    Err(_) => Expression::variable(name.text),
                };
                return Ok(Node::leaf(expression));
            }
        };
        self.advance();

        let function = Function::try_from(name.text).map_err(|_| ParseError::UnknownFunction {
            name: name.text.to_string(),
            position: name.position,
        })?;
        let argument_count = || ParseError::ArgumentCount {
            name: name.text.to_string(),
            position: name.position,
        };

        match self.peek() {
            None => {
                return Err(ParseError::UnclosedDelimiter {
                    position: open.position,
                })
            }
            Some(token) if matches!(token.kind, TokenKind::Close | TokenKind::Comma) => {
                return Err(argument_count())
            }
            _ => {}
        }

        let argument = self.parse_sum()?;
        match self.advance() {
            Some(token) if token.kind == TokenKind::Close => {}
            Some(token) if token.kind == TokenKind::Comma => return Err(argument_count()),
            Some(token) => {
                return Err(ParseError::UnexpectedToken {
                    found: token.text.to_string(),
                    position: token.position,
                })
            }
            None => {
                return Err(ParseError::UnclosedDelimiter {
                    position: open.position,
                })
            }
        }

        self.wrap(argument, |argument| Expression::call(function, argument))
    }

    /// Grouping delimiters leave no trace in the tree.
    fn parse_group(&mut self, open: Token<'a>) -> Result<Node, ParseError> {
        match self.peek() {
            None => {
                return Err(ParseError::UnclosedDelimiter {
                    position: open.position,
                })
            }
            Some(token) if token.kind == TokenKind::Close => {
                return Err(ParseError::UnexpectedToken {
                    found: token.text.to_string(),
                    position: token.position,
                })
            }
            _ => {}
        }

        let inner = self.parse_sum()?;
        match self.advance() {
            Some(token) if token.kind == TokenKind::Close => Ok(inner),
            Some(token) => Err(ParseError::UnexpectedToken {
                found: token.text.to_string(),
                position: token.position,
            }),
            None => Err(ParseError::UnclosedDelimiter {
                position: open.position,
            }),
        }
    }
}
