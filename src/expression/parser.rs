use log::{debug, warn};

use crate::expression::ast::{BinaryOp, Expression, UnaryOp};
use crate::expression::errors::ParseError;
use crate::expression::lexer::{Token, tokenize};
use crate::expression::normalize::normalize;

/// Structural limits applied while turning text into a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLimits {
    /// Maximum raw input length in characters
    pub max_len: usize,
    /// Maximum node count of the finished tree
    pub max_nodes: usize,
    /// Maximum nesting of parentheses, signs and exponents
    pub max_depth: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_len: 200,
            max_nodes: 120,
            max_depth: 64,
        }
    }
}

/// Parse raw formula text (rank letters and `^` allowed) into a tree.
///
/// # Errors
///
/// Returns a [`ParseError`] when the input is empty, too long, contains
/// anything but numbers, `+ - * / ^ **` and parentheses, has unbalanced
/// parentheses, or yields a tree beyond the node or depth limits.
pub fn parse(input: &str, limits: &ParseLimits) -> Result<Expression, ParseError> {
    let len = input.chars().count();
    if len > limits.max_len {
        warn!("Rejecting expression of {} characters", len);
        return Err(ParseError::TooLong {
            len,
            max: limits.max_len,
        });
    }

    let normalized = normalize(input);
    if normalized.is_empty() {
        return Err(ParseError::Empty);
    }

    let tokens = tokenize(&normalized)?;
    check_balanced(&tokens)?;

    let mut parser = Parser::new(tokens, limits);
    let expr = parser.parse_expr()?;
    if let Some(token) = parser.peek() {
        return Err(ParseError::UnexpectedToken(token.to_string()));
    }

    debug!("Parsed '{}' into {} nodes", normalized, parser.nodes);
    Ok(expr)
}

fn check_balanced(tokens: &[Token]) -> Result<(), ParseError> {
    let mut open: usize = 0;
    for token in tokens {
        match token {
            Token::LParen => open += 1,
            Token::RParen => {
                open = open
                    .checked_sub(1)
                    .ok_or(ParseError::UnbalancedParentheses)?;
            }
            _ => {}
        }
    }
    if open == 0 {
        Ok(())
    } else {
        Err(ParseError::UnbalancedParentheses)
    }
}

/// Recursive-descent parser. Every recursive path goes through
/// [`Parser::parse_factor`], which holds the nesting guard, and every node is
/// built through [`Parser::node`], which holds the size guard. Operator
/// chains are built in loops, so the node cap also caps the tree's depth.
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    max_depth: usize,
    nodes: usize,
    max_nodes: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>, limits: &ParseLimits) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            max_depth: limits.max_depth,
            nodes: 0,
            max_nodes: limits.max_nodes,
        }
    }

    fn node(&mut self, expr: Expression) -> Result<Expression, ParseError> {
        self.nodes += 1;
        if self.nodes > self.max_nodes {
            warn!("Rejecting expression with more than {} nodes", self.max_nodes);
            return Err(ParseError::TooManyNodes {
                count: self.nodes,
                max: self.max_nodes,
            });
        }
        Ok(expr)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn consume(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_expr(&mut self) -> Result<Expression, ParseError> {
        let mut node = self.parse_term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => return Ok(node),
            };
            self.pos += 1;
            let rhs = self.parse_term()?;
            node = self.node(Expression::binary(op, node, rhs))?;
        }
    }

    fn parse_term(&mut self) -> Result<Expression, ParseError> {
        let mut node = self.parse_factor()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                _ => return Ok(node),
            };
            self.pos += 1;
            let rhs = self.parse_factor()?;
            node = self.node(Expression::binary(op, node, rhs))?;
        }
    }

    fn parse_factor(&mut self) -> Result<Expression, ParseError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            warn!("Expression exceeds nesting depth {}", self.max_depth);
            return Err(ParseError::TooDeep {
                max: self.max_depth,
            });
        }

        let result = if self.consume(&Token::Plus) {
            self.parse_factor()
                .and_then(|operand| self.node(Expression::unary(UnaryOp::Plus, operand)))
        } else if self.consume(&Token::Minus) {
            self.parse_factor()
                .and_then(|operand| self.node(Expression::unary(UnaryOp::Minus, operand)))
        } else {
            self.parse_power()
        };

        self.depth -= 1;
        result
    }

    fn parse_power(&mut self) -> Result<Expression, ParseError> {
        let base = self.parse_primary()?;
        if self.consume(&Token::Pow) {
            // right associative, exponent may carry a sign
            let exponent = self.parse_factor()?;
            self.node(Expression::binary(BinaryOp::Pow, base, exponent))
        } else {
            Ok(base)
        }
    }

    fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        match self.next() {
            Some(Token::Number(value)) => self.node(Expression::number(value)),
            Some(Token::LParen) => {
                let inner = self.parse_expr()?;
                if self.consume(&Token::RParen) {
                    Ok(inner)
                } else {
                    match self.peek() {
                        Some(token) => Err(ParseError::UnexpectedToken(token.to_string())),
                        None => Err(ParseError::UnbalancedParentheses),
                    }
                }
            }
            Some(Token::Ident(name)) => Err(ParseError::UnsupportedIdentifier(name)),
            Some(token) => Err(ParseError::UnexpectedToken(token.to_string())),
            None => Err(ParseError::UnexpectedEnd),
        }
    }
}
