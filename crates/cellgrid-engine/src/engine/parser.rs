//! Formula lexer and parser.
//!
//! A recursive descent parser over a pre-scanned token list. Precedence,
//! lowest to highest: relational (`=`, `<`, `>`), additive (`+`, `-`),
//! multiplicative (`*`, `/`). All binary operators are left-associative.
//! There is no unary minus; `-` only ever appears between two operands.
//!
//! Formulas are bounded: at most [`MAX_NESTING`] levels of parentheses and
//! calls, and at most [`MAX_TOKENS`] tokens. Anything larger is a parse
//! error, which keeps parsing and evaluation depth fixed.

use num_bigint::BigInt;

use super::ast::{BinaryOperator, Expr};
use super::value::parse_bool_literal;
use super::CellRef;
use crate::error::{ParseError, ParseResult};

/// Deepest allowed nesting of parentheses and function calls.
pub const MAX_NESTING: usize = 128;

/// Largest allowed formula, in tokens.
pub const MAX_TOKENS: usize = 2048;

/// Parse a formula body (the text after the leading `=`) into an AST.
///
/// # Example
/// ```
/// use cellgrid_engine::engine::parse_formula;
///
/// assert!(parse_formula("A1 + 2 * MMAX(B1, 3)").is_ok());
/// assert!(parse_formula("1 +").is_err());
/// ```
pub fn parse_formula(body: &str) -> ParseResult<Expr> {
    let tokens = tokenize(body)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        end: body.len(),
        nesting: 0,
    };
    let expr = parser.parse_expression()?;
    if let Some((token, at)) = parser.peek() {
        return Err(ParseError::new(
            format!("Unexpected {} after expression", token.describe()),
            *at,
        ));
    }
    Ok(expr)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Integer(BigInt),
    Boolean(bool),
    CellRef(CellRef),
    DanglingRef(String),
    Identifier(String),
    Operator(BinaryOperator),
    Comma,
    LeftParen,
    RightParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Integer(n) => format!("number '{}'", n),
            Token::Boolean(b) => format!("boolean '{}'", b),
            Token::CellRef(cell) => format!("reference '{}'", cell),
            Token::DanglingRef(name) => format!("reference '{}'", name),
            Token::Identifier(name) => format!("name '{}'", name),
            Token::Operator(op) => format!("operator '{}'", op.symbol()),
            Token::Comma => "','".to_string(),
            Token::LeftParen => "'('".to_string(),
            Token::RightParen => "')'".to_string(),
        }
    }
}

fn tokenize(input: &str) -> ParseResult<Vec<(Token, usize)>> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let c = bytes[pos];
        if c.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        let start = pos;
        if tokens.len() == MAX_TOKENS {
            return Err(ParseError::new(
                format!("Formula longer than {} tokens", MAX_TOKENS),
                start,
            ));
        }
        let single = match c {
            b'+' => Some(Token::Operator(BinaryOperator::Add)),
            b'-' => Some(Token::Operator(BinaryOperator::Subtract)),
            b'*' => Some(Token::Operator(BinaryOperator::Multiply)),
            b'/' => Some(Token::Operator(BinaryOperator::Divide)),
            b'=' => Some(Token::Operator(BinaryOperator::Equal)),
            b'<' => Some(Token::Operator(BinaryOperator::LessThan)),
            b'>' => Some(Token::Operator(BinaryOperator::GreaterThan)),
            b',' => Some(Token::Comma),
            b'(' => Some(Token::LeftParen),
            b')' => Some(Token::RightParen),
            _ => None,
        };
        if let Some(token) = single {
            tokens.push((token, start));
            pos += 1;
            continue;
        }

        if c.is_ascii_digit() {
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
            if pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
                return Err(ParseError::new("Malformed number", start));
            }
            let digits = &input[start..pos];
            let n = digits
                .parse::<BigInt>()
                .map_err(|_| ParseError::new(format!("Invalid number '{}'", digits), start))?;
            tokens.push((Token::Integer(n), start));
            continue;
        }

        if c.is_ascii_alphabetic() {
            while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
                pos += 1;
            }
            let letters_end = pos;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
            if pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_') {
                return Err(ParseError::new("Malformed identifier", start));
            }
            let word = &input[start..pos];
            let token = if pos > letters_end {
                match CellRef::from_str(word) {
                    Some(cell) => Token::CellRef(cell),
                    None => Token::DanglingRef(word.to_ascii_uppercase()),
                }
            } else if let Some(b) = parse_bool_literal(word) {
                Token::Boolean(b)
            } else {
                Token::Identifier(word.to_string())
            };
            tokens.push((token, start));
            continue;
        }

        let ch = input[start..].chars().next().unwrap_or('?');
        return Err(ParseError::new(format!("Unexpected character '{}'", ch), start));
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    /// Byte offset reported for errors at end of input.
    end: usize,
    /// Open parentheses and calls enclosing the current position.
    nesting: usize,
}

impl Parser {
    fn peek(&self) -> Option<&(Token, usize)> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> ParseResult<(Token, usize)> {
        let entry = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| ParseError::new("Unexpected end of formula", self.end))?;
        self.pos += 1;
        Ok(entry)
    }

    fn expect(&mut self, expected: Token) -> ParseResult<()> {
        let (token, at) = self.next()?;
        if token == expected {
            Ok(())
        } else {
            Err(ParseError::new(
                format!("Expected {}, found {}", expected.describe(), token.describe()),
                at,
            ))
        }
    }

    /// Consume the next token if it is a binary operator accepted by `accept`.
    fn take_operator(&mut self, accept: fn(BinaryOperator) -> bool) -> Option<BinaryOperator> {
        match self.peek() {
            Some((Token::Operator(op), _)) if accept(*op) => {
                let op = *op;
                self.pos += 1;
                Some(op)
            }
            _ => None,
        }
    }

    fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_relational()
    }

    /// Enter a parenthesis or call opened at byte offset `at`.
    fn enter(&mut self, at: usize) -> ParseResult<()> {
        if self.nesting == MAX_NESTING {
            return Err(ParseError::new(
                format!("Nesting deeper than {} levels", MAX_NESTING),
                at,
            ));
        }
        self.nesting += 1;
        Ok(())
    }

    fn parse_relational(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_additive()?;
        while let Some(op) = self.take_operator(BinaryOperator::is_relational) {
            let right = self.parse_additive()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_multiplicative()?;
        while let Some(op) = self.take_operator(|op| {
            matches!(op, BinaryOperator::Add | BinaryOperator::Subtract)
        }) {
            let right = self.parse_multiplicative()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_primary()?;
        while let Some(op) = self.take_operator(|op| {
            matches!(op, BinaryOperator::Multiply | BinaryOperator::Divide)
        }) {
            let right = self.parse_primary()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let (token, at) = self.next()?;
        match token {
            Token::Integer(n) => Ok(Expr::Integer(n)),
            Token::Boolean(b) => Ok(Expr::Boolean(b)),
            Token::CellRef(cell) => Ok(Expr::CellRef(cell)),
            Token::DanglingRef(name) => Ok(Expr::DanglingRef(name)),
            Token::LeftParen => {
                self.enter(at)?;
                let inner = self.parse_expression()?;
                self.expect(Token::RightParen)?;
                self.nesting -= 1;
                Ok(Expr::Group(Box::new(inner)))
            }
            Token::Identifier(name) => {
                self.expect(Token::LeftParen)?;
                self.enter(at)?;
                let args = self.parse_arguments()?;
                self.nesting -= 1;
                Ok(Expr::Function { name, args })
            }
            other => Err(ParseError::new(
                format!("Unexpected {}", other.describe()),
                at,
            )),
        }
    }

    /// Parse a call's argument list; the opening parenthesis is already consumed.
    fn parse_arguments(&mut self) -> ParseResult<Vec<Expr>> {
        let mut args = Vec::new();
        if let Some((Token::RightParen, _)) = self.peek() {
            self.pos += 1;
            return Ok(args);
        }
        loop {
            args.push(self.parse_expression()?);
            let (token, at) = self.next()?;
            match token {
                Token::Comma => continue,
                Token::RightParen => return Ok(args),
                other => {
                    return Err(ParseError::new(
                        format!("Expected ',' or ')', found {}", other.describe()),
                        at,
                    ));
                }
            }
        }
    }
}

fn binary(op: BinaryOperator, left: Expr, right: Expr) -> Expr {
    Expr::BinaryOp {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}
