//! Runtime values produced by formula evaluation.
//!
//! Every evaluation yields exactly one [`Value`]. Failures are carried in-band
//! as [`Value::Error`] rather than surfacing as Rust errors, so a broken cell
//! never stops the rest of the grid from recalculating.

use num_bigint::BigInt;

/// The closed set of error sentinels a cell can hold.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ErrorKind {
    ParseError,
    UnknownReference,
    TypeMismatch,
    DivideByZero,
    ArityError,
    UnknownFunction,
    CircularReference,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 7] = [
        ErrorKind::ParseError,
        ErrorKind::UnknownReference,
        ErrorKind::TypeMismatch,
        ErrorKind::DivideByZero,
        ErrorKind::ArityError,
        ErrorKind::UnknownFunction,
        ErrorKind::CircularReference,
    ];

    /// Display code for this error, e.g. `#DIV/0!`.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::ParseError => "#PARSE!",
            ErrorKind::UnknownReference => "#REF!",
            ErrorKind::TypeMismatch => "#VALUE!",
            ErrorKind::DivideByZero => "#DIV/0!",
            ErrorKind::ArityError => "#ARG!",
            ErrorKind::UnknownFunction => "#NAME?",
            ErrorKind::CircularReference => "#CYCLE!",
        }
    }

    /// Inverse of [`ErrorKind::code`]. Matching is case-insensitive.
    pub fn from_code(code: &str) -> Option<ErrorKind> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.code().eq_ignore_ascii_case(code.trim()))
    }
}

/// A cell value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    Integer(BigInt),
    Boolean(bool),
    Text(String),
    Error(ErrorKind),
}

impl Value {
    pub fn int(n: impl Into<BigInt>) -> Value {
        Value::Integer(n.into())
    }

    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Value::Integer(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<ErrorKind> for Value {
    fn from(kind: ErrorKind) -> Self {
        Value::Error(kind)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::Integer(n)
    }
}

/// Parse a boolean literal the way formulas and referenced text do:
/// `true`/`false`, case-insensitive, surrounding whitespace ignored.
pub fn parse_bool_literal(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
