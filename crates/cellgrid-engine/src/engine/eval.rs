//! Formula evaluation.
//!
//! Walks an [`Expr`] against a [`Snapshot`] of cell values. Evaluation never
//! fails in the Rust sense: every problem becomes a [`Value::Error`] that
//! flows out through the normal return value.

use num_bigint::BigInt;
use num_traits::Zero;

use super::ast::{BinaryOperator, Expr};
use super::parser::parse_formula;
use super::value::{ErrorKind, Value, parse_bool_literal};
use super::{CellRef, Snapshot};

/// Evaluate a parsed formula against a snapshot of cell values.
pub fn evaluate(expr: &Expr, snapshot: &Snapshot) -> Value {
    match expr {
        Expr::Integer(n) => Value::Integer(n.clone()),
        Expr::Boolean(b) => Value::Boolean(*b),
        Expr::CellRef(cell) => resolve_reference(cell, snapshot),
        Expr::DanglingRef(_) => Value::Error(ErrorKind::UnknownReference),
        Expr::Group(inner) => evaluate(inner, snapshot),
        Expr::BinaryOp { op, left, right } => {
            let left = evaluate(left, snapshot);
            let right = evaluate(right, snapshot);
            apply_binary(*op, &left, &right)
        }
        Expr::Function { name, args } => {
            let args: Vec<Value> = args.iter().map(|arg| evaluate(arg, snapshot)).collect();
            crate::builtins::call_builtin(name, &args)
        }
    }
}

/// Parse and evaluate a formula body (the text after `=`).
/// A body that fails to parse evaluates to `#PARSE!`.
pub fn evaluate_formula(body: &str, snapshot: &Snapshot) -> Value {
    match parse_formula(body) {
        Ok(ast) => evaluate(&ast, snapshot),
        Err(_) => Value::Error(ErrorKind::ParseError),
    }
}

/// Derive a cell's value from its raw expression.
///
/// - empty or whitespace-only → unset
/// - `=...` → formula result
/// - integer literal → `Integer`
/// - anything else → `Text`, verbatim
pub fn derive_value(expression: &str, snapshot: &Snapshot) -> Option<Value> {
    if expression.trim().is_empty() {
        return None;
    }
    if let Some(body) = expression.strip_prefix('=') {
        return Some(evaluate_formula(body, snapshot));
    }
    match parse_integer_literal(expression) {
        Some(n) => Some(Value::Integer(n)),
        None => Some(Value::Text(expression.to_string())),
    }
}

/// Parse a literal (non-formula) integer: optional sign, digits, and
/// surrounding whitespace.
pub fn parse_integer_literal(text: &str) -> Option<BigInt> {
    let text = text.trim();
    let digits = text
        .strip_prefix('-')
        .or_else(|| text.strip_prefix('+'))
        .unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<BigInt>().ok()
}

fn resolve_reference(cell: &CellRef, snapshot: &Snapshot) -> Value {
    let Some(Some(value)) = snapshot.get(cell) else {
        return Value::Error(ErrorKind::UnknownReference);
    };
    match value {
        Value::Integer(_) | Value::Boolean(_) | Value::Error(_) => value.clone(),
        Value::Text(text) if text.starts_with('#') => match ErrorKind::from_code(text) {
            Some(kind) => Value::Error(kind),
            None => value.clone(),
        },
        Value::Text(text) => match parse_bool_literal(text) {
            Some(b) => Value::Boolean(b),
            None => Value::Integer(BigInt::zero()),
        },
    }
}

fn apply_binary(op: BinaryOperator, left: &Value, right: &Value) -> Value {
    let (Some(l), Some(r)) = (left.as_integer(), right.as_integer()) else {
        return Value::Error(ErrorKind::TypeMismatch);
    };
    match op {
        BinaryOperator::Add => Value::Integer(l + r),
        BinaryOperator::Subtract => Value::Integer(l - r),
        BinaryOperator::Multiply => Value::Integer(l * r),
        // BigInt division truncates toward zero.
        BinaryOperator::Divide if r.is_zero() => Value::Error(ErrorKind::DivideByZero),
        BinaryOperator::Divide => Value::Integer(l / r),
        BinaryOperator::Equal => Value::Boolean(l == r),
        BinaryOperator::LessThan => Value::Boolean(l < r),
        BinaryOperator::GreaterThan => Value::Boolean(l > r),
    }
}
