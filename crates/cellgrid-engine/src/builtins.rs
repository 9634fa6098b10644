//! Built-in formula functions.
//!
//! Function names are matched case-insensitively. Arguments arrive already
//! evaluated; every failure is reported as a [`Value::Error`].

use num_bigint::BigInt;
use num_traits::One;

use crate::engine::{ErrorKind, Value};

/// Names of all built-in functions, uppercase.
pub const BUILTIN_NAMES: [&str; 5] = ["NOT", "INC", "DEC", "MMAX", "MMIN"];

/// Apply the built-in named `name` to already evaluated arguments.
pub(crate) fn call_builtin(name: &str, args: &[Value]) -> Value {
    match name.to_ascii_uppercase().as_str() {
        "NOT" => not(args),
        "INC" => step(args, BigInt::one()),
        "DEC" => step(args, -BigInt::one()),
        "MMAX" => fold_integers(args, |acc, n| if n > acc { n } else { acc }),
        "MMIN" => fold_integers(args, |acc, n| if n < acc { n } else { acc }),
        _ => Value::Error(ErrorKind::UnknownFunction),
    }
}

fn not(args: &[Value]) -> Value {
    let [arg] = args else {
        return Value::Error(ErrorKind::ArityError);
    };
    match arg.as_bool() {
        Some(b) => Value::Boolean(!b),
        None => Value::Error(ErrorKind::TypeMismatch),
    }
}

fn step(args: &[Value], delta: BigInt) -> Value {
    let [arg] = args else {
        return Value::Error(ErrorKind::ArityError);
    };
    match arg.as_integer() {
        Some(n) => Value::Integer(n + delta),
        None => Value::Error(ErrorKind::TypeMismatch),
    }
}

fn fold_integers<'a>(args: &'a [Value], pick: fn(&'a BigInt, &'a BigInt) -> &'a BigInt) -> Value {
    let mut best: Option<&BigInt> = None;
    for arg in args {
        let Some(n) = arg.as_integer() else {
            return Value::Error(ErrorKind::TypeMismatch);
        };
        best = Some(match best {
            Some(acc) => pick(acc, n),
            None => n,
        });
    }
    match best {
        Some(n) => Value::Integer(n.clone()),
        None => Value::Error(ErrorKind::ArityError),
    }
}
