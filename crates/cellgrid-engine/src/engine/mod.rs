//! Spreadsheet engine API.
//!
//! This module provides the core computation engine for the spreadsheet:
//!
//! - [`Cell`], [`Grid`], [`Snapshot`] - Data structures for cell storage
//! - [`CellRef`] - Cell address parsing (A1 notation ↔ row/col indices)
//! - [`Value`], [`ErrorKind`] - Runtime values and error sentinels
//! - [`parse_formula`] - Formula text to [`Expr`]
//! - [`extract_dependencies`] - Cells a formula references
//! - [`detect_cycle`] - Circular dependency detection
//! - [`evaluate`], [`derive_value`] - Formula and literal evaluation
//! - [`format_value`] - Format values for display

mod ast;
mod cell;
mod cell_ref;
mod cycle;
mod deps;
mod eval;
mod format;
mod parser;
mod value;

pub use ast::{BinaryOperator, Expr};
pub use cell::{Cell, Grid, Snapshot, snapshot};
pub use cell_ref::CellRef;
pub use cycle::{detect_cycle, has_cycle};
pub use deps::{collect_references, extract_dependencies};
pub use eval::{derive_value, evaluate, evaluate_formula, parse_integer_literal};
pub use format::format_value;
pub use parser::{MAX_NESTING, MAX_TOKENS, parse_formula};
pub use value::{ErrorKind, Value, parse_bool_literal};

pub use crate::builtins::BUILTIN_NAMES;
pub use num_bigint::BigInt;
