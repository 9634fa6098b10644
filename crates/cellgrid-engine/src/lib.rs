//! cellgrid_engine - Formula language, evaluation, and dependency analysis.

pub(crate) mod builtins;
pub mod engine;
pub mod error;

pub use error::{ParseError, ParseResult};
