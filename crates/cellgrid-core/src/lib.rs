//! cellgrid-core - UI-agnostic document model, recalculation, and storage.

pub mod document;
pub mod error;
pub mod storage;

pub use document::{Document, EditOutcome, LoadOutcome, MAX_RECALC_ROUNDS, RecalcOutcome};
pub use error::{CellgridError, Result};

pub use cellgrid_engine::engine::{Cell, CellRef, ErrorKind, Value};
