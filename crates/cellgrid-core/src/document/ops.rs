use super::{Document, RecalcOutcome};
use crate::error::{CellgridError, Result};
use cellgrid_engine::engine::{
    Cell, CellRef, ErrorKind, Snapshot, Value, detect_cycle, format_value, snapshot,
};
use log::warn;

/// Dimension for row/column operations
#[derive(Copy, Clone)]
enum Dimension {
    Row,
    Column,
}

impl Dimension {
    /// Get the coordinate value from a CellRef for this dimension
    fn get_coord(&self, cell_ref: &CellRef) -> usize {
        match self {
            Dimension::Row => cell_ref.row,
            Dimension::Column => cell_ref.col,
        }
    }
}

/// Result of applying an edit to a cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    /// The store was recalculated.
    Recalculated(RecalcOutcome),
    /// The edit closed a dependency cycle. The edited cell holds
    /// `#CYCLE!` and nothing else was recalculated.
    CycleDetected(Vec<CellRef>),
}

fn parse_address(address: &str) -> Result<CellRef> {
    CellRef::from_str(address.trim())
        .ok_or_else(|| CellgridError::InvalidAddress(address.to_string()))
}

impl Document {
    /// Set a cell's expression by address, e.g. `set_expression("b2", "=A1*2")`.
    pub fn set_expression(&mut self, address: &str, expression: &str) -> Result<EditOutcome> {
        let cell_ref = parse_address(address)?;
        Ok(self.set_cell_expression(cell_ref, expression))
    }

    /// Set a cell's expression.
    ///
    /// Dependencies are re-derived first. If a cycle is now reachable from
    /// this cell, only this cell is marked `#CYCLE!`; every other cell keeps
    /// its previous value, even ones on the same cycle. Otherwise the whole
    /// store is recalculated.
    pub fn set_cell_expression(&mut self, cell_ref: CellRef, expression: &str) -> EditOutcome {
        self.grid
            .entry(cell_ref.clone())
            .or_insert_with(Cell::new_empty)
            .set_expression(expression);
        self.modified = true;

        if let Some(path) = detect_cycle(&cell_ref, &self.grid) {
            warn!("circular reference at {}: {}", cell_ref, format_path(&path));
            if let Some(mut cell) = self.grid.get_mut(&cell_ref) {
                cell.cached_value = Some(Value::Error(ErrorKind::CircularReference));
            }
            return EditOutcome::CycleDetected(path);
        }

        EditOutcome::Recalculated(self.recalculate_all())
    }

    /// Get a copy of the cell at `address`, creating an empty one if absent.
    pub fn get_or_create_cell(&self, address: &str) -> Result<Cell> {
        let cell_ref = parse_address(address)?;
        Ok(self.get_or_create(&cell_ref))
    }

    /// Get a copy of the cell at `cell_ref`, creating an empty one if absent.
    pub fn get_or_create(&self, cell_ref: &CellRef) -> Cell {
        self.grid
            .entry(cell_ref.clone())
            .or_insert_with(Cell::new_empty)
            .clone()
    }

    /// Get a cell's cached value without creating the cell.
    pub fn get_cell_value(&self, cell_ref: &CellRef) -> Option<Value> {
        self.grid
            .get(cell_ref)
            .and_then(|cell| cell.cached_value.clone())
    }

    /// Display string for a cell's cached value (empty when unset).
    pub fn get_cell_display(&self, cell_ref: &CellRef) -> String {
        format_value(self.get_cell_value(cell_ref).as_ref())
    }

    /// Snapshot copy of every cell's cached value.
    pub fn get_all_values(&self) -> Snapshot {
        snapshot(&self.grid)
    }

    /// Addresses of all cells, in row-major order.
    pub fn cell_refs(&self) -> Vec<CellRef> {
        let mut refs: Vec<CellRef> = self.grid.iter().map(|entry| entry.key().clone()).collect();
        refs.sort();
        refs
    }

    /// Remove every cell on row `row_number` (1-based, as written in the
    /// address), then recalculate. Remaining cells are not shifted.
    pub fn on_row_deleted(&mut self, row_number: usize) -> RecalcOutcome {
        match row_number.checked_sub(1) {
            Some(row) => self.delete_dimension(Dimension::Row, row),
            None => self.recalculate_all(),
        }
    }

    /// Remove every cell in column `column_name` (e.g. `"b"` or `"AA"`),
    /// then recalculate. Remaining cells are not shifted.
    pub fn on_column_deleted(&mut self, column_name: &str) -> Result<RecalcOutcome> {
        let col = CellRef::letters_to_col(column_name.trim())
            .ok_or_else(|| CellgridError::InvalidColumn(column_name.to_string()))?;
        Ok(self.delete_dimension(Dimension::Column, col))
    }

    /// Generic delete operation for row or column
    fn delete_dimension(&mut self, dim: Dimension, at: usize) -> RecalcOutcome {
        let before = self.grid.len();
        self.grid.retain(|cell_ref, _| dim.get_coord(cell_ref) != at);
        if self.grid.len() != before {
            self.modified = true;
        }
        self.recalculate_all()
    }
}

fn format_path(path: &[CellRef]) -> String {
    path.iter()
        .map(|cell_ref| cell_ref.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
