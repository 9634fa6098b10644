//! Cell data structures for the spreadsheet grid.
//!
//! - [`Cell`] - Raw expression, derived dependencies, and cached value
//! - [`Grid`] - Sparse storage for cells (backed by `DashMap`)
//! - [`Snapshot`] - Frozen address to value view used during evaluation

use dashmap::DashMap;
use std::collections::{BTreeSet, HashMap};

use super::cell_ref::CellRef;
use super::deps::extract_dependencies;
use super::value::Value;

/// A cell in the spreadsheet grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cell {
    /// Raw text as entered: empty, a literal, or a formula starting with `=`.
    pub expression: String,
    /// Cells referenced by the expression. Always derived from `expression`.
    pub depends_on: BTreeSet<CellRef>,
    /// Last computed value; `None` means unset.
    pub cached_value: Option<Value>,
}

impl Cell {
    pub fn new_empty() -> Cell {
        Cell::default()
    }

    /// Create a cell from raw expression text.
    /// Dependencies are automatically extracted from the expression.
    pub fn from_input(expression: &str) -> Cell {
        Cell {
            expression: expression.to_string(),
            depends_on: extract_dependencies(expression),
            cached_value: None,
        }
    }

    /// Replace the expression and re-derive dependencies. The cached value
    /// is left alone; recalculation or cycle marking decides it.
    pub fn set_expression(&mut self, expression: &str) {
        self.expression = expression.to_string();
        self.depends_on = extract_dependencies(expression);
    }

    pub fn is_empty(&self) -> bool {
        self.expression.trim().is_empty()
    }
}

/// Sparse grid storage.
pub type Grid = DashMap<CellRef, Cell>;

/// Address to value view a formula is evaluated against. Absent keys and
/// `None` values are both treated as unset.
pub type Snapshot = HashMap<CellRef, Option<Value>>;

/// Capture the current cached value of every cell in the grid.
pub fn snapshot(grid: &Grid) -> Snapshot {
    grid.iter()
        .map(|entry| (entry.key().clone(), entry.value().cached_value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input_derives_dependencies() {
        let cell = Cell::from_input("=A1+b2");
        let names: Vec<String> = cell.depends_on.iter().map(|c| c.to_string()).collect();
        assert_eq!(names, vec!["A1", "B2"]);
        assert!(cell.cached_value.is_none());
    }

    #[test]
    fn test_set_expression_replaces_dependencies() {
        let mut cell = Cell::from_input("=A1");
        cell.cached_value = Some(Value::int(1));
        cell.set_expression("7");
        assert!(cell.depends_on.is_empty());
        assert_eq!(cell.cached_value, Some(Value::int(1)));
    }

    #[test]
    fn test_whitespace_expression_is_empty() {
        assert!(Cell::from_input("   ").is_empty());
        assert!(!Cell::from_input(" x ").is_empty());
    }

    #[test]
    fn test_snapshot_copies_cached_values() {
        let grid = Grid::new();
        let mut a1 = Cell::from_input("5");
        a1.cached_value = Some(Value::int(5));
        grid.insert(CellRef::new(0, 0), a1);
        grid.insert(CellRef::new(1, 0), Cell::new_empty());

        let snap = snapshot(&grid);
        assert_eq!(snap.len(), 2);
        assert_eq!(snap[&CellRef::new(0, 0)], Some(Value::int(5)));
        assert_eq!(snap[&CellRef::new(1, 0)], None);
    }
}
