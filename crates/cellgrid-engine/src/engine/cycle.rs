//! Circular dependency detection for formula cells.
//!
//! When a formula is entered, we must verify it doesn't create a cycle
//! (e.g., A1 references B1, B1 references C1, C1 references A1).
//! This module uses depth-first search over each cell's `depends_on` set.
//! Cells missing from the grid are leaves.

use std::collections::HashSet;

use super::{CellRef, Grid};

/// Detect circular dependencies reachable from a cell.
/// Returns Some(cycle_path) if a cycle is found, None otherwise. The path
/// starts at `start` and ends with the cell that closed the cycle.
pub fn detect_cycle(start: &CellRef, grid: &Grid) -> Option<Vec<CellRef>> {
    let mut on_path = HashSet::new();
    let mut finished = HashSet::new();
    let mut path = Vec::new();

    if detect_cycle_dfs(start, grid, &mut on_path, &mut finished, &mut path) {
        Some(path)
    } else {
        None
    }
}

/// Whether any cycle is reachable from `start`.
pub fn has_cycle(start: &CellRef, grid: &Grid) -> bool {
    detect_cycle(start, grid).is_some()
}

fn detect_cycle_dfs(
    current: &CellRef,
    grid: &Grid,
    on_path: &mut HashSet<CellRef>,
    finished: &mut HashSet<CellRef>,
    path: &mut Vec<CellRef>,
) -> bool {
    if on_path.contains(current) {
        path.push(current.clone());
        return true;
    }
    if finished.contains(current) {
        return false;
    }

    // Clone the edge set so no map guard is held across the recursion.
    let deps = match grid.get(current) {
        Some(entry) => entry.depends_on.clone(),
        None => return false,
    };

    on_path.insert(current.clone());
    path.push(current.clone());

    for dep in &deps {
        if detect_cycle_dfs(dep, grid, on_path, finished, path) {
            return true;
        }
    }

    path.pop();
    on_path.remove(current);
    finished.insert(current.clone());
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Cell;

    fn grid_of(cells: &[(&str, &str)]) -> Grid {
        let grid = Grid::new();
        for (addr, expr) in cells {
            grid.insert(CellRef::from_str(addr).unwrap(), Cell::from_input(expr));
        }
        grid
    }

    fn at(name: &str) -> CellRef {
        CellRef::from_str(name).unwrap()
    }

    #[test]
    fn test_no_cycle_in_chain() {
        let grid = grid_of(&[("A1", "=B1"), ("B1", "=C1+1"), ("C1", "5")]);
        assert!(detect_cycle(&at("A1"), &grid).is_none());
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let grid = grid_of(&[("A1", "=A1+1")]);
        assert_eq!(detect_cycle(&at("A1"), &grid), Some(vec![at("A1"), at("A1")]));
    }

    #[test]
    fn test_three_cell_cycle_path() {
        let grid = grid_of(&[("A1", "=B1"), ("B1", "=C1"), ("C1", "=A1")]);
        let path = detect_cycle(&at("A1"), &grid).unwrap();
        assert_eq!(path, vec![at("A1"), at("B1"), at("C1"), at("A1")]);
    }

    #[test]
    fn test_cycle_reachable_but_not_through_start() {
        let grid = grid_of(&[("A1", "=B1"), ("B1", "=C1"), ("C1", "=B1")]);
        assert!(has_cycle(&at("A1"), &grid));
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let grid = grid_of(&[
            ("A1", "=B1+C1"),
            ("B1", "=D1"),
            ("C1", "=D1"),
            ("D1", "1"),
        ]);
        assert!(!has_cycle(&at("A1"), &grid));
    }

    #[test]
    fn test_missing_and_malformed_cells_are_leaves() {
        let grid = grid_of(&[("A1", "=Z9+B1"), ("B1", "=(")]);
        assert!(!has_cycle(&at("A1"), &grid));
        assert!(!has_cycle(&at("Q7"), &grid));
    }
}
