use super::{Document, RecalcOutcome};
use crate::error::{CellgridError, Result};
use crate::storage::{parse_sheet, write_sheet};
use cellgrid_engine::engine::{Cell, CellRef, ErrorKind, Value, detect_cycle};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Result of replacing the store with loaded expressions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file was missing or held `null`; nothing changed.
    Unchanged,
    /// Every cell was loaded and the store recalculated.
    Recalculated(RecalcOutcome),
    /// At least one loaded cell reaches a cycle. Those cells hold `#CYCLE!`
    /// and no cell was recalculated.
    CyclesDetected(Vec<CellRef>),
}

impl Document {
    /// Save to current file path.
    /// Returns the path saved to.
    pub fn save_file(&mut self) -> Result<PathBuf> {
        let Some(path) = self.file_path.clone() else {
            return Err(CellgridError::NoFilePath);
        };
        self.save_to_file(&path)?;
        Ok(path)
    }

    /// Write every cell's expression to `path`. Values are not saved.
    pub fn save_to_file(&mut self, path: &Path) -> Result<()> {
        write_sheet(path, &self.grid)?;
        info!("saved {} cell(s) to {}", self.grid.len(), path.display());
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    /// Replace the whole store with the expressions saved at `path`.
    ///
    /// A missing file is a no-op. A malformed file is an error and leaves
    /// the current store untouched.
    pub fn load_from_file(&mut self, path: &Path) -> Result<LoadOutcome> {
        let Some(entries) = parse_sheet(path)? else {
            debug!("nothing to load from {}", path.display());
            return Ok(LoadOutcome::Unchanged);
        };

        let count = entries.len();
        let outcome = self.replace_contents(entries);
        info!("loaded {} cell(s) from {}", count, path.display());

        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(outcome)
    }

    /// Replace every cell, then apply the load-time cycle policy: every cell
    /// that reaches a cycle is marked, and if any was marked the store is
    /// not recalculated at all.
    pub fn replace_contents(&mut self, entries: Vec<(CellRef, String)>) -> LoadOutcome {
        self.grid.clear();
        for (cell_ref, expression) in entries {
            self.grid.insert(cell_ref, Cell::from_input(&expression));
        }

        let mut cyclic = Vec::new();
        for cell_ref in self.cell_refs() {
            if let Some(path) = detect_cycle(&cell_ref, &self.grid) {
                warn!(
                    "circular reference at {} while loading: {}",
                    cell_ref,
                    path.iter()
                        .map(|c| c.to_string())
                        .collect::<Vec<_>>()
                        .join(" -> ")
                );
                if let Some(mut cell) = self.grid.get_mut(&cell_ref) {
                    cell.cached_value = Some(Value::Error(ErrorKind::CircularReference));
                }
                cyclic.push(cell_ref);
            }
        }

        if cyclic.is_empty() {
            LoadOutcome::Recalculated(self.recalculate_all())
        } else {
            LoadOutcome::CyclesDetected(cyclic)
        }
    }
}
