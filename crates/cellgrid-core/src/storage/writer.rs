//! Writer for the JSON sheet format

use crate::error::Result;
use cellgrid_engine::engine::Grid;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Write a Grid's expressions to a sheet file
pub fn write_sheet(path: &Path, grid: &Grid) -> Result<()> {
    let content = write_sheet_content(grid)?;
    fs::write(path, content)?;
    Ok(())
}

/// Write a Grid's expressions as a pretty-printed JSON object.
///
/// Every cell is written, including ones with an empty expression, so a
/// save/load round trip reproduces the same set of addresses.
pub fn write_sheet_content(grid: &Grid) -> Result<String> {
    let expressions: BTreeMap<String, String> = grid
        .iter()
        .map(|entry| (entry.key().to_string(), entry.value().expression.clone()))
        .collect();
    let mut content = serde_json::to_string_pretty(&expressions)?;
    content.push('\n');
    Ok(content)
}
