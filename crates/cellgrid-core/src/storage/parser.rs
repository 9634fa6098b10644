//! Parser for the JSON sheet format.
//!
//! A sheet is a single JSON object mapping cell addresses to raw expression
//! strings. Values are never stored; they are recomputed after loading.

use crate::error::{CellgridError, Result};
use cellgrid_engine::engine::CellRef;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read and parse a sheet file.
///
/// Returns `Ok(None)` when the file does not exist or holds a JSON `null`,
/// both of which leave the current document untouched.
pub fn parse_sheet(path: &Path) -> Result<Option<Vec<(CellRef, String)>>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    parse_sheet_content(&content)
}

/// Parse sheet content from a string. Addresses are canonicalized.
pub fn parse_sheet_content(content: &str) -> Result<Option<Vec<(CellRef, String)>>> {
    let parsed: Option<BTreeMap<String, String>> = serde_json::from_str(content)?;
    let Some(entries) = parsed else {
        return Ok(None);
    };

    let mut cells = Vec::with_capacity(entries.len());
    for (address, expression) in entries {
        let cell_ref = CellRef::from_str(address.trim())
            .ok_or_else(|| CellgridError::InvalidAddress(address.clone()))?;
        cells.push((cell_ref, expression));
    }
    Ok(Some(cells))
}
