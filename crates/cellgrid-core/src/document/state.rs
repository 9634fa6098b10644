use crate::error::Result;
use cellgrid_engine::engine::Grid;
use std::path::PathBuf;

/// UI-agnostic document state for the spreadsheet.
///
/// The document exclusively owns every cell. The dependency graph is not a
/// separate structure: each cell carries its own `depends_on` edges.
pub struct Document {
    /// The spreadsheet grid
    pub grid: Grid,
    /// Current file path
    pub file_path: Option<PathBuf>,
    /// Whether the grid has been modified since the last save or load
    pub modified: bool,
}

impl Document {
    /// Create a new, empty document.
    ///
    /// This constructor is side-effect free: it does not touch the filesystem.
    pub fn new() -> Self {
        Document {
            grid: Grid::new(),
            file_path: None,
            modified: false,
        }
    }

    /// Create a new document and load a file if provided.
    /// A path that does not exist yet is remembered for the next save.
    pub fn with_file(path: Option<PathBuf>) -> Result<Self> {
        let mut doc = Self::new();
        if let Some(p) = path {
            doc.load_from_file(&p)?;
            doc.file_path = Some(p);
            doc.modified = false;
        }
        Ok(doc)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
