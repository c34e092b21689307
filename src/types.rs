/*!
 * Core types and data structures for the exporter
 */

use std::path::{Path, PathBuf};

/// One discovered file and whether it takes part in the export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Bare file name, shown next to the checkbox
    pub display_name: String,
    /// Path as discovered, i.e. the scan root joined with each level
    pub path: PathBuf,
    /// Inclusion flag, true on discovery
    pub included: bool,
}

impl FileRecord {
    /// Create a record for a freshly discovered file
    pub fn new(display_name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            display_name: display_name.into(),
            path: path.into(),
            included: true,
        }
    }

    /// Path relative to `root`, or the bare name when the file is not under it
    pub fn relative_path(&self, root: &Path) -> String {
        match self.path.strip_prefix(root) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel.to_string_lossy().to_string(),
            _ => self.display_name.clone(),
        }
    }
}
