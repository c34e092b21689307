/*!
 * Scan session and per-file selection state
 *
 * A session is replaced wholesale by every scan. Selection counts are always
 * recomputed from the records; there is no separate counter.
 */

use std::path::PathBuf;

use crate::types::FileRecord;

/// The records discovered by one traversal of one root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSession {
    /// Root the traversal started from
    pub root: PathBuf,
    /// Records in discovery order
    records: Vec<FileRecord>,
    /// Matching files dropped because the cap was reached
    pub dropped: usize,
}

impl ScanSession {
    /// Create a session from already discovered records
    pub fn new(root: impl Into<PathBuf>, records: Vec<FileRecord>, dropped: usize) -> Self {
        Self {
            root: root.into(),
            records,
            dropped,
        }
    }

    /// An empty session, used after a failed scan
    pub fn empty(root: impl Into<PathBuf>) -> Self {
        Self::new(root, Vec::new(), 0)
    }

    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FileRecord> {
        self.records.get(index)
    }

    /// Set one record's flag; returns false if no record has that index
    pub fn set_included(&mut self, index: usize, included: bool) -> bool {
        match self.records.get_mut(index) {
            Some(record) => {
                record.included = included;
                true
            }
            None => false,
        }
    }

    /// Flip one record's flag and return the new value
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let record = self.records.get_mut(index)?;
        record.included = !record.included;
        Some(record.included)
    }

    /// Set the flag on every record whose relative path or name equals `name`.
    /// Returns the number of records touched.
    pub fn set_included_by_name(&mut self, name: &str, included: bool) -> usize {
        let root = self.root.clone();
        let mut touched = 0;
        for record in &mut self.records {
            if record.display_name == name || record.relative_path(&root) == name {
                record.included = included;
                touched += 1;
            }
        }
        touched
    }

    pub fn select_all(&mut self) {
        self.set_all(true);
    }

    pub fn clear_all(&mut self) {
        self.set_all(false);
    }

    fn set_all(&mut self, included: bool) {
        for record in &mut self.records {
            record.included = included;
        }
    }

    /// Included records, in discovery order
    pub fn included(&self) -> impl Iterator<Item = &FileRecord> {
        self.records.iter().filter(|r| r.included)
    }

    pub fn included_count(&self) -> usize {
        self.included().count()
    }

    /// `(display_name, included)` pairs for rendering checkboxes
    pub fn entries(&self) -> impl Iterator<Item = (&str, bool)> {
        self.records
            .iter()
            .map(|r| (r.display_name.as_str(), r.included))
    }
}
