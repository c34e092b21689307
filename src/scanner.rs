/*!
 * Directory scanning with extension filtering and a file cap
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use walkdir::{DirEntry, WalkDir};

use crate::error::{ExportError, Result};
use crate::project::ProjectType;
use crate::selection::ScanSession;
use crate::types::FileRecord;
use crate::utils::is_hidden;

/// Default maximum number of records a scan keeps
pub const DEFAULT_MAX_FILES: usize = 500;

/// What a directory entry turned out to be once links are resolved
enum EntryKind {
    File,
    Directory,
    Skip,
}

/// Running totals shared across one traversal
struct ScanBudget {
    remaining: usize,
    dropped: usize,
}

/// Scanner for project directories
pub struct Scanner {
    /// Cap on the number of records per session
    max_files: usize,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(max_files: usize, progress: Arc<ProgressBar>) -> Self {
        Self {
            max_files,
            progress,
        }
    }

    pub fn max_files(&self) -> usize {
        self.max_files
    }

    /// Scan `root` and return a fresh session.
    ///
    /// With `active` set, only files whose extension belongs to it are kept;
    /// with `None` every regular file is kept. Hidden entries are skipped.
    pub fn scan(&self, root: &Path, active: Option<&ProjectType>) -> Result<ScanSession> {
        // Fail early with a proper error if the root itself cannot be listed
        fs::read_dir(root).map_err(|source| ExportError::DirectoryUnreadable {
            path: root.to_path_buf(),
            source,
        })?;

        log::info!(
            "Scanning {} ({})",
            root.display(),
            active.map_or("all files", |t| t.name.as_str())
        );

        let mut budget = ScanBudget {
            remaining: self.max_files,
            dropped: 0,
        };
        let records = self.scan_directory(root, active, &mut budget);

        if budget.dropped > 0 {
            log::warn!(
                "Maximum file limit ({}) reached, {} matching files skipped",
                self.max_files,
                budget.dropped
            );
        }

        Ok(ScanSession::new(root, records, budget.dropped))
    }

    /// Collect records for one directory: its own files first, then each
    /// subdirectory in turn.
    fn scan_directory(
        &self,
        dir: &Path,
        active: Option<&ProjectType>,
        budget: &mut ScanBudget,
    ) -> Vec<FileRecord> {
        let mut records = Vec::new();
        let mut subdirs: Vec<PathBuf> = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping entry in {}: {}", dir.display(), e);
                    continue;
                }
            };
            if is_hidden(&entry.file_name().to_string_lossy()) {
                continue;
            }

            match self.classify(&entry) {
                EntryKind::Directory => subdirs.push(entry.into_path()),
                EntryKind::File => {
                    let name = entry.file_name().to_string_lossy().to_string();
                    if !active.map_or(true, |t| t.matches(&name)) {
                        continue;
                    }
                    if budget.remaining == 0 {
                        budget.dropped += 1;
                        continue;
                    }
                    budget.remaining -= 1;
                    self.progress.inc(1);
                    self.progress.set_message(format!("Found: {}", name));
                    records.push(FileRecord::new(name, entry.into_path()));
                }
                EntryKind::Skip => {}
            }
        }

        for subdir in subdirs {
            records.extend(self.scan_directory(&subdir, active, budget));
        }

        records
    }

    /// Resolve an entry to a file or directory. Links to files count as
    /// files; links to directories are not followed.
    fn classify(&self, entry: &DirEntry) -> EntryKind {
        let file_type = entry.file_type();

        if file_type.is_dir() {
            return EntryKind::Directory;
        }
        if file_type.is_file() {
            return EntryKind::File;
        }
        if file_type.is_symlink() {
            return match fs::metadata(entry.path()) {
                Ok(meta) if meta.is_file() => EntryKind::File,
                Ok(meta) if meta.is_dir() => {
                    log::debug!("Not following directory link {}", entry.path().display());
                    EntryKind::Skip
                }
                Ok(_) => EntryKind::Skip,
                Err(e) => {
                    log::warn!("Cannot stat {}: {}", entry.path().display(), e);
                    EntryKind::Skip
                }
            };
        }

        EntryKind::Skip
    }
}
