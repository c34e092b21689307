/*!
 * Event-facing controller tying scanning, selection and export together
 *
 * A presentation layer drives an [`Exporter`] with user actions and renders
 * what it exposes: the checkbox entries, the status text and documents.
 */

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::export::ExportSink;
use crate::project::{ProjectCatalog, ProjectType};
use crate::recent::RecentDirectoryStore;
use crate::scanner::Scanner;
use crate::selection::ScanSession;
use crate::writer::{ExportDocument, MarkdownWriter};

/// How an export attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The document reached the sink with this many files
    Exported(usize),
    /// The sink received an empty document because nothing was selected
    NothingSelected,
}

/// Holds the single scan session and everything that acts on it
pub struct Exporter {
    catalog: ProjectCatalog,
    scanner: Scanner,
    writer: MarkdownWriter,
    recent: Option<RecentDirectoryStore>,
    root: PathBuf,
    project_type: Option<usize>,
    session: ScanSession,
    status: String,
}

impl Exporter {
    /// Create an exporter with no root yet
    pub fn new(
        catalog: ProjectCatalog,
        scanner: Scanner,
        recent: Option<RecentDirectoryStore>,
    ) -> Self {
        Self {
            catalog,
            scanner,
            writer: MarkdownWriter::new(),
            recent,
            root: PathBuf::new(),
            project_type: None,
            session: ScanSession::default(),
            status: "Browse to select a project directory.".to_string(),
        }
    }

    /// Set the initial project type without scanning
    pub fn with_project_type(mut self, index: Option<usize>) -> Self {
        self.project_type = index.filter(|&i| i < self.catalog.len());
        self
    }

    pub fn catalog(&self) -> &ProjectCatalog {
        &self.catalog
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn project_type(&self) -> Option<usize> {
        self.project_type
    }

    /// The active type's profile, if any
    pub fn active_type(&self) -> Option<&ProjectType> {
        self.project_type.and_then(|i| self.catalog.get(i))
    }

    pub fn session(&self) -> &ScanSession {
        &self.session
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Guess the project type of `root` from its hallmark files
    pub fn detect(&self, root: &Path) -> Option<usize> {
        self.catalog.detect(root)
    }

    /// Update the root text without rescanning
    pub fn set_root_text(&mut self, root: impl Into<PathBuf>) {
        self.root = root.into();
    }

    /// A folder was picked: adopt it, remember it and rescan.
    ///
    /// The root is resolved to an absolute path first so the remembered
    /// directory does not depend on the working directory. A root that
    /// cannot be resolved is kept as given and not remembered.
    pub fn open_folder(&mut self, root: impl Into<PathBuf>) {
        let root = root.into();
        match fs::canonicalize(&root) {
            Ok(resolved) => {
                if let Some(store) = &self.recent {
                    store.write(&resolved);
                }
                self.root = resolved;
            }
            Err(e) => {
                log::debug!("Cannot resolve {}: {}", root.display(), e);
                self.root = root;
            }
        }
        self.rescan();
    }

    /// Change the active project type (or clear it) and rescan
    pub fn set_project_type(&mut self, index: Option<usize>) {
        self.project_type = index.filter(|&i| i < self.catalog.len());
        self.rescan();
    }

    /// Discard the current session and scan the root again
    pub fn rescan(&mut self) {
        let scanned = {
            let active = self.active_type();
            self.scanner.scan(&self.root, active)
        };

        match scanned {
            Ok(session) => {
                self.status = if session.is_empty() {
                    "No allowed files found in the selected directory.".to_string()
                } else if session.dropped > 0 {
                    format!(
                        "Loaded {} files ({} skipped, limit {}). Ready.",
                        session.len(),
                        session.dropped,
                        self.scanner.max_files()
                    )
                } else {
                    format!("Loaded {} files. Ready.", session.len())
                };
                self.session = session;
            }
            Err(e) => {
                log::warn!("Scan failed: {}", e);
                self.status = e.to_string();
                self.session = ScanSession::empty(&self.root);
            }
        }
    }

    /// Per-file toggle event; returns false for an unknown index
    pub fn set_included(&mut self, index: usize, included: bool) -> bool {
        self.session.set_included(index, included)
    }

    /// Set the flag on records matching a relative path or file name
    pub fn set_included_by_name(&mut self, name: &str, included: bool) -> usize {
        self.session.set_included_by_name(name, included)
    }

    pub fn select_all(&mut self) {
        self.session.select_all();
    }

    pub fn clear_all(&mut self) {
        self.session.clear_all();
    }

    /// `(display_name, included)` pairs in discovery order
    pub fn entries(&self) -> Vec<(String, bool)> {
        self.session
            .entries()
            .map(|(name, included)| (name.to_string(), included))
            .collect()
    }

    /// Assemble the current selection against the current root
    pub fn document(&self) -> Result<ExportDocument> {
        self.writer.assemble(&self.session, &self.root)
    }

    /// Assemble and hand the document to `sink`, updating the status text
    pub fn export(&mut self, sink: &dyn ExportSink) -> Result<ExportOutcome> {
        let document = match self.document() {
            Ok(document) => document,
            Err(e) => {
                self.status = "Failed to generate markdown content".to_string();
                return Err(e);
            }
        };

        if let Err(e) = sink.export(&document) {
            self.status = e.to_string();
            return Err(e);
        }

        let files = document.file_count();
        if files == 0 {
            self.status = "No files were selected".to_string();
            Ok(ExportOutcome::NothingSelected)
        } else {
            self.status = sink.success_message(files);
            Ok(ExportOutcome::Exported(files))
        }
    }
}
