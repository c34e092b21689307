/*!
 * codebase-exporter - Export selected project files as one Markdown document
 *
 * This library scans a project directory for the files of a project type,
 * keeps a per-file selection and assembles the selected files into a single
 * Markdown document with one fenced code block per file.
 */

pub mod clipboard;
pub mod config;
pub mod error;
pub mod export;
pub mod exporter;
pub mod project;
pub mod recent;
pub mod report;
pub mod scanner;
pub mod selection;
pub mod types;
pub mod utils;
pub mod writer;

#[cfg(test)]
mod tests;

// Re-export main components for easier access
pub use config::{Args, Config};
pub use error::{ExportError, Result};
pub use export::{ClipboardSink, ExportSink, FileSink};
pub use exporter::{ExportOutcome, Exporter};
pub use project::{ProjectCatalog, ProjectType, BUILTIN_CATALOG};
pub use recent::RecentDirectoryStore;
pub use report::{ReportFormat, Reporter, SelectionReport};
pub use scanner::Scanner;
pub use selection::ScanSession;
pub use types::FileRecord;
pub use writer::{ExportDocument, MarkdownWriter};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
