/*!
 * Output adapters for assembled documents
 */

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::clipboard::Clipboard;
use crate::error::{ExportError, Result};
use crate::writer::ExportDocument;

/// Destination for an assembled document
pub trait ExportSink {
    /// Deliver the document
    fn export(&self, document: &ExportDocument) -> Result<()>;

    /// Status line reported after a successful export of `files` files
    fn success_message(&self, files: usize) -> String;
}

/// Writes the document bytes to a file, replacing it
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ExportSink for FileSink {
    fn export(&self, document: &ExportDocument) -> Result<()> {
        let write_err = |source| ExportError::Write {
            path: self.path.clone(),
            source,
        };

        let file = File::create(&self.path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(document.as_bytes()).map_err(write_err)?;
        writer.flush().map_err(write_err)?;

        log::info!(
            "Wrote {} bytes to {}",
            document.len(),
            self.path.display()
        );
        Ok(())
    }

    fn success_message(&self, files: usize) -> String {
        format!("Saved {} files to {}", files, self.path.display())
    }
}

/// Places the document on a clipboard as text
pub struct ClipboardSink<C: Clipboard> {
    clipboard: C,
}

impl<C: Clipboard> ClipboardSink<C> {
    pub fn new(clipboard: C) -> Self {
        Self { clipboard }
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }
}

impl<C: Clipboard> ExportSink for ClipboardSink<C> {
    fn export(&self, document: &ExportDocument) -> Result<()> {
        self.clipboard.set_text(&document.to_text())?;
        Ok(())
    }

    fn success_message(&self, files: usize) -> String {
        format!("Copied {} files to clipboard", files)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;

    use crate::clipboard::{self, ClipboardError};
    use crate::selection::ScanSession;
    use crate::types::FileRecord;
    use crate::writer::MarkdownWriter;
    use tempfile::tempdir;

    /// Clipboard double that remembers what it was given
    #[derive(Default)]
    pub(crate) struct RecordingClipboard {
        pub contents: RefCell<Option<String>>,
        pub fail: bool,
    }

    impl Clipboard for RecordingClipboard {
        fn set_text(&self, text: &str) -> clipboard::Result<()> {
            if self.fail {
                return Err(ClipboardError::NoClipboardFound);
            }
            *self.contents.borrow_mut() = Some(text.to_string());
            Ok(())
        }
    }

    fn document(dir: &Path) -> ExportDocument {
        let path = dir.join("main.rs");
        fs::write(&path, "fn main() {}").unwrap();
        let session = ScanSession::new(dir, vec![FileRecord::new("main.rs", path)], 0);
        MarkdownWriter::new().assemble(&session, dir).unwrap()
    }

    #[test]
    fn test_file_sink_writes_bytes() {
        let dir = tempdir().unwrap();
        let doc = document(dir.path());
        let out = dir.path().join("out.md");

        let sink = FileSink::new(&out);
        sink.export(&doc).unwrap();
        assert_eq!(fs::read(&out).unwrap(), doc.as_bytes());
        assert_eq!(
            sink.success_message(1),
            format!("Saved 1 files to {}", out.display())
        );
    }

    #[test]
    fn test_file_sink_reports_unwritable_destination() {
        let dir = tempdir().unwrap();
        let doc = document(dir.path());
        let sink = FileSink::new(dir.path().join("missing").join("out.md"));

        let err = sink.export(&doc).unwrap_err();
        assert!(matches!(err, ExportError::Write { .. }));
    }

    #[test]
    fn test_clipboard_sink() {
        let dir = tempdir().unwrap();
        let doc = document(dir.path());
        let sink = ClipboardSink::new(RecordingClipboard::default());

        sink.export(&doc).unwrap();
        assert_eq!(
            sink.clipboard().contents.borrow().as_deref(),
            Some("- main.rs\n```rs\nfn main() {}\n```\n\n")
        );
        assert_eq!(sink.success_message(1), "Copied 1 files to clipboard");
    }

    #[test]
    fn test_clipboard_sink_failure() {
        let dir = tempdir().unwrap();
        let doc = document(dir.path());
        let sink = ClipboardSink::new(RecordingClipboard {
            fail: true,
            ..Default::default()
        });

        let err = sink.export(&doc).unwrap_err();
        assert!(matches!(err, ExportError::Clipboard(_)));
    }
}
