/*!
 * Markdown document assembly for selected files
 *
 * Each included file becomes one section:
 *
 * ````text
 * - <relative/path>
 * ```<extension>
 * <raw file bytes>
 * ```
 *
 * ````
 */

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use crate::error::{ExportError, Result};
use crate::selection::ScanSession;
use crate::types::FileRecord;
use crate::utils::language_tag;

/// Body emitted in place of a file's content when it cannot be read
pub const READ_ERROR_PLACEHOLDER: &str = "Error reading file content\n";

/// Closes a section's fence and leaves a blank separator line
const SECTION_END: &[u8] = b"\n```\n\n";

/// An assembled export, always derived fresh from a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportDocument {
    content: Vec<u8>,
    file_count: usize,
}

impl ExportDocument {
    /// Raw document bytes, file contents embedded verbatim
    pub fn as_bytes(&self) -> &[u8] {
        &self.content
    }

    /// Document as text; invalid UTF-8 in embedded files is replaced
    pub fn to_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of file sections in the document
    pub fn file_count(&self) -> usize {
        self.file_count
    }
}

/// Builds Markdown documents from a session's included records
#[derive(Debug, Clone, Default)]
pub struct MarkdownWriter;

impl MarkdownWriter {
    /// Create a new writer
    pub fn new() -> Self {
        Self
    }

    /// Assemble every included record of `session`, paths relative to `root`.
    ///
    /// Unreadable files still get a section, with a placeholder body. The
    /// only failure is running out of memory for the final buffer.
    pub fn assemble(&self, session: &ScanSession, root: &Path) -> Result<ExportDocument> {
        let mut segments: Vec<Cow<'static, [u8]>> = Vec::new();
        let mut file_count = 0;

        for record in session.included() {
            self.push_section(record, root, &mut segments);
            file_count += 1;
        }

        let total: usize = segments.iter().map(|s| s.len()).sum();
        let mut content = Vec::new();
        content.try_reserve_exact(total).map_err(|e| {
            ExportError::ContentGenerationFailed(format!(
                "cannot allocate {} bytes: {}",
                total, e
            ))
        })?;
        for segment in &segments {
            content.extend_from_slice(segment);
        }

        log::debug!("Assembled {} files into {} bytes", file_count, content.len());

        Ok(ExportDocument {
            content,
            file_count,
        })
    }

    fn push_section(
        &self,
        record: &FileRecord,
        root: &Path,
        segments: &mut Vec<Cow<'static, [u8]>>,
    ) {
        let header = format!(
            "- {}\n```{}\n",
            record.relative_path(root),
            language_tag(&record.display_name)
        );
        segments.push(Cow::Owned(header.into_bytes()));

        match fs::read(&record.path) {
            Ok(bytes) => segments.push(Cow::Owned(bytes)),
            Err(e) => {
                log::warn!("Cannot read {}: {}", record.path.display(), e);
                segments.push(Cow::Borrowed(READ_ERROR_PLACEHOLDER.as_bytes()));
            }
        }

        segments.push(Cow::Borrowed(SECTION_END));
    }
}
