//! Raw report text, normalized into lines.
//!
//! Line endings are normalized (`\r\n` and lone `\r` become `\n`) and a
//! leading byte-order mark is dropped, so every later stage works on the
//! same line indices regardless of where the report was authored.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{ParseError, Result};
use crate::parser::Section;

const BOM: char = '\u{feff}';

/// An immutable, line-split report document.
///
/// # Examples
///
/// ```
/// use health_report_parser::RawDocument;
///
/// let document = RawDocument::from_text("\u{feff}= Title\r\n== Summary\r\n");
/// assert_eq!(document.lines(), ["= Title", "== Summary"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDocument {
    lines: Vec<String>,
}

impl RawDocument {
    /// Builds a document from text in any line-ending convention.
    pub fn from_text(text: &str) -> Self {
        let text = text.strip_prefix(BOM).unwrap_or(text);
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        Self {
            lines: normalized.lines().map(str::to_string).collect(),
        }
    }

    /// Reads a document from disk.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ParseError::InputAccess {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "loaded report");
        Ok(Self::from_text(&String::from_utf8_lossy(&bytes)))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the lines covered by `section`, clamped to the document.
    pub fn section_lines(&self, section: &Section) -> &[String] {
        let end = section.end.min(self.lines.len());
        let start = section.start.min(end);
        &self.lines[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SectionKind;

    #[test]
    fn test_line_endings_are_normalized() {
        let document = RawDocument::from_text("a\r\nb\rc\nd");
        assert_eq!(document.lines(), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(RawDocument::from_text("").is_empty());
    }

    #[test]
    fn test_section_lines_are_clamped() {
        let document = RawDocument::from_text("a\nb\nc");
        let section = Section {
            start: 1,
            end: 10,
            kind: SectionKind::Summary,
        };
        assert_eq!(document.section_lines(&section), ["b", "c"]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = RawDocument::load("/definitely/not/here.adoc").unwrap_err();
        assert!(matches!(err, ParseError::InputAccess { .. }));
        assert!(err.to_string().contains("/definitely/not/here.adoc"));
    }

    #[test]
    fn test_load_replaces_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.adoc");
        std::fs::write(&path, b"ok\n\xff\xfe bad\n").unwrap();
        let document = RawDocument::load(&path).unwrap();
        assert_eq!(document.len(), 2);
        assert_eq!(document.lines()[0], "ok");
    }
}
