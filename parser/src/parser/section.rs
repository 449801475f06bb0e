//! Summary section location.
//!
//! Reports place their evaluation table under a heading titled exactly
//! `Summary`. The section runs until the next heading at the same or a
//! shallower level. Documents without such a heading are scanned whole.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::util;

const SUMMARY_TITLE: &str = "Summary";

/// How the scanned region was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// A `Summary` heading was found.
    Summary,
    /// No `Summary` heading; the whole document is scanned (degraded mode).
    WholeDocument,
}

/// Half-open line range `[start, end)` that extraction scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub start: usize,
    pub end: usize,
    pub kind: SectionKind,
}

impl Section {
    /// Section covering every line of a document of `len` lines.
    pub fn whole_document(len: usize) -> Self {
        Self {
            start: 0,
            end: len,
            kind: SectionKind::WholeDocument,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_degraded(&self) -> bool {
        self.kind == SectionKind::WholeDocument
    }
}

/// Locates the summary section in `lines`.
///
/// The section starts on the line after the first `Summary` heading (any
/// level 1 to 6) and ends before the next heading whose level is the same
/// or shallower, unless that heading is itself a `Summary` heading.
pub fn locate_summary(lines: &[String]) -> Section {
    let Some((heading_index, level)) = lines.iter().enumerate().find_map(|(index, line)| {
        summary_heading_level(line).map(|level| (index, level))
    }) else {
        debug!(lines = lines.len(), "no summary heading, scanning whole document");
        return Section::whole_document(lines.len());
    };

    let start = heading_index + 1;
    let end = lines[start..]
        .iter()
        .position(|line| {
            util::heading(line).is_some_and(|(next_level, _)| {
                next_level <= level && summary_heading_level(line).is_none()
            })
        })
        .map_or(lines.len(), |offset| start + offset);

    debug!(start, end, level, "located summary section");
    Section {
        start,
        end,
        kind: SectionKind::Summary,
    }
}

fn summary_heading_level(line: &str) -> Option<usize> {
    util::heading(line)
        .filter(|(_, title)| *title == SUMMARY_TITLE)
        .map(|(level, _)| level)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn test_section_ends_at_same_level_heading() {
        let doc = lines("= Report\n== Summary\nrow 1\n=== Detail\nrow 2\n== Next\nafter");
        let section = locate_summary(&doc);
        assert_eq!(section.kind, SectionKind::Summary);
        assert_eq!((section.start, section.end), (2, 5));
    }

    #[test]
    fn test_section_runs_to_end_of_document() {
        let doc = lines("== Summary\nrow 1\nrow 2");
        let section = locate_summary(&doc);
        assert_eq!((section.start, section.end), (1, 3));
    }

    #[test]
    fn test_block_delimiters_are_not_headings() {
        let doc = lines("== Summary\n====\nrow\n====\n== Other");
        let section = locate_summary(&doc);
        assert_eq!((section.start, section.end), (1, 4));
    }

    #[test]
    fn test_title_must_match_exactly() {
        let doc = lines("== Summary of Findings\nrow");
        assert!(locate_summary(&doc).is_degraded());

        let doc = lines("== summary\nrow");
        assert!(locate_summary(&doc).is_degraded());
    }

    #[test]
    fn test_missing_summary_scans_whole_document() {
        let doc = lines("= Title\nrow 1\nrow 2");
        assert_eq!(locate_summary(&doc), Section::whole_document(3));
    }

    #[test]
    fn test_empty_summary_section() {
        let doc = lines("== Summary\n== Next");
        let section = locate_summary(&doc);
        assert_eq!(section.kind, SectionKind::Summary);
        assert!(section.is_empty());
    }
}
