//! Header-anchored evaluation table.
//!
//! Used for reports without item markers. The data region starts after a
//! header naming "Category" and "Item Evaluated" and ends at the table
//! delimiter. Each row is read as category, cross-referenced name,
//! observation and a colored recommendation cell; the category carries
//! over to following rows until a new one appears.

use health_report_core::Item;
use tracing::debug;

use super::{Extraction, ExtractionStrategy};
use crate::parser::classify::{TagLine, classify_tag_line};
use crate::parser::util;

const HEADER_LABELS: [&str; 4] = [
    "Category",
    "Item Evaluated",
    "Observed Result",
    "Recommendation",
];

/// Lines searched for the rest of the header after a "Category" label.
const HEADER_WINDOW: usize = 4;

pub struct TableStrategy;

impl ExtractionStrategy for TableStrategy {
    fn name(&self) -> &'static str {
        "table"
    }

    fn scan(&self, lines: &[String]) -> Extraction {
        let Some(data_start) = find_data_start(lines) else {
            return Extraction::default();
        };

        let mut items = Vec::new();
        let mut rows = RowState::default();
        let mut discarded = 0usize;

        for line in &lines[data_start..] {
            let trimmed = line.trim();
            if util::is_table_delimiter(trimmed) {
                break;
            }
            if trimmed.is_empty() || util::is_comment(trimmed) {
                continue;
            }

            match classify_tag_line(trimmed) {
                Some(TagLine::Reset) => {
                    rows.in_status_cell = false;
                    let stripped = util::strip_tags(trimmed);
                    let rest = util::cell_text(&stripped);
                    if !rest.is_empty() {
                        rows.cell(rest);
                    }
                }
                Some(tag) => match rows.close_row(tag) {
                    Some(Some(item)) => items.push(item),
                    Some(None) => discarded += 1,
                    None => {}
                },
                None => {
                    // Continuation lines of the recommendation cell.
                    if rows.in_status_cell && !util::starts_cell(trimmed) {
                        continue;
                    }
                    rows.in_status_cell = false;
                    if let Some(name) = util::cross_reference(trimmed) {
                        rows.name = Some(name);
                        rows.observation = None;
                    } else if let Some(text) = util::plain_cell(trimmed) {
                        rows.cell(text);
                    }
                }
            }
        }

        if discarded > 0 {
            debug!(discarded, "dropped table rows without a resolvable status");
        }
        Extraction { items, discarded }
    }
}

#[derive(Debug, Default)]
struct RowState {
    category: Option<String>,
    name: Option<String>,
    observation: Option<String>,
    in_status_cell: bool,
}

impl RowState {
    fn cell(&mut self, text: &str) {
        if self.name.is_none() {
            self.category = Some(text.to_string());
        } else if self.observation.is_none() {
            self.observation = Some(text.to_string());
        }
    }

    /// Ends the current row at a color tag. Returns `None` when no row was
    /// open, `Some(None)` when the row's color is not a data color.
    fn close_row(&mut self, tag: TagLine) -> Option<Option<Item>> {
        self.in_status_cell = true;
        let name = self.name.take()?;
        let observation = self.observation.take().unwrap_or_default();
        Some(tag.data_color().map(|color| {
            Item::new(name, color)
                .with_category(self.category.clone().unwrap_or_default())
                .with_observation(observation)
        }))
    }
}

/// Returns the index of the first line after the table header.
fn find_data_start(lines: &[String]) -> Option<usize> {
    lines.iter().enumerate().find_map(|(index, line)| {
        if !line.contains(HEADER_LABELS[0]) {
            return None;
        }
        let window = &lines[index..lines.len().min(index + HEADER_WINDOW)];
        if !window.iter().any(|l| l.contains(HEADER_LABELS[1])) {
            return None;
        }
        let last_label = window
            .iter()
            .rposition(|l| HEADER_LABELS.iter().any(|label| l.contains(label)))
            .unwrap_or(0);
        Some(index + last_label + 1)
    })
}
