//! Tag-line classification.
//!
//! A line carrying a cell color tag is either a real evaluation result, a
//! row of the report's color legend, or a tag whose color is outside the
//! palette. Reset tags (`{set:cellbgcolor!}`) open a new row.

use health_report_core::ColorTag;

use super::util;

/// Classification of a line that carries a cell tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagLine {
    /// Color tag that resolves to a status on a non-legend line.
    Data(ColorTag),
    /// Color tag on a legend row ("Indicates Changes Required", ...).
    Legend(ColorTag),
    /// Color tag whose code is not in the palette.
    Unresolved,
    /// `{set:cellbgcolor!}` reset tag.
    Reset,
}

impl TagLine {
    /// Returns the color when the line is a real evaluation result.
    pub fn data_color(self) -> Option<ColorTag> {
        match self {
            Self::Data(color) => Some(color),
            _ => None,
        }
    }
}

/// Classifies `line`, returning `None` when it carries no cell tag.
///
/// A color tag takes precedence over a reset tag on the same line.
pub fn classify_tag_line(line: &str) -> Option<TagLine> {
    if let Some(code) = util::color_tag_code(line) {
        let Some(color) = ColorTag::from_hex(code) else {
            return Some(TagLine::Unresolved);
        };
        if is_legend_row(line, color) {
            return Some(TagLine::Legend(color));
        }
        return Some(TagLine::Data(color));
    }
    util::is_reset_tag(line).then_some(TagLine::Reset)
}

/// Returns `true` if `line` contains one of the legend phrases for `color`
/// (compared case-insensitively).
pub fn is_legend_row(line: &str, color: ColorTag) -> bool {
    let lowered = line.to_lowercase();
    color
        .legend_phrases()
        .iter()
        .any(|phrase| lowered.contains(&phrase.to_lowercase()))
}
