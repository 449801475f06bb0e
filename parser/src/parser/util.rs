//! Shared line helpers for AsciiDoc table cells, markers and attributes.

use regex::Regex;
use std::sync::LazyLock;

// SAFETY: These regexes are compile-time constants and are validated by tests.
static COLOR_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{set:cellbgcolor:\s*(#?[0-9A-Za-z]+)\s*\}").expect("static regex must compile")
});
static RESET_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{set:cellbgcolor!\}").expect("static regex must compile"));
static XREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<<([^<>]+)>>").expect("static regex must compile"));
// Optional span/duplication, alignment and style before the cell separator,
// e.g. `|`, `a|`, `^|`, `2+|`, `.3+^.>s|`.
static CELL_SPEC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:\d+[+*])?(?:\.\d+\+)?[<^>]?(?:\.[<^>])?[adehlmsv]?\|")
        .expect("static regex must compile")
});

const ITEM_START: &str = "ITEM START";
const ITEM_END: &str = "ITEM END";

/// Returns the raw code of the first color tag on the line
/// (e.g. `#FF0000` for `{set:cellbgcolor:#FF0000}`).
pub fn color_tag_code(line: &str) -> Option<&str> {
    COLOR_TAG_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Returns `true` if the line carries the `{set:cellbgcolor!}` reset tag.
pub fn is_reset_tag(line: &str) -> bool {
    RESET_TAG_RE.is_match(line)
}

/// Removes color and reset tags from the line.
pub fn strip_tags(line: &str) -> String {
    let without_colors = COLOR_TAG_RE.replace_all(line, "");
    RESET_TAG_RE.replace_all(&without_colors, "").into_owned()
}

/// Returns the trimmed text inside the first `<<name>>` token.
pub fn cross_reference(line: &str) -> Option<String> {
    XREF_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Returns the cell text of a line: trimmed, with one leading cell
/// separator and its specifier (`a|`, `^|`, `2+|`) removed.
pub fn cell_text(line: &str) -> &str {
    let trimmed = line.trim();
    match CELL_SPEC_RE.find(trimmed) {
        Some(spec) => trimmed[spec.end()..].trim(),
        None => trimmed,
    }
}

/// Returns `true` if the line starts a new table cell.
pub fn starts_cell(line: &str) -> bool {
    CELL_SPEC_RE.is_match(line)
}

/// Returns `true` for AsciiDoc line comments.
pub fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with("//")
}

/// Returns `true` for the comment line opening an item block.
pub fn is_item_start(line: &str) -> bool {
    is_comment(line) && line.contains(ITEM_START)
}

/// Returns `true` for the comment line closing an item block.
pub fn is_item_end(line: &str) -> bool {
    is_comment(line) && line.contains(ITEM_END)
}

/// Returns `true` for table delimiter lines (`|===`).
pub fn is_table_delimiter(line: &str) -> bool {
    line.trim_start().starts_with("|===")
}

/// Parses an AsciiDoc section heading (`== Title`) into its level and title.
///
/// Lines made only of `=` are block delimiters, not headings.
pub fn heading(line: &str) -> Option<(usize, &str)> {
    let trimmed = line.trim();
    let level = trimmed.chars().take_while(|ch| *ch == '=').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &trimmed[level..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let title = rest.trim();
    if title.is_empty() {
        return None;
    }
    Some((level, title))
}

/// Returns the plain cell text of a line when it is neither structural
/// (comment, delimiter, tag) nor a cross-reference.
pub fn plain_cell(line: &str) -> Option<&str> {
    if is_comment(line)
        || is_table_delimiter(line)
        || is_reset_tag(line)
        || color_tag_code(line).is_some()
        || XREF_RE.is_match(line)
    {
        return None;
    }
    let text = cell_text(line);
    (!text.is_empty()).then_some(text)
}
