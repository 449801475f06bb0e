//! Category descriptions.
//!
//! A description written by the report author under the category's heading
//! is preferred. Otherwise a sentence is generated from the score band.

use serde::{Deserialize, Serialize};

use health_report_core::Category;

use super::scoring::names_category;
use super::util;

/// Lines searched after a category heading for authored prose.
const DESCRIPTION_LOOKAHEAD: usize = 5;

/// Where a description came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptionSource {
    Authored,
    Generated,
}

/// Returns a sentence describing a category from its score band.
///
/// Always non-empty.
pub fn generate_description(label: &str, score: u8) -> String {
    match score {
        90..=u8::MAX => format!("{label} is excellent with best practices in place."),
        80..=89 => format!("{label} is well-configured with only minor improvements needed."),
        70..=79 => {
            format!("{label} meets most requirements but has some areas that could be improved.")
        }
        60..=69 => format!("{label} has several areas that need attention to meet best practices."),
        _ => format!("{label} requires significant improvements to ensure stability and security."),
    }
}

/// Finds the first prose line following a heading or bold label for
/// `category`.
///
/// Table cells, comments, attributes, tagged lines and anything containing a
/// percentage are skipped. The search stops at the next heading or table.
pub fn authored_description(document: &[String], category: Category) -> Option<String> {
    let heading = category.heading();
    document.iter().enumerate().find_map(|(index, line)| {
        if !names_category(line, heading) {
            return None;
        }
        document
            .iter()
            .skip(index + 1)
            .take(DESCRIPTION_LOOKAHEAD)
            .take_while(|next| util::heading(next).is_none() && !util::is_table_delimiter(next))
            .map(|next| next.trim())
            .find(|next| is_prose(next))
            .map(str::to_string)
    })
}

/// Returns the authored description for `category`, or a generated one.
pub fn describe_category(document: &[String], category: Category, score: u8) -> (String, DescriptionSource) {
    match authored_description(document, category) {
        Some(text) => (text, DescriptionSource::Authored),
        None => (
            generate_description(category.label(), score),
            DescriptionSource::Generated,
        ),
    }
}

fn is_prose(line: &str) -> bool {
    const STRUCTURAL_PREFIXES: [&str; 7] = ["|", "//", "[", "*", ":", ".", "<<"];
    !line.is_empty()
        && !line.contains('%')
        && !STRUCTURAL_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
        && !line.contains("{set:cellbgcolor")
        && !line.chars().all(|ch| ch == '-' || ch == '=' || ch == '_')
}
