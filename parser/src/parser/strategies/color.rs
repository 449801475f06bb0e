//! Bare color-tag scan, the last-resort strategy.
//!
//! Every data color tag becomes an item. The name comes from the closest
//! `<<name>>` cross-reference within a few lines above the tag, never
//! reaching past the previous tag line. Tags without a nearby reference get
//! a placeholder name such as `Required Item 1`, numbered per status.

use std::collections::HashMap;

use health_report_core::{Item, Status};

use super::{Extraction, ExtractionStrategy};
use crate::parser::classify::{TagLine, classify_tag_line};
use crate::parser::util;

/// Lines searched above a tag for its cross-reference.
const NAME_LOOKBACK: usize = 5;

pub struct ColorScanStrategy;

impl ExtractionStrategy for ColorScanStrategy {
    fn name(&self) -> &'static str {
        "color"
    }

    fn scan(&self, lines: &[String]) -> Extraction {
        let mut items = Vec::new();
        let mut placeholders: HashMap<Status, usize> = HashMap::new();
        let mut floor = 0usize;
        let mut discarded = 0usize;

        for (index, line) in lines.iter().enumerate() {
            let tag = classify_tag_line(line);
            let color = match tag {
                Some(TagLine::Data(color)) => color,
                Some(TagLine::Legend(_) | TagLine::Unresolved) => {
                    discarded += 1;
                    floor = index + 1;
                    continue;
                }
                Some(TagLine::Reset) | None => continue,
            };

            let window_start = floor.max(index.saturating_sub(NAME_LOOKBACK));
            let reference = (window_start..=index)
                .rev()
                .find_map(|i| util::cross_reference(&lines[i]).map(|name| (i, name)));

            let item = match reference {
                Some((name_index, name)) => {
                    let observation = lines
                        .get(name_index + 1..index)
                        .unwrap_or_default()
                        .iter()
                        .find_map(|l| util::plain_cell(l))
                        .unwrap_or_default();
                    let category = lines[window_start..name_index]
                        .iter()
                        .rev()
                        .filter(|l| util::starts_cell(l))
                        .find_map(|l| util::plain_cell(l))
                        .unwrap_or_default();
                    Item::new(name, color)
                        .with_observation(observation)
                        .with_category(category)
                }
                None => {
                    let counter = placeholders.entry(color.status()).or_insert(0);
                    *counter += 1;
                    Item::new(format!("{} Item {}", color.status().label(), counter), color)
                }
            };
            items.push(item);
            floor = index + 1;
        }

        Extraction { items, discarded }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn test_names_from_nearby_reference() {
        let text = "\
|Networking
|<<IngressCerts>>
|Default certificate in use
|{set:cellbgcolor:#FEFE20}
Changes Recommended";
        let items = ColorScanStrategy.extract(&lines(text));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "IngressCerts");
        assert_eq!(items[0].observation, "Default certificate in use");
        assert_eq!(items[0].category, "Networking");
        assert_eq!(items[0].status, Status::Recommended);
    }

    #[test]
    fn test_placeholder_names_count_per_status() {
        let text = "\
{set:cellbgcolor:#FF0000}
{set:cellbgcolor:#00FF00}
{set:cellbgcolor:#FF0000}";
        let names: Vec<String> = ColorScanStrategy
            .extract(&lines(text))
            .into_iter()
            .map(|item| item.name)
            .collect();
        assert_eq!(
            names,
            vec!["Required Item 1", "No Change Item 1", "Required Item 2"]
        );
    }

    #[test]
    fn test_reference_does_not_cross_previous_tag() {
        let text = "\
|<<First>>
|{set:cellbgcolor:#FF0000}
|{set:cellbgcolor:#80E5FF}";
        let items = ColorScanStrategy.extract(&lines(text));
        assert_eq!(items[0].name, "First");
        assert_eq!(items[1].name, "Advisory Item 1");
    }

    #[test]
    fn test_reference_outside_lookback_is_ignored() {
        let text = "|<<Far>>\n1\n2\n3\n4\n5\n|{set:cellbgcolor:#FF0000}";
        let items = ColorScanStrategy.extract(&lines(text));
        assert_eq!(items[0].name, "Required Item 1");
    }

    #[test]
    fn test_legend_and_unresolved_tags_are_skipped() {
        let text = "\
|{set:cellbgcolor:#FF0000} Indicates Changes Required
|{set:cellbgcolor:#FFFFFF}
|<<Real>>
|{set:cellbgcolor:#A6B9BF}";
        let extraction = ColorScanStrategy.scan(&lines(text));
        assert_eq!(extraction.discarded, 2);
        let items = extraction.items;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Real");
        assert_eq!(items[0].status, Status::NotApplicable);
    }
}
