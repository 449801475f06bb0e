//! Item deduplication.

use std::collections::HashMap;

use health_report_core::{Item, Status};

/// Collapses items sharing a `(name, status)` key.
///
/// The last occurrence wins but takes the position of the first, so output
/// order follows first appearance in the document.
pub fn deduplicate_items(items: Vec<Item>) -> Vec<Item> {
    let mut positions: HashMap<(String, Status), usize> = HashMap::new();
    let mut merged: Vec<Item> = Vec::with_capacity(items.len());

    for item in items {
        let key = (item.name.clone(), item.status);
        match positions.get(&key) {
            Some(&index) => merged[index] = item,
            None => {
                positions.insert(key, merged.len());
                merged.push(item);
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use health_report_core::ColorTag;

    #[test]
    fn test_later_duplicate_replaces_earlier_in_place() {
        let items = vec![
            Item::new("A", ColorTag::Red).with_observation("first"),
            Item::new("B", ColorTag::Green),
            Item::new("A", ColorTag::Red).with_observation("second"),
        ];
        let merged = deduplicate_items(items);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].name, "A");
        assert_eq!(merged[0].observation, "second");
        assert_eq!(merged[1].name, "B");
    }

    #[test]
    fn test_same_name_different_status_is_kept() {
        let items = vec![
            Item::new("A", ColorTag::Red),
            Item::new("A", ColorTag::Yellow),
        ];
        assert_eq!(deduplicate_items(items).len(), 2);
    }
}
