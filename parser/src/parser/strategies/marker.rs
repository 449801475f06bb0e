//! Marker-delimited item blocks.
//!
//! Generated reports wrap each table row in comment markers:
//!
//! ```text
//! // ------------------------ITEM START
//! {set:cellbgcolor!}
//! |Cluster Config
//!
//! |<<KubeadminUser>>
//!
//! |kubeadmin account still present
//!
//! |{set:cellbgcolor:#FF0000}
//! Changes Required
//! // ------------------------ITEM END
//! ```
//!
//! The first color tag inside a block decides its status. Blocks without a
//! name, without a resolvable status, or without a closing marker are
//! dropped.

use health_report_core::{ColorTag, Item};
use tracing::debug;

use super::{Extraction, ExtractionStrategy};
use crate::parser::classify::{TagLine, classify_tag_line};
use crate::parser::util;

pub struct MarkerStrategy;

impl ExtractionStrategy for MarkerStrategy {
    fn name(&self) -> &'static str {
        "marker"
    }

    fn scan(&self, lines: &[String]) -> Extraction {
        let mut items = Vec::new();
        let mut block: Option<BlockBuilder> = None;
        let mut discarded = 0usize;

        for line in lines {
            let trimmed = line.trim();
            if util::is_item_start(trimmed) {
                if block.replace(BlockBuilder::default()).is_some() {
                    discarded += 1;
                }
                continue;
            }
            if util::is_item_end(trimmed) {
                if let Some(builder) = block.take() {
                    match builder.finish() {
                        Some(item) => items.push(item),
                        None => discarded += 1,
                    }
                }
                continue;
            }
            if let Some(builder) = block.as_mut() {
                builder.consume(trimmed);
            }
        }

        if block.is_some() {
            discarded += 1;
        }
        if discarded > 0 {
            debug!(discarded, "dropped incomplete marker blocks");
        }
        Extraction { items, discarded }
    }
}

#[derive(Debug, Default)]
struct BlockBuilder {
    category: Option<String>,
    name: Option<String>,
    observation: Option<String>,
    color: Option<ColorTag>,
    tag_seen: bool,
    expect_category: bool,
}

impl BlockBuilder {
    fn consume(&mut self, line: &str) {
        if line.is_empty() || util::is_comment(line) {
            return;
        }

        match classify_tag_line(line) {
            Some(TagLine::Reset) => {
                let stripped = util::strip_tags(line);
                let rest = util::cell_text(&stripped);
                if rest.is_empty() {
                    self.expect_category = true;
                } else if self.category.is_none() {
                    self.category = Some(rest.to_string());
                }
                return;
            }
            Some(tag) => {
                if !self.tag_seen {
                    self.tag_seen = true;
                    self.color = tag.data_color();
                }
                return;
            }
            None => {}
        }

        if let Some(name) = util::cross_reference(line) {
            if self.name.is_none() {
                self.name = Some(name);
            }
            return;
        }

        let Some(text) = util::plain_cell(line) else {
            return;
        };
        if self.name.is_none() {
            if self.expect_category || self.category.is_none() {
                self.category = Some(text.to_string());
                self.expect_category = false;
            }
        } else if self.observation.is_none() && !self.tag_seen {
            self.observation = Some(text.to_string());
        }
    }

    fn finish(self) -> Option<Item> {
        let name = self.name.filter(|name| !name.is_empty())?;
        let color = self.color?;
        Some(
            Item::new(name, color)
                .with_category(self.category.unwrap_or_default())
                .with_observation(self.observation.unwrap_or_default()),
        )
    }
}
