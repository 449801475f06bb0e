//! Pluggable item-extraction strategies.
//!
//! Reports come in three structural shapes, from most to least explicit:
//! items delimited by `ITEM START` / `ITEM END` comment markers, a plain
//! evaluation table with a recognizable header, and bare color tags with a
//! nearby cross-reference. Strategies run in that order and the first one
//! that yields at least one item wins.

pub mod color;
pub mod marker;
pub mod table;

use health_report_core::Item;
use tracing::debug;

pub use color::ColorScanStrategy;
pub use marker::MarkerStrategy;
pub use table::TableStrategy;

/// Items found by one strategy, plus the candidate rows it dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub items: Vec<Item>,
    pub discarded: usize,
}

/// Pluggable strategy for extracting items from a section's lines.
///
/// Strategies are pure functions of their input; they never fail and return
/// an empty list when their structure is absent.
pub trait ExtractionStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn scan(&self, lines: &[String]) -> Extraction;

    fn extract(&self, lines: &[String]) -> Vec<Item> {
        self.scan(lines).items
    }
}

/// Built-in strategies in priority order.
pub fn ranked_strategies() -> [&'static dyn ExtractionStrategy; 3] {
    [&MarkerStrategy, &TableStrategy, &ColorScanStrategy]
}

/// Returns built-in strategy names in priority order.
pub fn ranked_strategy_names() -> Vec<&'static str> {
    ranked_strategies().iter().map(|s| s.name()).collect()
}

/// Result of running strategies until one produces items.
#[derive(Debug, Clone, Default)]
pub struct PipelineOutcome {
    pub items: Vec<Item>,
    /// Name of the strategy whose items were kept.
    pub strategy: Option<&'static str>,
    /// Strategies run, in order, including the winner.
    pub attempted: Vec<&'static str>,
    /// Rows dropped by the winning strategy.
    pub discarded: usize,
}

/// Runs `strategies` in order and keeps the first non-empty result.
pub fn first_non_empty(strategies: &[&dyn ExtractionStrategy], lines: &[String]) -> PipelineOutcome {
    let mut outcome = PipelineOutcome::default();
    for strategy in strategies {
        outcome.attempted.push(strategy.name());
        let extraction = strategy.scan(lines);
        debug!(
            strategy = strategy.name(),
            items = extraction.items.len(),
            discarded = extraction.discarded,
            "strategy finished"
        );
        if !extraction.items.is_empty() {
            outcome.items = extraction.items;
            outcome.discarded = extraction.discarded;
            outcome.strategy = Some(strategy.name());
            break;
        }
    }
    outcome
}
