//! blockmrf Rounding Engine
//!
//! Converts fractional truth values into a discrete `0.0`/`1.0` assignment:
//! - [`GreedyRounding`]: descending-order rounding scored against ground rules
//! - [`StochasticRounding`]: independent Bernoulli draws
//! - [`RuleIndex`]: per-variable list of registered ground rules
//!
//! Neither strategy enforces block cardinality; the number of violated
//! blocks is reported in [`RoundingReport`].

pub mod components;
pub mod greedy;
pub mod index;
pub mod stochastic;

#[cfg(test)]
mod stochastic_tests;

pub use greedy::GreedyRounding;
pub use index::RuleIndex;
pub use stochastic::StochasticRounding;

use blockmrf_config::{RoundingAlgorithm, RoundingConfig};
use blockmrf_core::error::Result;
use blockmrf_core::ConstraintBlockerStore;
use tracing::{info, warn};

/// Summary of one rounding pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundingReport {
    /// Variables that were rounded.
    pub rounded: usize,
    /// Variables set to `1.0`.
    pub ones: usize,
    /// Connected components processed; `0` for stochastic rounding.
    pub components: usize,
    /// Blocks left with more than one true member, or an exactly-one block
    /// with none.
    pub violated_blocks: usize,
}

/// A rounding algorithm over the variables of a block model.
///
/// Values are written through the model's shared-reference setters, so the
/// store itself is borrowed immutably.
pub trait RoundingStrategy: Send + Sync {
    fn round(&self, store: &ConstraintBlockerStore) -> Result<RoundingReport>;
}

/// Rounds `store` with the algorithm selected by `config`.
pub fn round(store: &ConstraintBlockerStore, config: &RoundingConfig) -> Result<RoundingReport> {
    info!(
        event = "rounding_start",
        algorithm = ?config.algorithm,
        variables = store.model().variable_count(),
        rules = store.rules().len(),
    );

    let report = match config.algorithm {
        RoundingAlgorithm::Greedy => GreedyRounding::from_config(config).round(store)?,
        RoundingAlgorithm::Stochastic => StochasticRounding::from_config(config).round(store)?,
    };

    if report.violated_blocks > 0 {
        warn!(
            event = "blocks_violated",
            violated_blocks = report.violated_blocks,
        );
    }
    info!(
        event = "rounding_end",
        rounded = report.rounded,
        ones = report.ones,
        components = report.components,
        violated_blocks = report.violated_blocks,
    );
    Ok(report)
}
