//! Greedy sequential rounding by the method of conditional expectations.

use blockmrf_config::{RoundingConfig, TieBreak};
use blockmrf_core::error::Result;
use blockmrf_core::{
    BlockModel, ConstraintBlockerStore, GroundRuleStore, ModelError, VariableId,
};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::components::partition;
use crate::index::RuleIndex;
use crate::{RoundingReport, RoundingStrategy};

/// Maps a fractional value into `[0.25, 0.75]` before ordering and scoring.
pub fn remap(value: f64) -> f64 {
    0.25 + 0.5 * value
}

/// Rounds variables one at a time, most confident first, keeping whichever
/// of `0.0`/`1.0` maximizes the expected weighted compatibility of the
/// rules registered on the variable.
///
/// Variables with no registered rules are rounded to the nearer of the two
/// values, so discrete input is left unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyRounding {
    tie_break: TieBreak,
    parallel: bool,
}

impl GreedyRounding {
    pub fn new(tie_break: TieBreak, parallel: bool) -> Self {
        Self {
            tie_break,
            parallel,
        }
    }

    pub fn from_config(config: &RoundingConfig) -> Self {
        Self::new(config.tie_break, config.parallel)
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Variables sorted by `values` descending, ties by ascending id.
    fn descending_order(values: &[f64]) -> Vec<VariableId> {
        let mut order: Vec<VariableId> = (0..values.len()).map(VariableId).collect();
        order.sort_by(|a, b| {
            values[b.index()]
                .total_cmp(&values[a.index()])
                .then(a.cmp(b))
        });
        order
    }

    fn keep_one(&self, one: f64, zero: f64) -> bool {
        match self.tie_break {
            TieBreak::PreferOne => one >= zero,
            TieBreak::PreferZero => one > zero,
        }
    }

    /// Rounds every member of `component` in order; returns the number of
    /// members set to `1.0`.
    ///
    /// Each component is handed to exactly one task, and no rule spans two
    /// components, so the set/score/choose sequence of a member never
    /// overlaps with that of any variable it shares a rule with.
    fn round_component(
        &self,
        model: &BlockModel,
        rules: &GroundRuleStore,
        index: &RuleIndex,
        component: &[VariableId],
    ) -> Result<usize> {
        let mut ones = 0;
        for &id in component {
            let registered = index.rules_for(id);
            let keep_one = if registered.is_empty() {
                let current = model.get(id).ok_or(ModelError::UnknownVariable(id))?;
                self.keep_one(current, 0.5)
            } else {
                model.set_value(id, 0.0)?;
                let zero = score(model, rules, registered);
                model.set_value(id, 1.0)?;
                let one = score(model, rules, registered);
                trace!(event = "variable_scored", variable = %id, zero, one);
                self.keep_one(one, zero)
            };

            let value = if keep_one { 1.0 } else { 0.0 };
            model.set_value(id, value)?;
            if keep_one {
                ones += 1;
            }
        }
        debug!(
            event = "component_rounded",
            size = component.len(),
            ones,
        );
        Ok(ones)
    }
}

fn score(model: &BlockModel, rules: &GroundRuleStore, registered: &[usize]) -> f64 {
    registered
        .iter()
        .filter_map(|&r| rules.get(r))
        .map(|rule| rule.expected_weighted_compatibility(model))
        .sum()
}

impl RoundingStrategy for GreedyRounding {
    fn round(&self, store: &ConstraintBlockerStore) -> Result<RoundingReport> {
        let model = store.model();
        let rules = store.rules();
        let index = RuleIndex::build(model, rules)?;

        let remapped: Vec<f64> = model.snapshot().into_iter().map(remap).collect();
        model.restore(&remapped)?;

        let order = Self::descending_order(&remapped);
        let components = partition(model.variable_count(), rules, &order);

        let per_component: Vec<usize> = if self.parallel {
            components
                .par_iter()
                .map(|c| self.round_component(model, rules, &index, c))
                .collect::<Result<_>>()?
        } else {
            components
                .iter()
                .map(|c| self.round_component(model, rules, &index, c))
                .collect::<Result<_>>()?
        };

        Ok(RoundingReport {
            rounded: order.len(),
            ones: per_component.iter().sum(),
            components: components.len(),
            violated_blocks: model.violated_blocks(),
        })
    }
}
