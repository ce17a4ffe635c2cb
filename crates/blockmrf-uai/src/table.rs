//! Potential tables: one factor's unnormalized potentials over every joint
//! assignment of the blocks it touches.
//!
//! Joint assignments are enumerated by a little-endian mixed-radix counter
//! whose digit `j` is the category of the `j`-th block in ascending block
//! order; the lowest block changes fastest.

use std::collections::BTreeSet;

use blockmrf_core::{BlockId, BlockModel, CompatibilityRule, ModelError};
use smallvec::{smallvec, SmallVec};
use tracing::trace;

use crate::error::{ReasonerError, Result};

/// Digits of one joint assignment, one per block in scope.
pub type Digits = SmallVec<[usize; 8]>;

/// Unnormalized potentials of one rule over its scope.
#[derive(Debug, Clone, PartialEq)]
pub struct PotentialTable {
    scope: Vec<BlockId>,
    cardinalities: Vec<usize>,
    log_potentials: Vec<f64>,
    potentials: Vec<f64>,
}

impl PotentialTable {
    /// Blocks touched by the rule, ascending and distinct.
    pub fn scope(&self) -> &[BlockId] {
        &self.scope
    }

    /// Cardinality of each block in scope.
    pub fn cardinalities(&self) -> &[usize] {
        &self.cardinalities
    }

    /// Number of entries, the product of the scope cardinalities.
    pub fn entries(&self) -> usize {
        self.potentials.len()
    }

    /// Potentials in enumeration order.
    pub fn potentials(&self) -> &[f64] {
        &self.potentials
    }

    /// `-weight · incompatibility` per entry, computed directly so entries
    /// whose potential underflows to `0.0` stay finite.
    pub fn log_potentials(&self) -> &[f64] {
        &self.log_potentials
    }

    /// Digits of entry `index`.
    pub fn digits(&self, index: usize) -> Digits {
        decode_entry(&self.cardinalities, index)
    }
}

/// Distinct blocks referenced by `rule`, in ascending order.
pub fn rule_scope(model: &BlockModel, rule: &dyn CompatibilityRule) -> Result<Vec<BlockId>> {
    let mut blocks = BTreeSet::new();
    for id in rule.variables() {
        let block = model.block_of(id).ok_or(ModelError::UnknownVariable(id))?;
        blocks.insert(block);
    }
    Ok(blocks.into_iter().collect())
}

/// Cardinalities of `scope`.
pub fn scope_cardinalities(model: &BlockModel, scope: &[BlockId]) -> Result<Vec<usize>> {
    scope
        .iter()
        .map(|&b| {
            model
                .block(b)
                .map(|block| block.cardinality())
                .ok_or(ReasonerError::Model(ModelError::UnknownBlock(b)))
        })
        .collect()
}

/// Re-derives the digits of entry `index` for the given radices.
pub fn decode_entry(cardinalities: &[usize], mut index: usize) -> Digits {
    let mut digits: Digits = smallvec![0; cardinalities.len()];
    for (digit, &radix) in digits.iter_mut().zip(cardinalities) {
        *digit = index % radix;
        index /= radix;
    }
    digits
}

/// Advances `digits` to the next entry, lowest digit first. Wraps to all
/// zeros after the last entry.
pub fn advance(digits: &mut [usize], cardinalities: &[usize]) {
    for (digit, &radix) in digits.iter_mut().zip(cardinalities) {
        *digit += 1;
        if *digit == radix {
            *digit = 0;
        } else {
            break;
        }
    }
}

/// Puts every block of `scope` into the state given by `digits`.
pub fn apply_digits(model: &BlockModel, scope: &[BlockId], digits: &[usize]) -> Result<()> {
    for (&block, &digit) in scope.iter().zip(digits) {
        model.set_category(block, digit)?;
    }
    Ok(())
}

/// Log-potential of `rule` under the model's current values.
pub fn log_potential(model: &BlockModel, rule: &dyn CompatibilityRule) -> f64 {
    -rule.weight() * rule.incompatibility(model)
}

/// Potential of `rule` under the model's current values.
pub fn potential(model: &BlockModel, rule: &dyn CompatibilityRule) -> f64 {
    log_potential(model, rule).exp()
}

/// Enumerates every joint assignment of the blocks `rule` touches and
/// computes `exp(-weight · incompatibility)` for each.
///
/// The model is left in the state of the last entry. `rule_index` is only
/// used for diagnostics.
pub fn build_table(
    model: &BlockModel,
    rule: &dyn CompatibilityRule,
    rule_index: usize,
) -> Result<PotentialTable> {
    let scope = rule_scope(model, rule)?;
    let cardinalities = scope_cardinalities(model, &scope)?;
    let entries = cardinalities
        .iter()
        .try_fold(1usize, |acc, &c| acc.checked_mul(c))
        .ok_or(ReasonerError::TableTooLarge { rule: rule_index })?;

    let mut log_potentials = Vec::with_capacity(entries);
    let mut digits: Digits = smallvec![0; scope.len()];
    for _ in 0..entries {
        apply_digits(model, &scope, &digits)?;
        log_potentials.push(log_potential(model, rule));
        advance(&mut digits, &cardinalities);
    }
    let potentials = log_potentials.iter().map(|l| l.exp()).collect();

    trace!(
        event = "table_built",
        rule = rule_index,
        scope = scope.len(),
        entries,
    );

    Ok(PotentialTable {
        scope,
        cardinalities,
        log_potentials,
        potentials,
    })
}
