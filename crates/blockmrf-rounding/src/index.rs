//! Variable-to-rule index.

use blockmrf_core::error::Result;
use blockmrf_core::{BlockModel, GroundRuleStore, ModelError, VariableId};
use smallvec::SmallVec;

type RuleList = SmallVec<[usize; 4]>;

/// For each variable, the indices of the ground rules that reference it.
///
/// A rule that mentions the same variable twice is listed once.
#[derive(Debug, Clone, Default)]
pub struct RuleIndex {
    by_variable: Vec<RuleList>,
}

impl RuleIndex {
    /// Indexes `rules` against the variables of `model`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownVariable`] if a rule references a
    /// variable outside the model.
    pub fn build(model: &BlockModel, rules: &GroundRuleStore) -> Result<Self> {
        let mut by_variable = vec![RuleList::new(); model.variable_count()];
        for (index, rule) in rules.iter().enumerate() {
            for id in rule.variables() {
                let list = by_variable
                    .get_mut(id.index())
                    .ok_or(ModelError::UnknownVariable(id))?;
                if list.last() != Some(&index) {
                    list.push(index);
                }
            }
        }
        Ok(Self { by_variable })
    }

    /// Rules registered on `id`, in store order.
    pub fn rules_for(&self, id: VariableId) -> &[usize] {
        self.by_variable
            .get(id.index())
            .map(|l| l.as_slice())
            .unwrap_or(&[])
    }

    pub fn variable_count(&self) -> usize {
        self.by_variable.len()
    }
}
