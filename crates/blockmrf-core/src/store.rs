//! Term stores: collections of ground rules, optionally paired with a block
//! model.

use crate::error::{ModelError, Result};
use crate::model::BlockModel;
use crate::rule::CompatibilityRule;

/// Ordered collection of weighted ground rules.
#[derive(Debug, Default)]
pub struct GroundRuleStore {
    rules: Vec<Box<dyn CompatibilityRule>>,
}

impl GroundRuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule and returns its index.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidWeight`] for negative or non-finite weights.
    pub fn add<R: CompatibilityRule + 'static>(&mut self, rule: R) -> Result<usize> {
        self.add_boxed(Box::new(rule))
    }

    pub fn add_boxed(&mut self, rule: Box<dyn CompatibilityRule>) -> Result<usize> {
        let weight = rule.weight();
        if !weight.is_finite() || weight < 0.0 {
            return Err(ModelError::InvalidWeight(weight));
        }
        self.rules.push(rule);
        Ok(self.rules.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&dyn CompatibilityRule> {
        self.rules.get(index).map(|r| r.as_ref())
    }

    /// Iterates rules in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &dyn CompatibilityRule> {
        self.rules.iter().map(|r| r.as_ref())
    }
}

/// Something that holds ground rules and can be handed to a reasoner.
///
/// Reasoners that need block structure ask for the constraint-blocker view
/// and fail when the store cannot provide one.
pub trait TermStore {
    fn ground_rules(&self) -> &GroundRuleStore;

    fn as_constraint_blocker(&self) -> Option<&ConstraintBlockerStore> {
        None
    }

    fn as_constraint_blocker_mut(&mut self) -> Option<&mut ConstraintBlockerStore> {
        None
    }
}

impl TermStore for GroundRuleStore {
    fn ground_rules(&self) -> &GroundRuleStore {
        self
    }
}

/// A block model together with the ground rules over its variables.
#[derive(Debug, Default)]
pub struct ConstraintBlockerStore {
    model: BlockModel,
    rules: GroundRuleStore,
}

impl ConstraintBlockerStore {
    pub fn new(model: BlockModel) -> Self {
        Self {
            model,
            rules: GroundRuleStore::new(),
        }
    }

    pub fn model(&self) -> &BlockModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut BlockModel {
        &mut self.model
    }

    pub fn rules(&self) -> &GroundRuleStore {
        &self.rules
    }

    /// Adds a rule after checking that every variable it references exists.
    pub fn add_rule<R: CompatibilityRule + 'static>(&mut self, rule: R) -> Result<usize> {
        if let Some(missing) = rule
            .variables()
            .into_iter()
            .find(|&id| self.model.variable(id).is_none())
        {
            return Err(ModelError::UnknownVariable(missing));
        }
        self.rules.add(rule)
    }

    /// Splits the store into its model and rules.
    pub fn into_parts(self) -> (BlockModel, GroundRuleStore) {
        (self.model, self.rules)
    }
}

impl TermStore for ConstraintBlockerStore {
    fn ground_rules(&self) -> &GroundRuleStore {
        &self.rules
    }

    fn as_constraint_blocker(&self) -> Option<&ConstraintBlockerStore> {
        Some(self)
    }

    fn as_constraint_blocker_mut(&mut self) -> Option<&mut ConstraintBlockerStore> {
        Some(self)
    }
}
