//! Weighted disjunctive clauses.

use super::{Atom, CompatibilityRule};
use crate::model::TruthValues;

/// A weighted disjunction of literals under Łukasiewicz semantics.
///
/// The distance to satisfaction is
/// `max(0, 1 - Σ positive - Σ (1 - negative))`, optionally squared.
///
/// # Example
///
/// ```
/// use blockmrf_core::{Atom, BlockModel, CompatibilityRule, LogicalRule};
///
/// let mut model = BlockModel::new();
/// let a = model.add_variable("a", 0.0).unwrap();
/// let rule = LogicalRule::new(2.0).with_positive(Atom::Variable(a));
///
/// assert_eq!(rule.incompatibility(&model), 1.0);
/// model.set_value(a, 1.0).unwrap();
/// assert_eq!(rule.incompatibility(&model), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalRule {
    weight: f64,
    atoms: Vec<Atom>,
    negated: Vec<bool>,
    squared: bool,
}

impl LogicalRule {
    /// Creates an empty clause with the given weight.
    pub fn new(weight: f64) -> Self {
        Self {
            weight,
            atoms: Vec::new(),
            negated: Vec::new(),
            squared: false,
        }
    }

    /// Adds a positive literal.
    pub fn with_positive(mut self, atom: impl Into<Atom>) -> Self {
        self.atoms.push(atom.into());
        self.negated.push(false);
        self
    }

    /// Adds a negated literal.
    pub fn with_negative(mut self, atom: impl Into<Atom>) -> Self {
        self.atoms.push(atom.into());
        self.negated.push(true);
        self
    }

    /// Squares the distance to satisfaction.
    pub fn squared(mut self) -> Self {
        self.squared = true;
        self
    }

    fn literals(&self) -> impl Iterator<Item = (&Atom, bool)> {
        self.atoms.iter().zip(self.negated.iter().copied())
    }
}

impl CompatibilityRule for LogicalRule {
    fn weight(&self) -> f64 {
        self.weight
    }

    fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    fn incompatibility(&self, values: &dyn TruthValues) -> f64 {
        let truth: f64 = self
            .literals()
            .map(|(atom, negated)| {
                let v = atom.value(values);
                if negated {
                    1.0 - v
                } else {
                    v
                }
            })
            .sum();
        let distance = (1.0 - truth).max(0.0);
        if self.squared {
            distance * distance
        } else {
            distance
        }
    }

    /// Probability that the clause is satisfied when every atom is an
    /// independent Bernoulli draw with its current value, times the weight.
    fn expected_weighted_compatibility(&self, values: &dyn TruthValues) -> f64 {
        let unsatisfied: f64 = self
            .literals()
            .map(|(atom, negated)| {
                let v = atom.value(values);
                if negated {
                    v
                } else {
                    1.0 - v
                }
            })
            .product();
        self.weight * (1.0 - unsatisfied)
    }
}
