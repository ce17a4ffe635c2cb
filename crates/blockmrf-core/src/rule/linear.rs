//! Weighted linear (arithmetic) rules.

use super::{Atom, CompatibilityRule};
use crate::model::TruthValues;

/// Comparison between the linear sum and the constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    LessEq,
    GreaterEq,
    Equal,
}

/// `Σ coefficient · atom  (<=|>=|=)  constant`, penalized by the amount of
/// violation (optionally squared).
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRule {
    weight: f64,
    atoms: Vec<Atom>,
    coefficients: Vec<f64>,
    comparator: Comparator,
    constant: f64,
    squared: bool,
}

impl LinearRule {
    pub fn new(weight: f64, comparator: Comparator, constant: f64) -> Self {
        Self {
            weight,
            atoms: Vec::new(),
            coefficients: Vec::new(),
            comparator,
            constant,
            squared: false,
        }
    }

    /// Adds `coefficient · atom` to the left-hand side.
    pub fn with_term(mut self, coefficient: f64, atom: impl Into<Atom>) -> Self {
        self.atoms.push(atom.into());
        self.coefficients.push(coefficient);
        self
    }

    pub fn squared(mut self) -> Self {
        self.squared = true;
        self
    }

    fn lhs(&self, values: &dyn TruthValues) -> f64 {
        self.atoms
            .iter()
            .zip(&self.coefficients)
            .map(|(atom, c)| c * atom.value(values))
            .sum()
    }
}

impl CompatibilityRule for LinearRule {
    fn weight(&self) -> f64 {
        self.weight
    }

    fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    fn incompatibility(&self, values: &dyn TruthValues) -> f64 {
        let lhs = self.lhs(values);
        let violation = match self.comparator {
            Comparator::LessEq => (lhs - self.constant).max(0.0),
            Comparator::GreaterEq => (self.constant - lhs).max(0.0),
            Comparator::Equal => (lhs - self.constant).abs(),
        };
        if self.squared {
            violation * violation
        } else {
            violation
        }
    }
}
