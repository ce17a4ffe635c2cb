//! Rule fixtures.

use blockmrf_core::{Atom, CompatibilityRule, TruthValues, VariableId};

/// A rule whose incompatibility never depends on the assignment.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedRule {
    pub weight: f64,
    pub atoms: Vec<Atom>,
    pub incompatibility: f64,
}

impl FixedRule {
    pub fn new(weight: f64, variables: &[VariableId], incompatibility: f64) -> Self {
        Self {
            weight,
            atoms: variables.iter().copied().map(Atom::Variable).collect(),
            incompatibility,
        }
    }
}

impl CompatibilityRule for FixedRule {
    fn weight(&self) -> f64 {
        self.weight
    }

    fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    fn incompatibility(&self, _values: &dyn TruthValues) -> f64 {
        self.incompatibility
    }
}

/// Incompatibility is `Σ scale_i · value_i` over its atoms.
///
/// Distinct scales make every joint assignment produce a distinct potential,
/// which makes enumeration order observable.
#[derive(Clone, Debug, PartialEq)]
pub struct SumRule {
    pub weight: f64,
    pub atoms: Vec<Atom>,
    pub scales: Vec<f64>,
}

impl SumRule {
    pub fn new(weight: f64, terms: &[(VariableId, f64)]) -> Self {
        Self {
            weight,
            atoms: terms.iter().map(|&(id, _)| Atom::Variable(id)).collect(),
            scales: terms.iter().map(|&(_, s)| s).collect(),
        }
    }
}

impl CompatibilityRule for SumRule {
    fn weight(&self) -> f64 {
        self.weight
    }

    fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    fn incompatibility(&self, values: &dyn TruthValues) -> f64 {
        self.atoms
            .iter()
            .zip(&self.scales)
            .map(|(atom, scale)| scale * atom.value(values))
            .sum()
    }
}
