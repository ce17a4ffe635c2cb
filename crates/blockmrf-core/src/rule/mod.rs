//! Ground rules (weighted potentials) over block model atoms.
//!
//! Every rule variant implements [`CompatibilityRule`]; stores keep them as
//! trait objects so heterogeneous rules share one collection.

mod atom;
mod linear;
mod logical;


pub use atom::Atom;
pub use linear::{Comparator, LinearRule};
pub use logical::LogicalRule;

use std::fmt::Debug;

use smallvec::SmallVec;

use crate::model::{TruthValues, VariableId};

/// A weighted ground rule contributing one factor to the joint distribution.
///
/// The factor's unnormalized potential is `exp(-weight · incompatibility)`.
pub trait CompatibilityRule: Send + Sync + Debug {
    /// Non-negative rule weight.
    fn weight(&self) -> f64;

    /// Atoms referenced by the rule, in rule order. May repeat.
    fn atoms(&self) -> &[Atom];

    /// Penalty of the rule for the current truth values.
    fn incompatibility(&self, values: &dyn TruthValues) -> f64;

    /// Score used by greedy rounding; higher is better.
    fn expected_weighted_compatibility(&self, values: &dyn TruthValues) -> f64 {
        -self.weight() * self.incompatibility(values)
    }

    /// Random variables referenced by the rule, in atom order.
    fn variables(&self) -> SmallVec<[VariableId; 8]> {
        self.atoms().iter().filter_map(Atom::variable).collect()
    }
}
