//! Atoms referenced by ground rules.

use crate::model::{TruthValues, VariableId};

/// A ground atom: either an open random variable of the block model or an
/// observed value fixed for the lifetime of the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Atom {
    Variable(VariableId),
    Observed(f64),
}

impl Atom {
    /// Current truth value of the atom.
    pub fn value(&self, values: &dyn TruthValues) -> f64 {
        match *self {
            Atom::Variable(id) => values.value(id),
            Atom::Observed(v) => v,
        }
    }

    /// Returns the random variable behind this atom, if any.
    pub fn variable(&self) -> Option<VariableId> {
        match *self {
            Atom::Variable(id) => Some(id),
            Atom::Observed(_) => None,
        }
    }
}

impl From<VariableId> for Atom {
    fn from(id: VariableId) -> Self {
        Atom::Variable(id)
    }
}
