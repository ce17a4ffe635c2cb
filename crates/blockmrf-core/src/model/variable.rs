//! Boolean indicator variables stored in the model arena.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::BlockId;

/// Index of a variable in the [`BlockModel`](super::BlockModel) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VariableId(pub usize);

impl VariableId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Read access to current truth values.
///
/// Rules evaluate their incompatibility against this view, so the same rule
/// can be scored against the live model or a detached assignment.
pub trait TruthValues {
    /// Returns the truth value of `id`.
    ///
    /// # Panics
    ///
    /// Implementations may panic if `id` is not part of the assignment.
    fn value(&self, id: VariableId) -> f64;
}

impl TruthValues for Vec<f64> {
    fn value(&self, id: VariableId) -> f64 {
        self[id.0]
    }
}

/// An `f64` stored as raw bits so it can be updated through a shared reference.
#[derive(Debug, Default)]
struct TruthCell(AtomicU64);

impl TruthCell {
    fn new(value: f64) -> Self {
        Self(AtomicU64::new(value.to_bits()))
    }

    fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    fn store(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// A Boolean indicator with a continuous truth value, owned by one block.
#[derive(Debug)]
pub struct Variable {
    name: String,
    block: BlockId,
    value: TruthCell,
}

impl Variable {
    pub(crate) fn new(name: String, block: BlockId, value: f64) -> Self {
        Self {
            name,
            block,
            value: TruthCell::new(value),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Block this variable belongs to.
    pub fn block(&self) -> BlockId {
        self.block
    }

    pub fn value(&self) -> f64 {
        self.value.load()
    }

    pub(crate) fn set_value(&self, value: f64) {
        self.value.store(value);
    }
}
