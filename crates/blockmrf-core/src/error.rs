//! Error types for the block model and ground rules.

use thiserror::Error;

use crate::model::{BlockId, VariableId};

/// Errors raised while building or mutating a [`BlockModel`](crate::BlockModel).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// A block must contain at least one variable.
    #[error("Block must contain at least one variable")]
    EmptyBlock,

    /// Truth values are restricted to `[0, 1]`.
    #[error("Truth value {value} for variable {variable} is outside [0, 1]")]
    ValueOutOfRange { variable: VariableId, value: f64 },

    /// Referenced variable is not part of the model.
    #[error("Unknown variable: {0}")]
    UnknownVariable(VariableId),

    /// Referenced block is not part of the model.
    #[error("Unknown block: {0}")]
    UnknownBlock(BlockId),

    /// Category code is outside the block's cardinality.
    #[error("Category {category} is out of range for block {block} (cardinality {cardinality})")]
    CategoryOutOfRange {
        block: BlockId,
        category: usize,
        cardinality: usize,
    },

    /// Rule weights must be finite and non-negative.
    #[error("Invalid rule weight: {0}")]
    InvalidWeight(f64),

    /// Snapshot does not match the model it is restored into.
    #[error("Snapshot has {actual} values, model has {expected} variables")]
    SnapshotMismatch { expected: usize, actual: usize },
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
