//! Error types for the UAI bridge.

use std::path::PathBuf;

use blockmrf_core::ModelError;
use thiserror::Error;

/// Solver output that does not match the expected results format.
///
/// These are never retried: they indicate a solver or version mismatch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("Results file is empty")]
    EmptyResults,

    #[error("Results file is for task {actual:?}, expected {expected:?}")]
    TaskMismatch { expected: String, actual: String },

    #[error("Line {line}: expected solution marker \"1\", found {marker:?} (multiple assignments in a single solution are not supported)")]
    MultipleAssignments { line: usize, marker: String },

    #[error("Line {line}: missing assignment line")]
    MissingAssignment { line: usize },

    #[error("Line {line}: invalid integer {token:?}")]
    InvalidInteger { line: usize, token: String },

    #[error("Line {line}: invalid real {token:?}")]
    InvalidReal { line: usize, token: String },

    #[error("Assignment for variable {index} is out of range (model has {len} variables)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Category {category} is out of range for variable {variable} (cardinality {cardinality})")]
    CategoryOutOfRange {
        variable: usize,
        category: usize,
        cardinality: usize,
    },

    #[error("Assignment has {actual} values, model has {expected} variables")]
    AssignmentLength { expected: usize, actual: usize },

    #[error("Variable {variable} has cardinality {expected} in the model, results report {actual}")]
    CardinalityMismatch {
        variable: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Line {line}: malformed marginals: {reason}")]
    MalformedMarginals { line: usize, reason: String },
}

/// Errors raised while encoding, running the solver, or decoding.
#[derive(Debug, Error)]
pub enum ReasonerError {
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Potential table for rule {rule} has more entries than fit in memory")]
    TableTooLarge { rule: usize },

    #[error("No solver executable configured")]
    MissingExecutable,

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Solver exited with status {status:?}: {stderr}")]
    ExecutableFailed { status: Option<i32>, stderr: String },

    #[error("Solver produced no results file at {0}")]
    MissingOutput(PathBuf),
}

impl ReasonerError {
    pub(crate) fn io(context: impl Into<String>) -> impl FnOnce(std::io::Error) -> Self {
        let context = context.into();
        move |source| ReasonerError::Io { context, source }
    }

    pub(crate) fn not_blocker() -> Self {
        ReasonerError::Precondition("ConstraintBlockerStore required".into())
    }
}

/// Result type alias for reasoner operations.
pub type Result<T> = std::result::Result<T, ReasonerError>;
