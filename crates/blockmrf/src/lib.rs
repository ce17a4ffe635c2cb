//! blockmrf - UAI bridge and rounding engine for block-structured Boolean MRFs
//!
//! Build a [`BlockModel`], attach ground rules in a
//! [`ConstraintBlockerStore`], then either hand it to an external UAI solver
//! or round its fractional truth values directly.
//!
//! # Example
//!
//! ```rust
//! use blockmrf::prelude::*;
//!
//! let mut model = BlockModel::new();
//! model.add_block_with_values([("red", 0.7), ("blue", 0.3)], true).unwrap();
//! let store = ConstraintBlockerStore::new(model);
//!
//! let report = round(&store, &RoundingConfig::default()).unwrap();
//! assert_eq!(report.ones, 1);
//! assert_eq!(store.model().snapshot(), vec![1.0, 0.0]);
//! ```

// Model and rules
pub use blockmrf_core::{
    Atom, Block, BlockId, BlockModel, Comparator, CompatibilityRule, ConstraintBlockerStore,
    GroundRuleStore, LinearRule, LogicalRule, ModelError, TermStore, TruthValues, Variable,
    VariableId,
};

// Configuration
pub use blockmrf_config::{
    ConfigError, ReasonerConfig, RoundingAlgorithm, RoundingConfig, TieBreak, UaiConfig, UaiTask,
};

// UAI bridge
pub use blockmrf_uai::{
    encode_to_string, parse_results, read_results, write_model, FormatError, ProcessOutput,
    ProcessRunner, ReasonerError, Solution, SystemProcessRunner, UaiReasoner,
};

// Rounding
pub use blockmrf_rounding::{
    round, GreedyRounding, RoundingReport, RoundingStrategy, StochasticRounding,
};

mod logging;
mod pipeline;


pub use logging::init_logging;
pub use pipeline::{infer, infer_with_runner, run_reasoner, Inference};

pub mod prelude {
    pub use super::{
        BlockModel, CompatibilityRule, ConstraintBlockerStore, LinearRule, LogicalRule,
        VariableId,
    };
    pub use super::{ReasonerConfig, RoundingConfig, UaiTask};
    pub use super::{infer, round, run_reasoner, Inference, RoundingReport, Solution};
}
