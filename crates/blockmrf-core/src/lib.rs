//! blockmrf Core - block-structured Boolean models and ground rules
//!
//! This crate provides the data shared by the encoder, decoder and rounding
//! engine:
//! - [`BlockModel`]: an arena of Boolean variables grouped into blocks
//! - [`CompatibilityRule`]: weighted rules with an incompatibility function
//! - [`ConstraintBlockerStore`]: a block model paired with its ground rules

pub mod error;
pub mod model;
pub mod rule;
pub mod store;

pub use error::ModelError;
pub use model::{Block, BlockId, BlockModel, TruthValues, Variable, VariableId};
pub use rule::{Atom, Comparator, CompatibilityRule, LinearRule, LogicalRule};
pub use store::{ConstraintBlockerStore, GroundRuleStore, TermStore};
