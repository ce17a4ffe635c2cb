//! Shared test fixtures for blockmrf crates.
//!
//! This crate provides small models and rule types for testing.
//! It depends only on `blockmrf-core` so every other crate can use it as a
//! dev-dependency without cycles.
//!
//! - [`rules`] - rules with fixed or easily predicted incompatibility
//! - [`models`] - hand-sized block models
//! - [`coloring`] - graph coloring as exactly-one blocks
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! blockmrf-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use blockmrf_test::models::single_exact_block;
//! use blockmrf_test::rules::FixedRule;
//! ```

pub mod coloring;
pub mod models;
pub mod rules;

pub use coloring::coloring_store;
pub use models::{mixed_store, single_exact_block};
pub use rules::{FixedRule, SumRule};
