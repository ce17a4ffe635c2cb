//! Entry points that run the solver and round its answer.

use blockmrf_config::ReasonerConfig;
use blockmrf_core::ConstraintBlockerStore;
use blockmrf_rounding::{round, RoundingReport};
use blockmrf_uai::error::Result;
use blockmrf_uai::{ProcessRunner, Solution, SystemProcessRunner, UaiReasoner};
use tracing::info;

/// Outcome of [`infer`].
#[derive(Debug, Clone, PartialEq)]
pub struct Inference {
    /// Answer read back from the solver.
    pub solution: Solution,

    /// Present when the solver returned marginals that were then rounded.
    pub rounding: Option<RoundingReport>,
}

/// Runs inference with `blockmrf.toml` from the current directory, falling
/// back to defaults when the file is missing or invalid.
pub fn run_reasoner(store: &mut ConstraintBlockerStore) -> Result<Inference> {
    let config = ReasonerConfig::load("blockmrf.toml").unwrap_or_default();
    infer(store, &config)
}

/// Runs the configured UAI solver on `store`.
///
/// An MPE answer is already discrete and is loaded as is. A MAR answer
/// leaves marginals on the model, which are then rounded with
/// `config.rounding`.
pub fn infer(store: &mut ConstraintBlockerStore, config: &ReasonerConfig) -> Result<Inference> {
    infer_with_runner(store, config, SystemProcessRunner)
}

/// Same as [`infer`], launching the solver through `runner`.
pub fn infer_with_runner<R: ProcessRunner>(
    store: &mut ConstraintBlockerStore,
    config: &ReasonerConfig,
    runner: R,
) -> Result<Inference> {
    let reasoner = UaiReasoner::with_runner(config.uai.clone(), runner);
    let solution = reasoner.optimize(store)?;

    let rounding = match solution {
        Solution::Mpe(_) => None,
        Solution::Mar(_) => Some(round(store, &config.rounding)?),
    };

    info!(
        event = "inference_end",
        task = %config.uai.task,
        rounded = rounding.is_some(),
    );
    Ok(Inference { solution, rounding })
}
