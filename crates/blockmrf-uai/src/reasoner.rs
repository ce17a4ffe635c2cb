//! Reasoner that runs inference through an external UAI solver.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};

use blockmrf_config::UaiConfig;
use blockmrf_core::TermStore;
use tracing::{info, warn};

use crate::decode::{read_blocker_results, Solution};
use crate::encode::write_blocker_model;
use crate::error::{ReasonerError, Result};
use crate::executable::{call_solver, ProcessRunner, SystemProcessRunner};

/// Performs inference on a block model as a Boolean MRF using a
/// command-line executable that reads the UAI format.
///
/// # Example
///
/// ```no_run
/// use blockmrf_config::{UaiConfig, UaiTask};
/// use blockmrf_core::{BlockModel, ConstraintBlockerStore};
/// use blockmrf_uai::UaiReasoner;
///
/// let config = UaiConfig {
///     executable: Some("/opt/uai/daoopt".into()),
///     task: UaiTask::Mpe,
///     ..UaiConfig::default()
/// };
/// let mut store = ConstraintBlockerStore::new(BlockModel::new());
/// UaiReasoner::new(config).optimize(&mut store).unwrap();
/// ```
#[derive(Debug)]
pub struct UaiReasoner<R: ProcessRunner = SystemProcessRunner> {
    config: UaiConfig,
    runner: R,
}

impl UaiReasoner<SystemProcessRunner> {
    pub fn new(config: UaiConfig) -> Self {
        Self::with_runner(config, SystemProcessRunner)
    }
}

impl<R: ProcessRunner> UaiReasoner<R> {
    /// Creates a reasoner that launches the solver through `runner`.
    pub fn with_runner(config: UaiConfig, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &UaiConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Writes the model, runs the solver and loads its answer into `store`.
    ///
    /// # Errors
    ///
    /// - [`ReasonerError::Precondition`] if `store` has no block structure
    /// - [`ReasonerError::ExecutableFailed`] on a non-zero exit status
    /// - [`ReasonerError::MissingOutput`] if no results file was written
    /// - [`ReasonerError::Format`] if the results cannot be decoded
    pub fn optimize(&self, store: &mut dyn TermStore) -> Result<Solution> {
        let blocker = store
            .as_constraint_blocker_mut()
            .ok_or_else(ReasonerError::not_blocker)?;

        let model_path = self.config.model_path();
        let file = File::create(&model_path).map_err(ReasonerError::io(format!(
            "creating {}",
            model_path.display()
        )))?;
        let mut writer = BufWriter::new(file);
        write_blocker_model(&mut writer, blocker)?;
        writer
            .flush()
            .map_err(ReasonerError::io("flushing model file"))?;
        drop(writer);

        // a results file from an earlier run must not stand in for this one
        let results_path = self.config.results_path();
        match fs::remove_file(&results_path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(ReasonerError::io(format!(
                    "removing {}",
                    results_path.display()
                ))(e))
            }
        }

        call_solver(&self.runner, &self.config)?;

        let results = match File::open(&results_path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ReasonerError::MissingOutput(results_path));
            }
            Err(e) => {
                return Err(ReasonerError::io(format!(
                    "opening {}",
                    results_path.display()
                ))(e))
            }
        };
        let solution = read_blocker_results(BufReader::new(results), self.config.task, blocker)?;

        if self.config.cleanup_model_files {
            for path in [&model_path, &results_path] {
                if let Err(e) = fs::remove_file(path) {
                    warn!(event = "cleanup_failed", path = %path.display(), error = %e);
                }
            }
        }

        info!(event = "optimize_end", task = %self.config.task);
        Ok(solution)
    }
}
