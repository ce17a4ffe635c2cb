//! Configuration system for blockmrf.
//!
//! Load reasoner and rounding configuration from TOML or YAML files to
//! choose the external solver, its task and seed, and the rounding
//! algorithm without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use blockmrf_config::{ReasonerConfig, RoundingAlgorithm, UaiTask};
//!
//! let config = ReasonerConfig::from_toml_str(r#"
//!     [uai]
//!     executable = "/opt/uai/solver"
//!     task = "mar"
//!     seed = 7
//!
//!     [rounding]
//!     algorithm = "stochastic"
//!     random_seed = 42
//! "#).unwrap();
//!
//! assert_eq!(config.uai.task, UaiTask::Mar);
//! assert_eq!(config.uai.task.as_str(), "MAR");
//! assert_eq!(config.rounding.algorithm, RoundingAlgorithm::Stochastic);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use blockmrf_config::ReasonerConfig;
//!
//! let config = ReasonerConfig::load("blockmrf.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ReasonerConfig {
    /// External UAI solver settings.
    #[serde(default)]
    pub uai: UaiConfig,

    /// Rounding engine settings.
    #[serde(default)]
    pub rounding: RoundingConfig,
}

impl ReasonerConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or fails
    /// validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot express as types.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.uai.model_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("uai.model_file must not be empty".into()));
        }
        if self.uai.evidence_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "uai.evidence_file must not be empty".into(),
            ));
        }
        if self.uai.model_file == self.uai.evidence_file {
            return Err(ConfigError::Invalid(
                "uai.model_file and uai.evidence_file must differ".into(),
            ));
        }
        Ok(())
    }

    /// Sets the solver executable.
    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.uai.executable = Some(executable.into());
        self
    }

    /// Sets the inference task.
    pub fn with_task(mut self, task: UaiTask) -> Self {
        self.uai.task = task;
        self
    }

    /// Sets the seed passed to the external solver.
    pub fn with_solver_seed(mut self, seed: i64) -> Self {
        self.uai.seed = seed;
        self
    }

    /// Sets the directory the model, evidence and results files live in.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.uai.working_dir = dir.into();
        self
    }

    /// Sets the rounding algorithm.
    pub fn with_rounding(mut self, algorithm: RoundingAlgorithm) -> Self {
        self.rounding.algorithm = algorithm;
        self
    }

    /// Sets the rounding random seed.
    pub fn with_rounding_seed(mut self, seed: u64) -> Self {
        self.rounding.random_seed = Some(seed);
        self
    }
}

/// Inference task understood by UAI solvers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UaiTask {
    /// Most probable explanation (the mode).
    #[default]
    Mpe,

    /// Marginal probability that each variable takes each state.
    Mar,
}

impl UaiTask {
    /// Name written on the command line and expected as the results header.
    pub fn as_str(&self) -> &'static str {
        match self {
            UaiTask::Mpe => "MPE",
            UaiTask::Mar => "MAR",
        }
    }
}

impl fmt::Display for UaiTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// External UAI solver configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct UaiConfig {
    /// Path to the solver executable.
    pub executable: Option<PathBuf>,

    /// Inference task.
    pub task: UaiTask,

    /// Seed passed as the third solver argument.
    pub seed: i64,

    /// Directory holding the model, evidence and results files.
    pub working_dir: PathBuf,

    /// Model file name, relative to `working_dir`.
    pub model_file: PathBuf,

    /// Evidence file name, relative to `working_dir`.
    pub evidence_file: PathBuf,

    /// Remove the model and results files after a successful run.
    pub cleanup_model_files: bool,
}

impl Default for UaiConfig {
    fn default() -> Self {
        Self {
            executable: None,
            task: UaiTask::default(),
            seed: 0,
            working_dir: PathBuf::from("."),
            model_file: PathBuf::from("model.uai"),
            evidence_file: PathBuf::from("no.evid"),
            cleanup_model_files: false,
        }
    }
}

impl UaiConfig {
    pub fn model_path(&self) -> PathBuf {
        self.working_dir.join(&self.model_file)
    }

    pub fn evidence_path(&self) -> PathBuf {
        self.working_dir.join(&self.evidence_file)
    }

    /// Results file written by the solver: `<model-file>.<TASK>`.
    pub fn results_path(&self) -> PathBuf {
        let mut name = self.model_file.clone().into_os_string();
        name.push(".");
        name.push(self.task.as_str());
        self.working_dir.join(name)
    }
}

/// Rounding algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingAlgorithm {
    /// Greedy descending-order rounding scored against ground rules.
    #[default]
    Greedy,

    /// Independent Bernoulli rounding.
    Stochastic,
}

/// Which value greedy rounding keeps when both candidates score the same.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep `1.0`, the value tried last.
    #[default]
    PreferOne,

    /// Keep `0.0`.
    PreferZero,
}

/// Rounding engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RoundingConfig {
    /// Algorithm to run.
    pub algorithm: RoundingAlgorithm,

    /// Random seed for stochastic rounding; OS entropy when unset.
    pub random_seed: Option<u64>,

    /// Round independent components of the rule graph in parallel.
    pub parallel: bool,

    /// Greedy tie-break.
    pub tie_break: TieBreak,
}

impl Default for RoundingConfig {
    fn default() -> Self {
        Self {
            algorithm: RoundingAlgorithm::default(),
            random_seed: None,
            parallel: true,
            tie_break: TieBreak::default(),
        }
    }
}
