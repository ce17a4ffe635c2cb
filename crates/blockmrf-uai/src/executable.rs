//! External solver invocation.
//!
//! The solver is called as `executable model-file evidence-file seed task`
//! from the configured working directory. A "no evidence" file holding the
//! single byte `0` exists only for the duration of the call.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use blockmrf_config::UaiConfig;
use tracing::{debug, info};

use crate::error::{ReasonerError, Result};

/// Captured result of a finished child process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    /// Exit code, `None` if the process was killed by a signal.
    pub status: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Launches a program and waits for it to finish.
pub trait ProcessRunner: Send + Sync {
    fn run(&self, program: &Path, args: &[OsString], working_dir: &Path)
        -> io::Result<ProcessOutput>;
}

/// Runs programs with [`std::process::Command`], blocking the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(
        &self,
        program: &Path,
        args: &[OsString],
        working_dir: &Path,
    ) -> io::Result<ProcessOutput> {
        let output = Command::new(program)
            .args(args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        Ok(ProcessOutput {
            status: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Evidence file that is deleted when the guard goes out of scope.
///
/// Call [`remove`](Self::remove) to observe deletion errors; `Drop` removes
/// the file silently otherwise.
#[derive(Debug)]
pub struct EvidenceFile {
    path: PathBuf,
    removed: bool,
}

impl EvidenceFile {
    /// Writes the single byte `0` to `path`.
    pub fn create(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        fs::write(&path, b"0")?;
        Ok(Self {
            path,
            removed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes the file now.
    pub fn remove(mut self) -> io::Result<()> {
        self.removed = true;
        fs::remove_file(&self.path)
    }
}

impl Drop for EvidenceFile {
    fn drop(&mut self) {
        if !self.removed {
            let _ = fs::remove_file(&self.path);
        }
    }
}

/// Arguments passed to the solver, relative to the working directory.
pub fn solver_args(config: &UaiConfig) -> Vec<OsString> {
    vec![
        config.model_file.clone().into_os_string(),
        config.evidence_file.clone().into_os_string(),
        OsString::from(config.seed.to_string()),
        OsString::from(config.task.as_str()),
    ]
}

/// Creates the evidence file, runs the solver, and deletes the evidence
/// file again whatever the outcome.
///
/// An invocation failure takes precedence over a failure to delete the
/// evidence file.
pub fn call_solver<R: ProcessRunner + ?Sized>(
    runner: &R,
    config: &UaiConfig,
) -> Result<ProcessOutput> {
    let executable = config
        .executable
        .as_deref()
        .ok_or(ReasonerError::MissingExecutable)?;

    let evidence = EvidenceFile::create(config.evidence_path())
        .map_err(ReasonerError::io("writing evidence file"))?;

    let invocation = invoke(runner, executable, config);
    let cleanup = evidence.remove();

    let output = invocation?;
    cleanup.map_err(ReasonerError::io("deleting evidence file"))?;
    Ok(output)
}

fn invoke<R: ProcessRunner + ?Sized>(
    runner: &R,
    executable: &Path,
    config: &UaiConfig,
) -> Result<ProcessOutput> {
    let args = solver_args(config);
    info!(
        event = "solver_invoke",
        executable = %executable.display(),
        task = %config.task,
        seed = config.seed,
    );

    let output = runner
        .run(executable, &args, &config.working_dir)
        .map_err(ReasonerError::io(format!(
            "launching {}",
            executable.display()
        )))?;

    debug!(event = "solver_stdout", output = %output.stdout.trim_end());
    debug!(event = "solver_stderr", output = %output.stderr.trim_end());
    info!(event = "solver_exit", status = ?output.status, success = output.success);

    if !output.success {
        return Err(ReasonerError::ExecutableFailed {
            status: output.status,
            stderr: output.stderr.trim_end().to_string(),
        });
    }
    Ok(output)
}
