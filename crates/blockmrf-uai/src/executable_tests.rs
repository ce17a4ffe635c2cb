//! Tests for solver invocation and the reasoner round trip.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use blockmrf_config::{UaiConfig, UaiTask};
use blockmrf_core::GroundRuleStore;
use blockmrf_test::models::mixed_store;
use tempfile::TempDir;

use crate::decode::Solution;
use crate::error::ReasonerError;
use crate::executable::{
    call_solver, solver_args, EvidenceFile, ProcessOutput, ProcessRunner, SystemProcessRunner,
};
use crate::reasoner::UaiReasoner;

/// What the fake solver does when invoked.
#[derive(Debug, Clone)]
enum Behavior {
    /// Writes the given text to `<model>.<task>` and exits 0.
    Answer(String),
    /// Exits with the given code.
    Fail(i32),
    /// Exits 0 without writing results.
    Silent,
    /// Cannot be launched at all.
    Unlaunchable,
    /// Deletes the evidence file itself, then exits with code 1.
    StealEvidenceAndFail,
}

#[derive(Debug)]
struct FakeRunner {
    behavior: Behavior,
    calls: Mutex<Vec<Vec<OsString>>>,
    saw_evidence: Mutex<Option<String>>,
    saw_model: Mutex<Option<String>>,
}

impl FakeRunner {
    fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
            saw_evidence: Mutex::new(None),
            saw_model: Mutex::new(None),
        }
    }
}

impl ProcessRunner for FakeRunner {
    fn run(
        &self,
        _program: &Path,
        args: &[OsString],
        working_dir: &Path,
    ) -> io::Result<ProcessOutput> {
        self.calls.lock().unwrap().push(args.to_vec());
        let model = working_dir.join(&args[0]);
        let evidence = working_dir.join(&args[1]);
        *self.saw_evidence.lock().unwrap() = fs::read_to_string(&evidence).ok();
        *self.saw_model.lock().unwrap() = fs::read_to_string(&model).ok();

        match &self.behavior {
            Behavior::Answer(text) => {
                let mut results = model.into_os_string();
                results.push(".");
                results.push(&args[3]);
                fs::write(PathBuf::from(results), text)?;
                Ok(ProcessOutput {
                    status: Some(0),
                    success: true,
                    ..ProcessOutput::default()
                })
            }
            Behavior::Fail(code) => Ok(ProcessOutput {
                status: Some(*code),
                success: false,
                stderr: "bad model\n".into(),
                ..ProcessOutput::default()
            }),
            Behavior::Silent => Ok(ProcessOutput {
                status: Some(0),
                success: true,
                ..ProcessOutput::default()
            }),
            Behavior::Unlaunchable => Err(io::Error::new(io::ErrorKind::NotFound, "no such file")),
            Behavior::StealEvidenceAndFail => {
                fs::remove_file(&evidence)?;
                Ok(ProcessOutput {
                    status: Some(1),
                    success: false,
                    ..ProcessOutput::default()
                })
            }
        }
    }
}

fn config_in(dir: &TempDir, task: UaiTask) -> UaiConfig {
    UaiConfig {
        executable: Some(PathBuf::from("uai-solver")),
        task,
        seed: 5,
        working_dir: dir.path().to_path_buf(),
        ..UaiConfig::default()
    }
}

#[test]
fn test_solver_args() {
    let config = UaiConfig {
        task: UaiTask::Mar,
        seed: 42,
        ..UaiConfig::default()
    };
    let args: Vec<String> = solver_args(&config)
        .into_iter()
        .map(|a| a.into_string().unwrap())
        .collect();
    assert_eq!(args, ["model.uai", "no.evid", "42", "MAR"]);
}

#[test]
fn test_optimize_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir, UaiTask::Mpe);
    let runner = FakeRunner::new(Behavior::Answer("MPE\n1\n3 1 1 1\n".into()));
    let reasoner = UaiReasoner::with_runner(config.clone(), runner);

    let mut store = mixed_store();
    let solution = reasoner.optimize(&mut store).unwrap();

    assert_eq!(solution, Solution::Mpe(vec![1, 1, 1]));
    assert_eq!(
        store.model().snapshot(),
        vec![0.0, 1.0, 1.0, 0.0, 0.0, 1.0]
    );

    let runner = reasoner.runner();
    let calls = runner.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0][2], OsString::from("5"));
    assert_eq!(calls[0][3], OsString::from("MPE"));
    assert_eq!(runner.saw_evidence.lock().unwrap().as_deref(), Some("0"));
    assert!(runner
        .saw_model
        .lock()
        .unwrap()
        .as_deref()
        .unwrap()
        .starts_with("MARKOV\n3\n2 4 2\n"));

    assert!(!config.evidence_path().exists());
    assert!(config.model_path().exists());
    assert!(config.results_path().exists());
}

#[test]
fn test_cleanup_model_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = UaiConfig {
        cleanup_model_files: true,
        ..config_in(&dir, UaiTask::Mpe)
    };
    let runner = FakeRunner::new(Behavior::Answer("MPE\n1\n3 0 0 0\n".into()));
    let reasoner = UaiReasoner::with_runner(config.clone(), runner);

    reasoner.optimize(&mut mixed_store()).unwrap();
    assert!(!config.model_path().exists());
    assert!(!config.results_path().exists());
}

#[test]
fn test_nonzero_exit_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir, UaiTask::Mpe);
    let reasoner = UaiReasoner::with_runner(config.clone(), FakeRunner::new(Behavior::Fail(2)));

    let err = reasoner.optimize(&mut mixed_store()).unwrap_err();
    match err {
        ReasonerError::ExecutableFailed { status, stderr } => {
            assert_eq!(status, Some(2));
            assert_eq!(stderr, "bad model");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!config.evidence_path().exists());
}

#[test]
fn test_missing_output_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir, UaiTask::Mar);
    let reasoner = UaiReasoner::with_runner(config.clone(), FakeRunner::new(Behavior::Silent));

    let err = reasoner.optimize(&mut mixed_store()).unwrap_err();
    assert!(matches!(err, ReasonerError::MissingOutput(ref p) if *p == config.results_path()));
    assert!(!config.evidence_path().exists());
}

#[test]
fn test_leftover_results_are_not_reused() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir, UaiTask::Mpe);
    fs::write(config.results_path(), "MPE\n1\n3 1 3 1\n").unwrap();
    let reasoner = UaiReasoner::with_runner(config.clone(), FakeRunner::new(Behavior::Silent));

    let mut store = mixed_store();
    let before = store.model().snapshot();
    let err = reasoner.optimize(&mut store).unwrap_err();

    assert!(matches!(err, ReasonerError::MissingOutput(ref p) if *p == config.results_path()));
    assert!(!config.results_path().exists());
    assert_eq!(store.model().snapshot(), before);
}

#[test]
fn test_launch_failure_removes_evidence() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir, UaiTask::Mpe);
    let runner = FakeRunner::new(Behavior::Unlaunchable);

    let err = call_solver(&runner, &config).unwrap_err();
    assert!(matches!(err, ReasonerError::Io { .. }));
    assert!(!config.evidence_path().exists());
}

#[test]
fn test_invocation_error_takes_precedence_over_cleanup() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir, UaiTask::Mpe);
    let runner = FakeRunner::new(Behavior::StealEvidenceAndFail);

    // deleting the evidence file fails too, but the exit status is reported
    let err = call_solver(&runner, &config).unwrap_err();
    assert!(matches!(err, ReasonerError::ExecutableFailed { status: Some(1), .. }));
}

#[test]
fn test_missing_executable() {
    let dir = tempfile::tempdir().unwrap();
    let config = UaiConfig {
        executable: None,
        ..config_in(&dir, UaiTask::Mpe)
    };
    let runner = FakeRunner::new(Behavior::Silent);

    let err = call_solver(&runner, &config).unwrap_err();
    assert!(matches!(err, ReasonerError::MissingExecutable));
    assert!(runner.calls.lock().unwrap().is_empty());
    assert!(!config.evidence_path().exists());
}

#[test]
fn test_optimize_requires_constraint_blocker() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir, UaiTask::Mpe);
    let runner = FakeRunner::new(Behavior::Silent);
    let reasoner = UaiReasoner::with_runner(config.clone(), runner);

    let err = reasoner.optimize(&mut GroundRuleStore::new()).unwrap_err();
    assert!(matches!(err, ReasonerError::Precondition(_)));
    assert!(!config.model_path().exists());
}

#[test]
fn test_evidence_file_guard() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no.evid");

    {
        let guard = EvidenceFile::create(&path).unwrap();
        assert_eq!(fs::read(guard.path()).unwrap(), b"0");
    }
    assert!(!path.exists());

    let guard = EvidenceFile::create(&path).unwrap();
    guard.remove().unwrap();
    assert!(!path.exists());
}

#[cfg(unix)]
#[test]
fn test_system_runner_captures_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = SystemProcessRunner
        .run(
            Path::new("sh"),
            &["-c".into(), "echo solved; echo oops >&2; exit 3".into()],
            dir.path(),
        )
        .unwrap();

    assert_eq!(output.status, Some(3));
    assert!(!output.success);
    assert_eq!(output.stdout, "solved\n");
    assert_eq!(output.stderr, "oops\n");
}
