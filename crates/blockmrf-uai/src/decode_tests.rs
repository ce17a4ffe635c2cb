//! Tests for the UAI results reader.

use blockmrf_core::{BlockModel, ConstraintBlockerStore, GroundRuleStore};
use blockmrf_test::models::mixed_store;

use crate::decode::{parse_results, read_blocker_results, read_results, Solution};
use crate::error::{FormatError, ReasonerError};
use crate::UaiTask;

fn format_error(result: Result<Solution, ReasonerError>) -> FormatError {
    match result {
        Err(ReasonerError::Format(e)) => e,
        other => panic!("expected format error, got {other:?}"),
    }
}

#[test]
fn test_decode_mpe() {
    let mut store = mixed_store();
    let solution =
        read_blocker_results("MPE\n1\n3 1 3 1\n".as_bytes(), UaiTask::Mpe, &mut store).unwrap();

    assert_eq!(solution, Solution::Mpe(vec![1, 3, 1]));
    assert_eq!(
        store.model().snapshot(),
        vec![0.0, 1.0, 0.0, 0.0, 1.0, 1.0]
    );
}

#[test]
fn test_decode_overwrites_previous_state() {
    let mut store = mixed_store();
    for id in store.model().variable_ids() {
        store.model().set_value(id, 0.5).unwrap();
    }
    read_blocker_results("MPE\n1\n3 0 2 0\n".as_bytes(), UaiTask::Mpe, &mut store).unwrap();
    assert_eq!(
        store.model().snapshot(),
        vec![1.0, 0.0, 0.0, 1.0, 0.0, 0.0]
    );
}

#[test]
fn test_rejects_wrong_task() {
    let err = format_error(parse_results("MAR\n1\n1 0\n".as_bytes(), UaiTask::Mpe));
    assert_eq!(
        err,
        FormatError::TaskMismatch {
            expected: "MPE".into(),
            actual: "MAR".into(),
        }
    );
}

#[test]
fn test_rejects_multiple_assignments() {
    let err = format_error(parse_results("MPE\n2\n1 0\n1 1\n".as_bytes(), UaiTask::Mpe));
    assert_eq!(
        err,
        FormatError::MultipleAssignments {
            line: 2,
            marker: "2".into(),
        }
    );

    let err = format_error(parse_results(
        "MPE\n1\n1 0\n0\n".as_bytes(),
        UaiTask::Mpe,
    ));
    assert!(matches!(err, FormatError::MultipleAssignments { line: 4, .. }));
}

#[test]
fn test_last_solution_wins() {
    let text = "MPE\n1\n3 0 0 0\n1\n3 1 1 0\n1\n3 1 2 1\n";
    let mut store = mixed_store();
    let solution = read_blocker_results(text.as_bytes(), UaiTask::Mpe, &mut store).unwrap();

    assert_eq!(solution, Solution::Mpe(vec![1, 2, 1]));
    assert_eq!(
        store.model().snapshot(),
        vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0]
    );
}

#[test]
fn test_blank_lines_and_crlf_tolerated() {
    let text = "MPE\r\n1\r\n3 1 0 0\r\n\r\n1\r\n3 0 0 1\r\n\r\n";
    let solution = parse_results(text.as_bytes(), UaiTask::Mpe).unwrap();
    assert_eq!(solution, Solution::Mpe(vec![0, 0, 1]));
}

#[test]
fn test_missing_assignment() {
    let err = format_error(parse_results("MPE\n1\n".as_bytes(), UaiTask::Mpe));
    assert_eq!(err, FormatError::MissingAssignment { line: 3 });

    let err = format_error(parse_results("MPE\n".as_bytes(), UaiTask::Mpe));
    assert_eq!(err, FormatError::MissingAssignment { line: 2 });

    let err = format_error(parse_results("".as_bytes(), UaiTask::Mpe));
    assert_eq!(err, FormatError::EmptyResults);
}

#[test]
fn test_invalid_integer() {
    let err = format_error(parse_results("MPE\n1\n2 0 x\n".as_bytes(), UaiTask::Mpe));
    assert_eq!(
        err,
        FormatError::InvalidInteger {
            line: 3,
            token: "x".into(),
        }
    );

    let err = format_error(parse_results("MPE\n1\n2 0 -1\n".as_bytes(), UaiTask::Mpe));
    assert!(matches!(err, FormatError::InvalidInteger { .. }));
}

#[test]
fn test_assignment_shape_checked_before_writing() {
    let mut store = mixed_store();
    let before = store.model().snapshot();

    let err = format_error(read_blocker_results(
        "MPE\n1\n4 0 0 0 0\n".as_bytes(),
        UaiTask::Mpe,
        &mut store,
    ));
    assert_eq!(err, FormatError::IndexOutOfRange { index: 3, len: 3 });

    let err = format_error(read_blocker_results(
        "MPE\n1\n2 0 0\n".as_bytes(),
        UaiTask::Mpe,
        &mut store,
    ));
    assert_eq!(
        err,
        FormatError::AssignmentLength {
            expected: 3,
            actual: 2,
        }
    );

    // block 0 is exactly-one with two members, so category 2 does not exist
    let err = format_error(read_blocker_results(
        "MPE\n1\n3 0 0 0\n1\n3 2 0 0\n".as_bytes(),
        UaiTask::Mpe,
        &mut store,
    ));
    assert_eq!(
        err,
        FormatError::CategoryOutOfRange {
            variable: 0,
            category: 2,
            cardinality: 2,
        }
    );

    assert_eq!(store.model().snapshot(), before);
}

#[test]
fn test_requires_constraint_blocker() {
    let mut plain = GroundRuleStore::new();
    let err = read_results("MPE\n1\n0\n".as_bytes(), UaiTask::Mpe, &mut plain).unwrap_err();
    assert!(matches!(err, ReasonerError::Precondition(_)));
}

#[test]
fn test_decode_mar() {
    let mut model = BlockModel::new();
    model.add_block(["a0", "a1"], true).unwrap();
    model.add_block(["b0"], false).unwrap();
    let mut store = ConstraintBlockerStore::new(model);

    let text = "MAR\n1\n2 2 0.25 0.75 2 0.9 0.1\n";
    let solution = read_blocker_results(text.as_bytes(), UaiTask::Mar, &mut store).unwrap();

    assert_eq!(
        solution,
        Solution::Mar(vec![vec![0.25, 0.75], vec![0.9, 0.1]])
    );
    // b0 is category 1 of an optional block
    assert_eq!(store.model().snapshot(), vec![0.25, 0.75, 0.1]);
}

#[test]
fn test_mar_cardinality_mismatch() {
    let mut model = BlockModel::new();
    model.add_block(["a0", "a1"], true).unwrap();
    let mut store = ConstraintBlockerStore::new(model);

    let err = format_error(read_blocker_results(
        "MAR\n1\n1 3 0.2 0.3 0.5\n".as_bytes(),
        UaiTask::Mar,
        &mut store,
    ));
    assert_eq!(
        err,
        FormatError::CardinalityMismatch {
            variable: 0,
            expected: 2,
            actual: 3,
        }
    );
}

#[test]
fn test_mar_malformed() {
    let err = format_error(parse_results(
        "MAR\n1\n1 2 0.5\n".as_bytes(),
        UaiTask::Mar,
    ));
    assert!(matches!(err, FormatError::MalformedMarginals { line: 3, .. }));

    let err = format_error(parse_results(
        "MAR\n1\n1 2 0.5 nope\n".as_bytes(),
        UaiTask::Mar,
    ));
    assert_eq!(
        err,
        FormatError::InvalidReal {
            line: 3,
            token: "nope".into(),
        }
    );

    let err = format_error(parse_results(
        "MAR\n1\n1 1 1.0 7\n".as_bytes(),
        UaiTask::Mar,
    ));
    assert!(matches!(err, FormatError::MalformedMarginals { .. }));
}
