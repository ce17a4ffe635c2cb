//! Tests for stochastic rounding.

use blockmrf_config::{RoundingAlgorithm, RoundingConfig};
use blockmrf_core::{BlockModel, ConstraintBlockerStore};
use blockmrf_test::coloring::coloring_store;

use crate::stochastic::StochasticRounding;
use crate::{round, RoundingStrategy};

fn uniform_store(count: usize, value: f64) -> ConstraintBlockerStore {
    let mut model = BlockModel::new();
    for i in 0..count {
        model.add_variable(format!("x{i}"), value).unwrap();
    }
    ConstraintBlockerStore::new(model)
}

#[test]
fn test_seeded_rounding_is_reproducible() {
    let left = coloring_store(4, 3, &[(0, 1), (1, 2), (2, 3)], 0.4);
    let right = coloring_store(4, 3, &[(0, 1), (1, 2), (2, 3)], 0.4);

    let a = StochasticRounding::new(Some(7)).round(&left).unwrap();
    let b = StochasticRounding::new(Some(7)).round(&right).unwrap();

    assert_eq!(a, b);
    assert_eq!(left.model().snapshot(), right.model().snapshot());
}

#[test]
fn test_output_is_discrete() {
    let store = coloring_store(3, 3, &[(0, 1)], 0.5);
    let report = StochasticRounding::new(Some(1)).round(&store).unwrap();

    let snapshot = store.model().snapshot();
    assert!(snapshot.iter().all(|&v| v == 0.0 || v == 1.0));
    assert_eq!(report.rounded, 9);
    assert_eq!(report.components, 0);
    assert_eq!(
        report.ones,
        snapshot.iter().filter(|&&v| v == 1.0).count()
    );
}

#[test]
fn test_certain_values_survive() {
    let ones = uniform_store(50, 1.0);
    let report = StochasticRounding::new(Some(3)).round(&ones).unwrap();
    assert_eq!(report.ones, 50);

    let zeros = uniform_store(50, 0.0);
    let report = StochasticRounding::new(Some(3)).round(&zeros).unwrap();
    assert_eq!(report.ones, 0);
}

#[test]
fn test_frequency_follows_value() {
    let store = uniform_store(2000, 0.3);
    let report = StochasticRounding::new(Some(11)).round(&store).unwrap();
    assert!(
        (450..=750).contains(&report.ones),
        "ones = {}",
        report.ones
    );
}

#[test]
fn test_unseeded_rounding_runs() {
    let store = uniform_store(10, 0.5);
    let report = StochasticRounding::default().round(&store).unwrap();
    assert_eq!(report.rounded, 10);
}

#[test]
fn test_dispatch_from_config() {
    let config = RoundingConfig {
        algorithm: RoundingAlgorithm::Stochastic,
        random_seed: Some(5),
        ..RoundingConfig::default()
    };

    let left = uniform_store(20, 0.6);
    let right = uniform_store(20, 0.6);
    let a = round(&left, &config).unwrap();
    let b = StochasticRounding::new(Some(5)).round(&right).unwrap();

    assert_eq!(a, b);
    assert_eq!(left.model().snapshot(), right.model().snapshot());
}
