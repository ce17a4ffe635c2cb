//! Small hand-built stores.

use blockmrf_core::{BlockModel, ConstraintBlockerStore, VariableId};

use crate::rules::{FixedRule, SumRule};

/// One exactly-one block `{a0, a1}` and one rule of weight `1.0` with
/// incompatibility `0` over `a0`.
pub fn single_exact_block() -> ConstraintBlockerStore {
    let mut model = BlockModel::new();
    model
        .add_block(["a0", "a1"], true)
        .expect("fixture block is valid");
    let mut store = ConstraintBlockerStore::new(model);
    store
        .add_rule(FixedRule::new(1.0, &[VariableId(0)], 0.0))
        .expect("fixture rule is valid");
    store
}

/// Three blocks and three rules:
///
/// - block 0: `{a0, a1}`, exactly one (cardinality 2), variables 0..2
/// - block 1: `{b0, b1, b2}`, zero or one (cardinality 4), variables 2..5
/// - block 2: `{c}`, zero or one (cardinality 2), variable 5
///
/// - rule 0: [`SumRule`] over `c` and `a1`, listed out of block order
/// - rule 1: [`SumRule`] over `b2`, `a0` and `b0` (b-block referenced twice)
/// - rule 2: [`FixedRule`] over no variables
pub fn mixed_store() -> ConstraintBlockerStore {
    let mut model = BlockModel::new();
    model
        .add_block(["a0", "a1"], true)
        .expect("fixture block is valid");
    model
        .add_block(["b0", "b1", "b2"], false)
        .expect("fixture block is valid");
    model
        .add_block(["c"], false)
        .expect("fixture block is valid");

    let mut store = ConstraintBlockerStore::new(model);
    store
        .add_rule(SumRule::new(1.0, &[(VariableId(5), 1.0), (VariableId(1), 2.0)]))
        .expect("fixture rule is valid");
    store
        .add_rule(SumRule::new(
            0.5,
            &[(VariableId(4), 1.0), (VariableId(0), 10.0), (VariableId(2), 100.0)],
        ))
        .expect("fixture rule is valid");
    store
        .add_rule(FixedRule::new(2.0, &[], 0.5))
        .expect("fixture rule is valid");
    store
}
