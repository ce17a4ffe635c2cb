//! Graph coloring fixture.
//!
//! Each node is an exactly-one block over the colors; each edge contributes
//! one clause per color forbidding both endpoints from taking it.

use blockmrf_core::{BlockModel, ConstraintBlockerStore, LogicalRule, VariableId};

/// Variable for `node` taking `color`.
pub fn color_variable(colors: usize, node: usize, color: usize) -> VariableId {
    VariableId(node * colors + color)
}

/// Builds a coloring store over `nodes` nodes with all values at `initial`.
pub fn coloring_store(
    nodes: usize,
    colors: usize,
    edges: &[(usize, usize)],
    initial: f64,
) -> ConstraintBlockerStore {
    let mut model = BlockModel::new();
    for node in 0..nodes {
        model
            .add_block_with_values(
                (0..colors).map(|c| (format!("color({node},{c})"), initial)),
                true,
            )
            .expect("fixture block is valid");
    }

    let mut store = ConstraintBlockerStore::new(model);
    for &(u, v) in edges {
        for color in 0..colors {
            store
                .add_rule(
                    LogicalRule::new(1.0)
                        .with_negative(color_variable(colors, u, color))
                        .with_negative(color_variable(colors, v, color)),
                )
                .expect("fixture rule is valid");
        }
    }
    store
}
