//! Connected components of the rule hypergraph.
//!
//! Two variables are connected when some ground rule references both.
//! Rounding a variable only rescores the rules registered on it, so
//! variables in different components never observe each other's tentative
//! values.

use blockmrf_core::{GroundRuleStore, VariableId};

/// Union-find over variable indices with path halving and union by size.
#[derive(Debug, Clone)]
pub(crate) struct DisjointSets {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSets {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            size: vec![1; len],
        }
    }

    pub(crate) fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    pub(crate) fn union(&mut self, a: usize, b: usize) {
        let (mut a, mut b) = (self.find(a), self.find(b));
        if a == b {
            return;
        }
        if self.size[a] < self.size[b] {
            std::mem::swap(&mut a, &mut b);
        }
        self.parent[b] = a;
        self.size[a] += self.size[b];
    }
}

/// Splits `order` into the connected components induced by `rules`.
///
/// Each component keeps the relative order of `order`, and components are
/// listed by the position of their first member. Rules must only reference
/// variables below `variable_count`.
pub fn partition(
    variable_count: usize,
    rules: &GroundRuleStore,
    order: &[VariableId],
) -> Vec<Vec<VariableId>> {
    let mut sets = DisjointSets::new(variable_count);
    for rule in rules.iter() {
        let variables = rule.variables();
        if let Some((first, rest)) = variables.split_first() {
            for other in rest {
                sets.union(first.index(), other.index());
            }
        }
    }

    let mut slot_of_root = vec![usize::MAX; variable_count];
    let mut components: Vec<Vec<VariableId>> = Vec::new();
    for &id in order {
        let root = sets.find(id.index());
        if slot_of_root[root] == usize::MAX {
            slot_of_root[root] = components.len();
            components.push(Vec::new());
        }
        components[slot_of_root[root]].push(id);
    }
    components
}
