//! Block model: an arena of Boolean variables grouped into blocks.
//!
//! Variables are addressed by [`VariableId`] and blocks by [`BlockId`]. Every
//! variable belongs to exactly one block, and blocks own contiguous index
//! ranges of the arena, so no aliasing references are ever handed out.
//!
//! Truth values live behind atomics: readers and writers only need `&self`,
//! which lets rounding workers share one model. Callers that need exclusive
//! access (encoding, decoding) take `&mut` on the owning store instead.

mod block;
mod variable;


pub use block::{Block, BlockId};
pub use variable::{TruthValues, Variable, VariableId};

use crate::error::{ModelError, Result};

/// Arena of variables partitioned into blocks.
#[derive(Debug, Default)]
pub struct BlockModel {
    variables: Vec<Variable>,
    blocks: Vec<Block>,
}

impl BlockModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a block whose members all start at `0.0`.
    pub fn add_block<I, S>(&mut self, names: I, exactly_one: bool) -> Result<BlockId>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_block_with_values(names.into_iter().map(|n| (n, 0.0)), exactly_one)
    }

    /// Adds a block with initial truth values.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyBlock`] when no members are given and
    /// [`ModelError::ValueOutOfRange`] when a value is outside `[0, 1]`.
    pub fn add_block_with_values<I, S>(&mut self, members: I, exactly_one: bool) -> Result<BlockId>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let id = BlockId(self.blocks.len());
        let start = self.variables.len();
        for (name, value) in members {
            if !(0.0..=1.0).contains(&value) {
                let variable = VariableId(self.variables.len());
                self.variables.truncate(start);
                return Err(ModelError::ValueOutOfRange { variable, value });
            }
            self.variables.push(Variable::new(name.into(), id, value));
        }
        if self.variables.len() == start {
            return Err(ModelError::EmptyBlock);
        }
        self.blocks
            .push(Block::new(start..self.variables.len(), exactly_one));
        Ok(id)
    }

    /// Adds a single free Boolean variable as its own zero-or-one block.
    pub fn add_variable(&mut self, name: impl Into<String>, value: f64) -> Result<VariableId> {
        self.add_block_with_values([(name.into(), value)], false)?;
        Ok(VariableId(self.variables.len() - 1))
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id.0)
    }

    pub fn variable(&self, id: VariableId) -> Option<&Variable> {
        self.variables.get(id.0)
    }

    /// Iterates all variable ids in arena order.
    pub fn variable_ids(&self) -> impl ExactSizeIterator<Item = VariableId> {
        (0..self.variables.len()).map(VariableId)
    }

    /// Returns the block owning `id`.
    pub fn block_of(&self, id: VariableId) -> Option<BlockId> {
        self.variables.get(id.0).map(Variable::block)
    }

    /// Returns the truth value of `id`, or `None` if it does not exist.
    pub fn get(&self, id: VariableId) -> Option<f64> {
        self.variables.get(id.0).map(Variable::value)
    }

    /// Sets the truth value of `id`.
    ///
    /// Values are not range-checked here; rounding passes through
    /// intermediate values and enumeration only writes `0.0`/`1.0`.
    pub fn set_value(&self, id: VariableId, value: f64) -> Result<()> {
        let variable = self
            .variables
            .get(id.0)
            .ok_or(ModelError::UnknownVariable(id))?;
        variable.set_value(value);
        Ok(())
    }

    /// Sets every member of `block` to `0.0`.
    pub fn clear_block(&self, block: BlockId) -> Result<()> {
        let b = self.blocks.get(block.0).ok_or(ModelError::UnknownBlock(block))?;
        for id in b.variables() {
            self.variables[id.0].set_value(0.0);
        }
        Ok(())
    }

    /// Puts `block` into categorical state `category`: all members are zeroed,
    /// then the member for `category` (if any) is set to `1.0`.
    pub fn set_category(&self, block: BlockId, category: usize) -> Result<()> {
        let b = self.blocks.get(block.0).ok_or(ModelError::UnknownBlock(block))?;
        if category >= b.cardinality() {
            return Err(ModelError::CategoryOutOfRange {
                block,
                category,
                cardinality: b.cardinality(),
            });
        }
        for id in b.variables() {
            self.variables[id.0].set_value(0.0);
        }
        if let Some(member) = b.category_member(category) {
            self.variables[member.0].set_value(1.0);
        }
        Ok(())
    }

    /// Copies out every truth value in arena order.
    pub fn snapshot(&self) -> Vec<f64> {
        self.variables.iter().map(Variable::value).collect()
    }

    /// Restores values previously taken with [`snapshot`](Self::snapshot).
    pub fn restore(&self, values: &[f64]) -> Result<()> {
        if values.len() != self.variables.len() {
            return Err(ModelError::SnapshotMismatch {
                expected: self.variables.len(),
                actual: values.len(),
            });
        }
        for (variable, &value) in self.variables.iter().zip(values) {
            variable.set_value(value);
        }
        Ok(())
    }

    /// Counts blocks whose committed state breaks their cardinality rule:
    /// more than one member at `1.0`, or no member at `1.0` in an
    /// `exactly_one` block.
    pub fn violated_blocks(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| {
                let ones = b
                    .variables()
                    .filter(|id| self.variables[id.0].value() == 1.0)
                    .count();
                ones > 1 || (b.exactly_one() && ones == 0)
            })
            .count()
    }
}

impl TruthValues for BlockModel {
    fn value(&self, id: VariableId) -> f64 {
        self.variables[id.0].value()
    }
}
