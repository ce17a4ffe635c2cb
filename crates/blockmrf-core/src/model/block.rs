//! Groups of mutually exclusive variables.

use std::fmt;
use std::ops::Range;

use super::VariableId;

/// Index of a block. Doubles as the variable index in the UAI format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockId(pub usize);

impl BlockId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}", self.0)
    }
}

/// A contiguous range of variables of which at most one may be true.
///
/// When `exactly_one` is false the block has an implicit "none" state, which
/// is category `0`; member `k` is then category `k + 1`. When `exactly_one`
/// is true member `k` is category `k`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    members: Range<usize>,
    exactly_one: bool,
}

impl Block {
    pub(crate) fn new(members: Range<usize>, exactly_one: bool) -> Self {
        Self {
            members,
            exactly_one,
        }
    }

    /// Number of member variables.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn exactly_one(&self) -> bool {
        self.exactly_one
    }

    /// Number of categorical states, including "none" when allowed.
    pub fn cardinality(&self) -> usize {
        if self.exactly_one {
            self.len()
        } else {
            self.len() + 1
        }
    }

    /// Iterates the member variables in order.
    pub fn variables(&self) -> impl ExactSizeIterator<Item = VariableId> + '_ {
        self.members.clone().map(VariableId)
    }

    pub fn contains(&self, id: VariableId) -> bool {
        self.members.contains(&id.0)
    }

    /// Returns the variable set to true by `category`, or `None` for the
    /// "none" state or an out-of-range category.
    pub fn category_member(&self, category: usize) -> Option<VariableId> {
        if category >= self.cardinality() {
            return None;
        }
        if self.exactly_one {
            Some(VariableId(self.members.start + category))
        } else if category == 0 {
            None
        } else {
            Some(VariableId(self.members.start + category - 1))
        }
    }

    /// Returns the category of member `id`, if it belongs to this block.
    pub fn category_of(&self, id: VariableId) -> Option<usize> {
        if !self.contains(id) {
            return None;
        }
        let offset = id.0 - self.members.start;
        Some(if self.exactly_one { offset } else { offset + 1 })
    }
}
