//! # LMD-GHOST Style Fork Choice
//!
//! Greedy Heaviest Observed Subtree, evaluated one level at a time.
//!
//! ## Rule
//!
//! 1. Start at genesis
//! 2. Keep only children that are not withheld
//! 3. No visible children: the current block is the head
//! 4. Otherwise descend into the child with the largest `(weight, id)` pair
//!
//! Weight already aggregates the whole subtree (votes propagate to every
//! ancestor), so comparing immediate children is enough. Proposer boost biases
//! the comparison; withheld blocks are skipped regardless of their weight.

use super::block::{BlockIndex, GENESIS_INDEX};
use super::block_tree::BlockTree;
use shared_types::BlockId;
use std::cmp::Ordering;

/// Head selection over a borrowed block tree.
///
/// Pure: for a fixed tree state `head()` always returns the same block.
#[derive(Clone, Copy, Debug)]
pub struct ForkChoiceEngine<'a> {
    tree: &'a BlockTree,
}

impl<'a> ForkChoiceEngine<'a> {
    pub fn new(tree: &'a BlockTree) -> Self {
        Self { tree }
    }

    /// Get the canonical head.
    pub fn head(&self) -> BlockId {
        self.tree.block_at(self.head_index()).id()
    }

    /// Canonical chain from genesis to head, both inclusive.
    pub fn canonical_chain(&self) -> Vec<BlockId> {
        let mut chain: Vec<BlockId> = self
            .tree
            .ancestry(self.head_index())
            .map(|idx| self.tree.block_at(idx).id())
            .collect();
        chain.reverse();
        chain
    }

    pub(crate) fn head_index(&self) -> BlockIndex {
        let mut current = GENESIS_INDEX;

        loop {
            let best_child = self
                .tree
                .children_at(current)
                .iter()
                .copied()
                .filter(|&child| !self.tree.block_at(child).is_withheld())
                .max_by(|&a, &b| self.compare(a, b));

            match best_child {
                Some(child) => current = child,
                None => return current,
            }
        }
    }

    /// Weight first, identifier as tie-break (larger wins).
    fn compare(&self, a: BlockIndex, b: BlockIndex) -> Ordering {
        let (a, b) = (self.tree.block_at(a), self.tree.block_at(b));
        a.weight()
            .total_cmp(&b.weight())
            .then_with(|| a.id().cmp(&b.id()))
    }
}
