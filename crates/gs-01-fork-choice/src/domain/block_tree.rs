//! # Block Tree & Vote Ledger
//!
//! Arena of block records addressed by a stable index, with a parent index on
//! every block and a separate children index. Identifiers are translated to
//! arena indices once, at the API boundary.
//!
//! ## Weight Accounting
//!
//! A vote adds the validator's stake to every block from the target up to
//! genesis. Proposer boost adds a fixed amount along the same kind of path
//! and is the only contribution that is ever taken back (under the default
//! cumulative accounting).

use super::block::{Block, BlockIndex, GENESIS_INDEX};
use super::config::{BoostReplacement, ForkChoiceConfig, VoteAccounting};
use super::error::{ForkChoiceError, ForkChoiceResult};
use super::fork_choice::ForkChoiceEngine;
use super::validator::{Validator, ValidatorRegistry};
use crate::metrics;
use shared_types::{BlockId, Slot, ValidatorId, Weight};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, trace};

/// Block tree owning every block and validator of one episode.
///
/// The tree only grows; nothing is pruned.
#[derive(Clone, Debug)]
pub struct BlockTree {
    config: ForkChoiceConfig,
    blocks: Vec<Block>,
    /// Parent -> children, indexed like `blocks`
    children: Vec<Vec<BlockIndex>>,
    /// Boundary lookup from identifier to arena index
    index: HashMap<BlockId, BlockIndex>,
    validators: ValidatorRegistry,
    /// Block currently carrying proposer boost
    boosted: Option<BlockIndex>,
}

impl BlockTree {
    /// Create a tree rooted at `BlockId::GENESIS` with `num_validators`
    /// validators, each voting for genesis.
    pub fn new(num_validators: usize, config: ForkChoiceConfig) -> Self {
        Self::with_genesis(num_validators, BlockId::GENESIS, config)
    }

    /// Create a tree rooted at a caller-chosen genesis identifier.
    pub fn with_genesis(num_validators: usize, genesis: BlockId, config: ForkChoiceConfig) -> Self {
        let validators = ValidatorRegistry::new(num_validators, config.default_stake, genesis);
        let mut index = HashMap::new();
        index.insert(genesis, GENESIS_INDEX);

        Self {
            config,
            blocks: vec![Block::genesis(genesis)],
            children: vec![Vec::new()],
            index,
            validators,
            boosted: None,
        }
    }

    // === MUTATIONS ===

    /// Insert a block under an existing parent.
    ///
    /// The new block starts with zero weight. Its support set inherits every
    /// validator recorded on any existing block that is not an ancestor
    /// (inclusive) of `parent_id`.
    pub fn insert_block(
        &mut self,
        id: BlockId,
        parent_id: BlockId,
        proposer: ValidatorId,
        withheld: bool,
        slot: Slot,
    ) -> ForkChoiceResult<()> {
        let parent = self
            .lookup(parent_id)
            .ok_or(ForkChoiceError::UnknownParent(parent_id))?;
        if self.index.contains_key(&id) {
            return Err(ForkChoiceError::DuplicateBlock(id));
        }

        let ancestry: HashSet<BlockIndex> = self.ancestry(parent).collect();
        let inherited: BTreeSet<ValidatorId> = self
            .blocks
            .iter()
            .enumerate()
            .filter(|(i, _)| !ancestry.contains(i))
            .flat_map(|(_, block)| block.votes.iter().copied())
            .collect();

        let idx = self.blocks.len();
        self.blocks.push(Block {
            id,
            parent: Some(parent),
            parent_id: Some(parent_id),
            proposer: Some(proposer),
            weight: 0.0,
            withheld,
            slot,
            votes: inherited,
        });
        self.children.push(Vec::new());
        self.children[parent].push(idx);
        self.index.insert(id, idx);

        debug!(
            block = %id,
            parent = %parent_id,
            proposer = %proposer,
            withheld,
            slot,
            inherited_votes = self.blocks[idx].votes.len(),
            "Block inserted"
        );
        metrics::record_block_inserted(withheld);
        Ok(())
    }

    /// Record a vote and propagate the validator's stake to the target's
    /// ancestry.
    pub fn record_vote(&mut self, validator_id: ValidatorId, target: BlockId) -> ForkChoiceResult<()> {
        let stake = self
            .validators
            .get(validator_id)
            .map(Validator::stake)
            .ok_or(ForkChoiceError::UnknownValidator(validator_id))?;
        let target_idx = self
            .lookup(target)
            .ok_or(ForkChoiceError::UnknownBlock(target))?;
        let stake = stake as Weight;

        if self.config.vote_accounting == VoteAccounting::LatestMessage {
            let previous = self
                .validators
                .get_mut(validator_id)
                .and_then(|v| v.contribution.take());
            if let Some(previous) = previous {
                self.blocks[previous].votes.remove(&validator_id);
                self.add_weight_along(previous, -stake);
            }
        }

        if let Some(validator) = self.validators.get_mut(validator_id) {
            validator.latest_vote = target;
            validator.contribution = Some(target_idx);
        }
        self.blocks[target_idx].votes.insert(validator_id);
        self.add_weight_along(target_idx, stake);

        trace!(validator = %validator_id, target = %target, "Vote recorded");
        metrics::record_vote();
        Ok(())
    }

    /// Boost `block_id` and its ancestry by the configured proposer boost.
    pub fn apply_proposer_boost(&mut self, block_id: BlockId) -> ForkChoiceResult<()> {
        let idx = self
            .lookup(block_id)
            .ok_or(ForkChoiceError::UnknownBlock(block_id))?;

        if self.config.boost_replacement == BoostReplacement::ClearPrevious {
            self.clear_proposer_boost();
        }

        let boost = self.config.proposer_boost();
        self.add_weight_along(idx, boost);
        self.boosted = Some(idx);

        debug!(block = %block_id, boost, "Proposer boost applied");
        Ok(())
    }

    /// Remove the active proposer boost, if any.
    pub fn clear_proposer_boost(&mut self) {
        if let Some(idx) = self.boosted.take() {
            let boost = self.config.proposer_boost();
            self.add_weight_along(idx, -boost);
            debug!(block = %self.blocks[idx].id, boost, "Proposer boost cleared");
        }
    }

    /// Publish every withheld block proposed by `proposer`.
    ///
    /// Returns the number of blocks released.
    pub fn release_withheld(&mut self, proposer: ValidatorId) -> usize {
        let mut released = 0;
        for block in self
            .blocks
            .iter_mut()
            .filter(|b| b.withheld && b.proposer == Some(proposer))
        {
            block.withheld = false;
            released += 1;
        }
        if released > 0 {
            debug!(proposer = %proposer, released, "Withheld blocks released");
        }
        released
    }

    // === READS ===

    pub fn config(&self) -> &ForkChoiceConfig {
        &self.config
    }

    pub fn genesis(&self) -> BlockId {
        self.blocks[GENESIS_INDEX].id
    }

    /// Canonical head according to the greedy weighted descent.
    pub fn head(&self) -> BlockId {
        ForkChoiceEngine::new(self).head()
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.lookup(id).map(|idx| &self.blocks[idx])
    }

    /// All blocks in insertion order, genesis first.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    pub fn blocks_proposed_by(&self, proposer: ValidatorId) -> impl Iterator<Item = &Block> {
        self.blocks
            .iter()
            .filter(move |b| b.proposer == Some(proposer))
    }

    pub fn children_of(&self, id: BlockId) -> ForkChoiceResult<Vec<BlockId>> {
        let idx = self.lookup(id).ok_or(ForkChoiceError::UnknownBlock(id))?;
        Ok(self.children[idx]
            .iter()
            .map(|&c| self.blocks[c].id)
            .collect())
    }

    pub fn weight_of(&self, id: BlockId) -> ForkChoiceResult<Weight> {
        self.block(id)
            .map(Block::weight)
            .ok_or(ForkChoiceError::UnknownBlock(id))
    }

    pub fn votes_of(&self, id: BlockId) -> ForkChoiceResult<&BTreeSet<ValidatorId>> {
        self.block(id)
            .map(Block::votes)
            .ok_or(ForkChoiceError::UnknownBlock(id))
    }

    pub fn validator(&self, id: ValidatorId) -> Option<&Validator> {
        self.validators.get(id)
    }

    pub fn validators(&self) -> &ValidatorRegistry {
        &self.validators
    }

    /// Block currently carrying proposer boost.
    pub fn boosted_block(&self) -> Option<BlockId> {
        self.boosted.map(|idx| self.blocks[idx].id)
    }

    /// Identifiers from `id` up to genesis, inclusive on both ends.
    pub fn ancestors_of(&self, id: BlockId) -> ForkChoiceResult<Vec<BlockId>> {
        let idx = self.lookup(id).ok_or(ForkChoiceError::UnknownBlock(id))?;
        Ok(self.ancestry(idx).map(|i| self.blocks[i].id).collect())
    }

    /// Number of blocks, genesis included.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false: genesis is present from construction.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    // === ARENA HELPERS ===

    pub(crate) fn lookup(&self, id: BlockId) -> Option<BlockIndex> {
        self.index.get(&id).copied()
    }

    pub(crate) fn block_at(&self, idx: BlockIndex) -> &Block {
        &self.blocks[idx]
    }

    pub(crate) fn children_at(&self, idx: BlockIndex) -> &[BlockIndex] {
        &self.children[idx]
    }

    /// Walk from `from` to genesis, inclusive.
    pub(crate) fn ancestry(&self, from: BlockIndex) -> impl Iterator<Item = BlockIndex> + '_ {
        std::iter::successors(Some(from), move |&i| self.blocks[i].parent)
    }

    fn add_weight_along(&mut self, from: BlockIndex, delta: Weight) {
        let mut current = Some(from);
        while let Some(idx) = current {
            let block = &mut self.blocks[idx];
            block.add_weight(delta);
            current = block.parent;
        }
    }
}
