//! Block records stored in the tree arena

use serde::{Deserialize, Serialize};
use shared_types::{BlockId, Slot, ValidatorId, Weight};
use std::collections::BTreeSet;

/// Position of a block in the tree arena. Stable for the tree's lifetime.
pub(crate) type BlockIndex = usize;

/// Arena slot of the genesis block.
pub(crate) const GENESIS_INDEX: BlockIndex = 0;

/// A block in the simulated tree.
///
/// Children are not stored here; the tree keeps a parent → children index.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Block {
    pub(crate) id: BlockId,
    #[serde(skip)]
    pub(crate) parent: Option<BlockIndex>,
    pub(crate) parent_id: Option<BlockId>,
    pub(crate) proposer: Option<ValidatorId>,
    pub(crate) weight: Weight,
    pub(crate) withheld: bool,
    pub(crate) slot: Slot,
    pub(crate) votes: BTreeSet<ValidatorId>,
}

impl Block {
    pub(crate) fn genesis(id: BlockId) -> Self {
        Self {
            id,
            parent: None,
            parent_id: None,
            proposer: None,
            weight: 0.0,
            withheld: false,
            slot: 0,
            votes: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    /// Parent identifier; `None` only for genesis.
    pub fn parent(&self) -> Option<BlockId> {
        self.parent_id
    }

    /// Proposer; `None` only for genesis.
    pub fn proposer(&self) -> Option<ValidatorId> {
        self.proposer
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Withheld blocks are invisible to fork choice but still aggregate weight.
    pub fn is_withheld(&self) -> bool {
        self.withheld
    }

    /// Slot (selfish mode) or epoch (staircase mode) the block was proposed in.
    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Validators currently recorded as supporting this block.
    pub fn votes(&self) -> &BTreeSet<ValidatorId> {
        &self.votes
    }

    pub fn is_genesis(&self) -> bool {
        self.parent_id.is_none()
    }

    pub(crate) fn add_weight(&mut self, delta: Weight) {
        self.weight += delta;
        debug_assert!(
            self.weight >= 0.0,
            "block {} weight went negative: {}",
            self.id,
            self.weight
        );
    }
}
